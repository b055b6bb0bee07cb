//! # Converter Types
//!
//! Domain types, validation rules and port traits for the currency converter.
//! This crate has ZERO external IO dependencies - only data structures,
//! input validation, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (CurrencyCode, Amount, ExchangeRate)
//! - `validation/` - Checks over raw, untyped request input
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;
pub mod validation;

// Re-export commonly used types
pub use domain::{Amount, ConversionRequest, ConversionResponse, CurrencyCode, ExchangeRate};
pub use dto::*;
pub use error::{ConversionError, DomainError, ParseError};
pub use ports::{RateSource, RateSourceError};
pub use validation::ValidationResult;
