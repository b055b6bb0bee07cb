//! # Converter Hex
//!
//! Application service layer and HTTP adapter for the currency converter.
//!
//! ## Architecture
//!
//! - `service/` - Application service (validation, rate lookup, arithmetic)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi/` - Generated OpenAPI document
//!
//! The service is generic over `S: RateSource`, allowing
//! different rate sources to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::CurrencyConversionService;
