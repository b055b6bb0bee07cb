//! Error types for the converter service.

use crate::domain::CurrencyCode;
use crate::ports::RateSourceError;

/// Domain-level errors (invalid values).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid currency code: {0:?}")]
    InvalidCurrencyCode(String),

    #[error("Amount must be a positive number")]
    InvalidAmount(f64),
}

/// Errors from the raw-input parsing helpers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid amount format")]
    InvalidFormat,

    #[error("{0}")]
    InvalidType(&'static str),
}

/// Application-level errors (for HTTP responses).
///
/// The HTTP adapter owns the kind -> status mapping.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// One or more client input problems, in field order.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Unsupported currency code: {0}")]
    UnsupportedCurrency(String),

    /// A request that reached the service without passing its own checks.
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Exchange rate not found for {from} to {to}")]
    RateUnavailable { from: CurrencyCode, to: CurrencyCode },

    #[error("{message}")]
    Upstream {
        code: String,
        message: String,
        status: Option<u16>,
    },

    /// Reserved for adapter failures that fit no other kind. Handler panics
    /// are rendered by the HTTP layer and never become this variant.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RateSourceError> for ConversionError {
    fn from(err: RateSourceError) -> Self {
        match err {
            RateSourceError::RateUnavailable { from, to } => {
                ConversionError::RateUnavailable { from, to }
            }
            RateSourceError::Upstream {
                code,
                message,
                status,
            } => ConversionError::Upstream {
                code,
                message,
                status,
            },
        }
    }
}

impl From<ParseError> for ConversionError {
    fn from(err: ParseError) -> Self {
        ConversionError::InvalidRequest(err.to_string())
    }
}

impl From<DomainError> for ConversionError {
    fn from(err: DomainError) -> Self {
        ConversionError::InvalidRequest(err.to_string())
    }
}
