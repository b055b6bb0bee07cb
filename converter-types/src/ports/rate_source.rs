//! Rate source port.
//!
//! This trait defines the interface for exchange rate providers.
//! Implementations can be HTTP clients, static tables, test doubles, etc.

use crate::domain::{CurrencyCode, ExchangeRate};

/// Error code used when the provider could not be reached or gave no code.
pub const NETWORK_ERROR_CODE: &str = "NETWORK_ERROR";

/// Error type for rate source operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RateSourceError {
    /// Both currencies may be known, but no rate links them.
    #[error("Exchange rate not found for {from} to {to}")]
    RateUnavailable { from: CurrencyCode, to: CurrencyCode },

    /// Transport or provider failure. `status` is the provider's HTTP status, if it sent one.
    #[error("{message}")]
    Upstream {
        code: String,
        message: String,
        status: Option<u16>,
    },
}

impl RateSourceError {
    /// A transport-level failure with no provider status.
    pub fn network(message: impl Into<String>) -> Self {
        RateSourceError::Upstream {
            code: NETWORK_ERROR_CODE.to_string(),
            message: message.into(),
            status: None,
        }
    }
}

/// Port trait for exchange rate providers.
#[async_trait::async_trait]
pub trait RateSource: Send + Sync + 'static {
    /// Gets the rate from one currency to another, stamped with its last update.
    /// Returns how many units of `to` one unit of `from` buys.
    async fn get_exchange_rate(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<ExchangeRate, RateSourceError>;

    /// Lists every currency code this source can quote. Order carries no meaning.
    async fn get_supported_currencies(&self) -> Result<Vec<CurrencyCode>, RateSourceError>;
}
