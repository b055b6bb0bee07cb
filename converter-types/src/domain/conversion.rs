//! Exchange rate and conversion values.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::currency::CurrencyCode;

/// A rate quote for one currency pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExchangeRate {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    /// Units of `to` bought by one unit of `from`
    #[schema(example = 5.25)]
    pub rate: f64,
    /// Epoch milliseconds of the rate's last update
    #[schema(example = 1_718_841_600_000_i64)]
    pub timestamp: i64,
}

impl ExchangeRate {
    /// The identity quote `code -> code` at rate 1.0, stamped now.
    pub fn identity(code: CurrencyCode) -> Self {
        Self {
            from: code.clone(),
            to: code,
            rate: 1.0,
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

/// An untrusted conversion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConversionRequest {
    #[schema(example = "USD")]
    pub from: String,
    #[schema(example = "BRL")]
    pub to: String,
    #[schema(example = 100.0)]
    pub amount: f64,
}

/// Result of a successful conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResponse {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    /// The amount as requested
    #[schema(example = 100.0)]
    pub amount: f64,
    /// `amount * rate`, rounded half away from zero to 2 decimal places
    #[schema(example = 525.0)]
    pub converted_amount: f64,
    #[schema(example = 5.25)]
    pub rate: f64,
    /// Epoch milliseconds of the rate's last update
    #[schema(example = 1_718_841_600_000_i64)]
    pub timestamp: i64,
}
