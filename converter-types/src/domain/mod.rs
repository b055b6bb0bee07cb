//! Domain models for the converter service.

pub mod amount;
pub mod conversion;
pub mod currency;

pub use amount::{Amount, round_to};
pub use conversion::{ConversionRequest, ConversionResponse, ExchangeRate};
pub use currency::{CurrencyCode, is_three_letter_code};
