//! Static Exchange Rate Table with Macro-Based Declaration
//!
//! This library holds a fixed base -> target rate table used for development,
//! tests and offline operation. Rates are declared with a macro that generates
//! the supported-currency list and the lookup table as `const` data.
//!
//! # Adding a New Rate
//! Add the currency to `currencies` and a `TARGET: rate` entry under its base:
//! ```ignore
//! define_rate_table! {
//!     currencies: [USD, BRL, CHF];
//!     USD => { BRL: 5.25, CHF: 0.91 },
//! }
//! ```
//!
//! # Example
//! ```
//! use exchange_rates::{lookup_rate, supported_currencies};
//!
//! assert_eq!(lookup_rate("USD", "BRL"), Ok(5.25));
//! assert_eq!(lookup_rate("usd", "usd"), Ok(1.0));
//! assert!(supported_currencies().contains(&"JPY"));
//! ```

// ─────────────────────────────────────────────────────────────────────────────
// Lookup Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Reasons a pair has no entry in the table.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    #[error("No rates published for base currency {0}")]
    UnknownBase(String),

    #[error("Exchange rate not found for {base} to {target}")]
    UnknownTarget { base: String, target: String },
}

// ─────────────────────────────────────────────────────────────────────────────
// Table Types
// ─────────────────────────────────────────────────────────────────────────────

/// All published rates for one base currency.
#[derive(Debug, Clone, Copy)]
pub struct BaseRates {
    pub base: &'static str,
    /// `(target, rate)` pairs: one unit of `base` buys `rate` units of `target`.
    pub rates: &'static [(&'static str, f64)],
}

impl BaseRates {
    pub fn rate_to(&self, target: &str) -> Option<f64> {
        self.rates
            .iter()
            .find(|(code, _)| code.eq_ignore_ascii_case(target))
            .map(|&(_, rate)| rate)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: Declares the supported list and the rate table
// ─────────────────────────────────────────────────────────────────────────────

/// Declares `SUPPORTED_CURRENCIES` and `RATE_TABLE`.
///
/// # Syntax
/// ```ignore
/// define_rate_table! {
///     currencies: [CODE, ...];
///     BASE => { TARGET: rate, ... },
/// }
/// ```
#[macro_export]
macro_rules! define_rate_table {
    (
        currencies: [$($code:ident),* $(,)?];
        $(
            $base:ident => { $($target:ident : $rate:expr),* $(,)? }
        ),* $(,)?
    ) => {
        /// Currency codes this table knows about, in declaration order.
        pub const SUPPORTED_CURRENCIES: &[&str] = &[$(stringify!($code)),*];

        /// Published rates, one row per base currency.
        pub const RATE_TABLE: &[$crate::BaseRates] = &[
            $(
                $crate::BaseRates {
                    base: stringify!($base),
                    rates: &[$((stringify!($target), $rate)),*],
                }
            ),*
        ];
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// RATE DEFINITIONS - Add new rates here!
// ─────────────────────────────────────────────────────────────────────────────

define_rate_table! {
    currencies: [USD, BRL, EUR, GBP, JPY];
    USD => { BRL: 5.25, EUR: 0.85, GBP: 0.73, JPY: 110.0 },
    BRL => { USD: 0.19, EUR: 0.16, GBP: 0.14, JPY: 20.95 },
    EUR => { USD: 1.18, BRL: 6.18, GBP: 0.86, JPY: 129.41 },
}

// ─────────────────────────────────────────────────────────────────────────────
// Lookup Functions
// ─────────────────────────────────────────────────────────────────────────────

pub fn supported_currencies() -> &'static [&'static str] {
    SUPPORTED_CURRENCIES
}

/// Case-insensitive membership check against [`SUPPORTED_CURRENCIES`].
pub fn is_supported(code: &str) -> bool {
    SUPPORTED_CURRENCIES
        .iter()
        .any(|c| c.eq_ignore_ascii_case(code))
}

pub fn rates_for(base: &str) -> Option<&'static BaseRates> {
    RATE_TABLE
        .iter()
        .find(|row| row.base.eq_ignore_ascii_case(base))
}

/// Looks up how many units of `target` one unit of `base` buys.
///
/// Identical codes always resolve to `1.0`, whether or not the table lists them.
pub fn lookup_rate(base: &str, target: &str) -> Result<f64, LookupError> {
    if base.eq_ignore_ascii_case(target) {
        return Ok(1.0);
    }

    let row = rates_for(base).ok_or_else(|| LookupError::UnknownBase(base.to_uppercase()))?;

    row.rate_to(target).ok_or_else(|| LookupError::UnknownTarget {
        base: base.to_uppercase(),
        target: target.to_uppercase(),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
