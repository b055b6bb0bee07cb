//! Monetary amount value type.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A strictly positive, finite amount of money in major units.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(f64);

impl Amount {
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(DomainError::InvalidAmount(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Multiplies by `rate` and rounds half away from zero to `decimals` places.
    pub fn convert(&self, rate: f64, decimals: u32) -> f64 {
        round_to(self.0 * rate, decimals)
    }
}

impl TryFrom<f64> for Amount {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// Rounds half away from zero (`f64::round`) at `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_rejects_non_positive() {
        assert!(matches!(Amount::new(0.0), Err(DomainError::InvalidAmount(_))));
        assert!(matches!(Amount::new(-1.5), Err(DomainError::InvalidAmount(_))));
        assert!(Amount::new(f64::NAN).is_err());
        assert!(Amount::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_convert_rounds_to_cents() {
        assert_eq!(Amount::new(100.0).unwrap().convert(5.25, 2), 525.0);
        assert_eq!(Amount::new(123.45).unwrap().convert(0.85, 2), 104.93);
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(0.125, 2), 0.13);
    }
}
