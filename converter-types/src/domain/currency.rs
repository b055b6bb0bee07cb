//! Currency code value type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::DomainError;

/// A normalized three-letter currency code (always uppercase ASCII).
///
/// The code is only checked for shape here. Whether a rate source actually
/// quotes it is a separate, asynchronous question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Trims, checks for exactly three ASCII letters and uppercases.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if !is_three_letter_code(trimmed) {
            return Err(DomainError::InvalidCurrencyCode(raw.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// True when `code` is exactly three ASCII letters, with no trimming applied.
pub fn is_three_letter_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_alphabetic())
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CurrencyCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CurrencyCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes() {
        let code = CurrencyCode::parse(" usd ").unwrap();
        assert_eq!(code.as_str(), "USD");
        assert_eq!(code.to_string(), "USD");
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        for raw in ["", "   ", "US", "USDX", "US1", "U$D", "ÜSD"] {
            assert!(
                matches!(
                    CurrencyCode::parse(raw),
                    Err(DomainError::InvalidCurrencyCode(_))
                ),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_serde_roundtrip_as_plain_string() {
        let code: CurrencyCode = serde_json::from_str("\"brl\"").unwrap();
        assert_eq!(code, "BRL");
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"BRL\"");
    }

    #[test]
    fn test_deserialize_rejects_invalid() {
        assert!(serde_json::from_str::<CurrencyCode>("\"DOLLAR\"").is_err());
    }
}
