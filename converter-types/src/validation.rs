//! Validation of raw, untyped request input.
//!
//! Raw values are `serde_json::Value`s so a field can arrive as a number, a
//! string, or not at all (`Value::Null`). Nothing here performs IO.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::is_three_letter_code;
use crate::error::ParseError;

// ─────────────────────────────────────────────────────────────────────────────
// Field Predicates and Parsers
// ─────────────────────────────────────────────────────────────────────────────

/// True for a string whose trimmed form is exactly three ASCII letters.
pub fn is_valid_currency_code(code: &Value) -> bool {
    code.as_str()
        .map(|s| is_three_letter_code(s.trim()))
        .unwrap_or(false)
}

/// True for a positive finite number, or a string that strictly parses to one.
pub fn is_valid_amount(amount: &Value) -> bool {
    let parsed = match amount {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_decimal(s),
        _ => None,
    };
    matches!(parsed, Some(v) if v > 0.0)
}

/// Converts a number or numeric string to `f64`.
///
/// Strings must parse completely: `"100abc"` is an `InvalidFormat`, not `100`.
pub fn parse_amount(amount: &Value) -> Result<f64, ParseError> {
    match amount {
        Value::Number(n) => n.as_f64().ok_or(ParseError::InvalidFormat),
        Value::String(s) => parse_decimal(s).ok_or(ParseError::InvalidFormat),
        _ => Err(ParseError::InvalidType(
            "Amount must be a number or numeric string",
        )),
    }
}

/// Trims and uppercases a currency code.
pub fn sanitize_currency_code(code: &Value) -> Result<String, ParseError> {
    match code.as_str() {
        Some(s) if !s.is_empty() => Ok(s.trim().to_uppercase()),
        _ => Err(ParseError::InvalidType("Currency code must be a string")),
    }
}

fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Mirrors the usual notion of a "falsy" request field: absent, empty, zero or false.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Request Validation
// ─────────────────────────────────────────────────────────────────────────────

/// Every problem found in a request, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Checks `from`, `to` and `amount`, collecting every failure rather than stopping at the first.
pub fn validate_conversion_params(from: &Value, to: &Value, amount: &Value) -> ValidationResult {
    let mut errors = Vec::new();

    for (label, code) in [("From", from), ("To", to)] {
        if is_falsy(code) {
            errors.push(format!("{label} currency is required"));
        } else if !is_valid_currency_code(code) {
            errors.push(format!(
                "{label} currency must be a valid 3-letter currency code"
            ));
        }
    }

    if amount.is_null() {
        errors.push("Amount is required".to_string());
    } else if !is_valid_amount(amount) {
        errors.push("Amount must be a positive number".to_string());
    }

    ValidationResult::from_errors(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_currency_code_any_case_and_padding() {
        for code in ["USD", "usd", "Eur", " gbp ", "\tJPY\n"] {
            assert!(is_valid_currency_code(&json!(code)), "{code:?}");
        }
    }

    #[test]
    fn test_currency_code_rejects() {
        for code in ["", "   ", "US", "USDT", "US1", "U D", "12€"] {
            assert!(!is_valid_currency_code(&json!(code)), "{code:?}");
        }
        assert!(!is_valid_currency_code(&Value::Null));
        assert!(!is_valid_currency_code(&json!(123)));
        assert!(!is_valid_currency_code(&json!(["USD"])));
    }

    #[test]
    fn test_valid_amounts() {
        for amount in [json!(100), json!(0.01), json!(123.45), json!("100"), json!(" 42.5 "), json!("1e3")] {
            assert!(is_valid_amount(&amount), "{amount}");
        }
    }

    #[test]
    fn test_invalid_amounts() {
        for amount in [
            json!(0),
            json!(-100),
            json!("0"),
            json!("-5"),
            json!("abc"),
            json!("100abc"),
            json!(""),
            json!("NaN"),
            json!("inf"),
            Value::Null,
            json!(true),
            json!({"value": 1}),
        ] {
            assert!(!is_valid_amount(&amount), "{amount}");
        }
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(&json!("123.45")), Ok(123.45));
        assert_eq!(parse_amount(&json!(100)), Ok(100.0));
        assert_eq!(parse_amount(&json!("-3")), Ok(-3.0));
    }

    #[test]
    fn test_parse_amount_errors() {
        assert_eq!(parse_amount(&json!("abc")), Err(ParseError::InvalidFormat));
        assert_eq!(parse_amount(&json!("100abc")), Err(ParseError::InvalidFormat));
        assert!(matches!(parse_amount(&Value::Null), Err(ParseError::InvalidType(_))));
        assert!(matches!(parse_amount(&json!({})), Err(ParseError::InvalidType(_))));
    }

    #[test]
    fn test_sanitize_currency_code() {
        assert_eq!(sanitize_currency_code(&json!(" usd ")), Ok("USD".to_string()));
        assert!(matches!(sanitize_currency_code(&json!("")), Err(ParseError::InvalidType(_))));
        assert!(matches!(sanitize_currency_code(&Value::Null), Err(ParseError::InvalidType(_))));
        assert!(matches!(sanitize_currency_code(&json!(840)), Err(ParseError::InvalidType(_))));
    }

    #[test]
    fn test_valid_params() {
        let result = validate_conversion_params(&json!("USD"), &json!("brl"), &json!("100"));
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_short_from_code_is_the_only_error() {
        let result = validate_conversion_params(&json!("US"), &json!("BRL"), &json!(100));
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec!["From currency must be a valid 3-letter currency code"]
        );
    }

    #[test]
    fn test_all_fields_invalid_in_order() {
        let result = validate_conversion_params(&json!(""), &json!(""), &json!(-100));
        assert_eq!(
            result.errors,
            vec![
                "From currency is required",
                "To currency is required",
                "Amount must be a positive number",
            ]
        );
    }

    #[test]
    fn test_missing_fields() {
        let result = validate_conversion_params(&Value::Null, &Value::Null, &Value::Null);
        assert_eq!(
            result.errors,
            vec![
                "From currency is required",
                "To currency is required",
                "Amount is required",
            ]
        );
    }

    #[test]
    fn test_empty_amount_string_is_not_missing() {
        let result = validate_conversion_params(&json!("USD"), &json!("EUR"), &json!(""));
        assert_eq!(result.errors, vec!["Amount must be a positive number"]);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = validate_conversion_params(&json!("USD"), &json!("EUR"), &json!(1));
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"isValid": true, "errors": []})
        );
    }
}
