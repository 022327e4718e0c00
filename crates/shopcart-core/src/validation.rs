//! # Validation Module
//!
//! Identifier validation and lenient numeric coercion for cart inputs.
//!
//! ## Input Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      What gets rejected vs coerced                      │
//! │                                                                         │
//! │  Item identifier ("_id")                                               │
//! │  ├── missing / "" / "   "  → ValidationError::Required (fail fast)      │
//! │  ├── null, bool, [], {}    → read as "", so also Required              │
//! │  ├── 42                    → "42"                                       │
//! │  └── any other string      → accepted as-is                             │
//! │                                                                         │
//! │  Numbers (price, quantity delta)                                       │
//! │  ├── 3, -2, 9.99           → used                                       │
//! │  ├── "3", " 9.99 ", "1e2"  → parsed                                     │
//! │  ├── true / false          → 1 / 0                                      │
//! │  └── null, "abc", [], {}   → 0 (never an error)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use serde_json::json;
//! use shopcart_core::validation::{coerce_quantity, validate_item_id};
//!
//! assert!(validate_item_id("sku-1").is_ok());
//! assert!(validate_item_id("  ").is_err());
//!
//! assert_eq!(coerce_quantity(&json!("-2")), -2);
//! assert_eq!(coerce_quantity(&json!("lots")), 0);
//! ```

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ValidationError;
use crate::ID_FIELD;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates an item identifier.
///
/// ## Rules
/// - Must not be empty after trimming whitespace
///
/// Identifiers are otherwise opaque: they are not trimmed or normalised, so
/// `"a"` and `" a"` are distinct items.
pub fn validate_item_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: ID_FIELD.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Coercion
// =============================================================================

/// Coerces a loosely typed JSON value to a finite number.
///
/// Numbers pass through, strings are trimmed and parsed, booleans map to
/// 1/0. Everything else, including unparsable strings and non-finite
/// results such as `"NaN"` or `"inf"`, becomes 0.
pub fn coerce_number(value: &Value) -> f64 {
    let number = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_numeric_str(s),
        Value::Bool(true) => 1.0,
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => 0.0,
    };

    if number.is_finite() {
        number
    } else {
        0.0
    }
}

/// Coerces a loosely typed JSON value to an integer quantity.
///
/// Integral inputs are kept exact (including large `i64` strings); fractional
/// inputs are truncated toward zero; values outside `i64` saturate.
pub fn coerce_quantity(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .unwrap_or_else(|| truncate(coerce_number(value))),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .unwrap_or_else(|_| truncate(coerce_number(value))),
        _ => truncate(coerce_number(value)),
    }
}

/// Serde adapter for quantity fields that accept any JSON value.
///
/// ```rust
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Line {
///     #[serde(deserialize_with = "shopcart_core::validation::deserialize_quantity")]
///     quantity: i64,
/// }
///
/// let line: Line = serde_json::from_str(r#"{"quantity": "4"}"#).unwrap();
/// assert_eq!(line.quantity, 4);
/// ```
pub fn deserialize_quantity<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_quantity(&value))
}

/// Serde adapter for identifier fields that accept any JSON value.
///
/// Strings pass through and numbers are stringified. Anything else reads as
/// an empty identifier, so a malformed `_id` surfaces as a validation error
/// on the one action that carries it instead of failing the whole payload.
pub fn deserialize_item_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let id = match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => String::new(),
    };
    Ok(id)
}

fn parse_numeric_str(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    s.parse::<f64>().unwrap_or(0.0)
}

// `as` saturates at the i64 bounds
fn truncate(number: f64) -> i64 {
    number.trunc() as i64
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_item_id() {
        assert!(validate_item_id("tee-black-m").is_ok());
        assert!(validate_item_id("42").is_ok());
        assert!(validate_item_id(" padded ").is_ok());

        assert!(validate_item_id("").is_err());
        assert!(validate_item_id("   ").is_err());
        assert!(validate_item_id("\t\n").is_err());
    }

    #[test]
    fn test_validate_item_id_error_names_field() {
        let err = validate_item_id("").unwrap_err();
        assert_eq!(err.to_string(), "_id is required");
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(&json!(10)), 10.0);
        assert_eq!(coerce_number(&json!(-2.5)), -2.5);
        assert_eq!(coerce_number(&json!(" 9.99 ")), 9.99);
        assert_eq!(coerce_number(&json!("1e2")), 100.0);
        assert_eq!(coerce_number(&json!(true)), 1.0);
        assert_eq!(coerce_number(&json!(false)), 0.0);
    }

    #[test]
    fn test_coerce_number_non_numeric_is_zero() {
        assert_eq!(coerce_number(&json!(null)), 0.0);
        assert_eq!(coerce_number(&json!("")), 0.0);
        assert_eq!(coerce_number(&json!("ten")), 0.0);
        assert_eq!(coerce_number(&json!("NaN")), 0.0);
        assert_eq!(coerce_number(&json!("inf")), 0.0);
        assert_eq!(coerce_number(&json!([1])), 0.0);
        assert_eq!(coerce_number(&json!({"amount": 1})), 0.0);
    }

    #[test]
    fn test_coerce_quantity() {
        assert_eq!(coerce_quantity(&json!(3)), 3);
        assert_eq!(coerce_quantity(&json!(-3)), -3);
        assert_eq!(coerce_quantity(&json!("7")), 7);
        assert_eq!(coerce_quantity(&json!("-1")), -1);
        assert_eq!(coerce_quantity(&json!(2.9)), 2);
        assert_eq!(coerce_quantity(&json!(-2.9)), -2);
        assert_eq!(coerce_quantity(&json!("1.5")), 1);
        assert_eq!(coerce_quantity(&json!("abc")), 0);
        assert_eq!(coerce_quantity(&json!(null)), 0);
    }

    #[test]
    fn test_coerce_quantity_saturates() {
        assert_eq!(coerce_quantity(&json!(u64::MAX)), i64::MAX);
        assert_eq!(coerce_quantity(&json!("9223372036854775807")), i64::MAX);
        assert_eq!(coerce_quantity(&json!(1e300)), i64::MAX);
        assert_eq!(coerce_quantity(&json!(-1e300)), i64::MIN);
    }

    #[test]
    fn test_deserialize_quantity_accepts_any_value() {
        #[derive(Deserialize)]
        struct Payload {
            #[serde(deserialize_with = "deserialize_quantity")]
            quantity: i64,
        }

        let parse = |raw: &str| serde_json::from_str::<Payload>(raw).unwrap().quantity;
        assert_eq!(parse(r#"{"quantity": 2}"#), 2);
        assert_eq!(parse(r#"{"quantity": "-4"}"#), -4);
        assert_eq!(parse(r#"{"quantity": null}"#), 0);
        assert_eq!(parse(r#"{"quantity": {"nested": true}}"#), 0);
    }

    #[test]
    fn test_deserialize_item_id_accepts_any_value() {
        #[derive(Deserialize)]
        struct Payload {
            #[serde(default, deserialize_with = "deserialize_item_id")]
            id: String,
        }

        let parse = |raw: &str| serde_json::from_str::<Payload>(raw).unwrap().id;
        assert_eq!(parse(r#"{"id": "sku-1"}"#), "sku-1");
        assert_eq!(parse(r#"{"id": 12}"#), "12");
        assert_eq!(parse(r#"{"id": null}"#), "");
        assert_eq!(parse(r#"{"id": [1]}"#), "");
        assert_eq!(parse(r#"{}"#), "");

        assert!(validate_item_id(&parse(r#"{"id": null}"#)).is_err());
    }
}
