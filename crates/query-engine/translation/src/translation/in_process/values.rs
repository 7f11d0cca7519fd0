//! Handle the translation of literal values.

use serde_json::{Number, Value};

/// Convert a clause literal into the JSON value records are compared with.
/// Quoted literals are always strings, date-shaped ones included, so dates
/// compare lexically here while the document store compares them as dates.
pub fn to_literal(value: &str, quoted: bool) -> Value {
    if quoted {
        return Value::String(value.to_string());
    }
    if value.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if value.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if let Ok(int) = value.parse::<i64>() {
        return Value::Number(int.into());
    }
    value
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map_or_else(|| Value::String(value.to_string()), Value::Number)
}
