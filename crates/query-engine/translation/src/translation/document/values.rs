//! Handle the translation of literal values.

use bson::Bson;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::super::error::Error;

/// Convert a clause literal into a document-store operand.
///
/// Unquoted literals may be booleans or numbers, narrowest type first. Any
/// literal that starts like an ISO-8601 date must parse as one. Everything
/// else is a string.
pub fn to_operand(value: &str, quoted: bool) -> Result<Bson, Error> {
    if !quoted {
        if value.eq_ignore_ascii_case("true") {
            return Ok(Bson::Boolean(true));
        }
        if value.eq_ignore_ascii_case("false") {
            return Ok(Bson::Boolean(false));
        }
        if let Ok(int) = value.parse::<i32>() {
            return Ok(Bson::Int32(int));
        }
        if let Ok(long) = value.parse::<i64>() {
            return Ok(Bson::Int64(long));
        }
        if is_number(value) {
            if let Ok(double) = value.parse::<f64>() {
                return Ok(Bson::Double(double));
            }
        }
    }

    if looks_like_date(value) {
        return parse_date(value)
            .map(|date_time| Bson::DateTime(bson::DateTime::from_millis(date_time.timestamp_millis())))
            .ok_or_else(|| Error::InvalidDateLiteral(value.to_string()));
    }

    Ok(Bson::String(value.to_string()))
}

fn is_number(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// `YYYY-MM-DD` followed by anything.
fn looks_like_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() >= 10
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5..7].iter().all(u8::is_ascii_digit)
        && bytes[7] == b'-'
        && bytes[8..10].iter().all(u8::is_ascii_digit)
}

/// A date-time with an offset, a local date-time read as UTC, or a date at
/// midnight UTC.
fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Some(date_time.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(local) = NaiveDateTime::parse_from_str(value, format) {
            return Some(local.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unquoted_literals_take_their_narrowest_type() {
        assert_eq!(to_operand("TRUE", false), Ok(Bson::Boolean(true)));
        assert_eq!(to_operand("false", false), Ok(Bson::Boolean(false)));
        assert_eq!(to_operand("42", false), Ok(Bson::Int32(42)));
        assert_eq!(to_operand("-7", false), Ok(Bson::Int32(-7)));
        assert_eq!(
            to_operand("4294967296", false),
            Ok(Bson::Int64(4_294_967_296))
        );
        assert_eq!(to_operand("2.5", false), Ok(Bson::Double(2.5)));
    }

    #[test]
    fn quoted_literals_stay_strings() {
        assert_eq!(to_operand("42", true), Ok(Bson::String("42".into())));
        assert_eq!(to_operand("true", true), Ok(Bson::String("true".into())));
        assert_eq!(to_operand("Bill", true), Ok(Bson::String("Bill".into())));
    }

    #[test]
    fn date_literals_become_date_times() {
        let expected = bson::DateTime::from_millis(1_483_264_800_000);
        assert_eq!(
            to_operand("2017-01-01T10:00:00.000", true),
            Ok(Bson::DateTime(expected))
        );
        assert_eq!(
            to_operand("2017-01-01T10:00:00Z", true),
            Ok(Bson::DateTime(expected))
        );
        assert_eq!(
            to_operand("2017-01-01", true),
            Ok(Bson::DateTime(bson::DateTime::from_millis(1_483_228_800_000)))
        );
    }

    #[test]
    fn malformed_date_literals_are_rejected() {
        let error = to_operand("2017-13-45", true).unwrap_err();
        insta::assert_snapshot!(error, @"Failed to parse date/time literal: 2017-13-45, you must supply date/time literals in ISO8601 format!");
    }
}
