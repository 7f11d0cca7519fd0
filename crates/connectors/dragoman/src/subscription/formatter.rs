//! Write a point in time as a where clause literal.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};

use super::Error;

const ISO_8601: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// How the last read time is compared against a control field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsOfFormatter {
    /// Milliseconds since the epoch, unquoted.
    EpochMillis,
    /// A quoted date, written with a strftime format.
    Date { format: String },
}

impl AsOfFormatter {
    /// Choose a formatter for `pattern`:
    /// * `L` is epoch milliseconds,
    /// * blank is ISO-8601 with milliseconds,
    /// * `yyyy...` is a date pattern in the `yyyy-MM-dd'T'HH:mm:ss` style,
    /// * anything containing `%` is a strftime format.
    pub fn for_pattern(pattern: Option<&str>) -> Result<Self, Error> {
        let pattern = pattern.map(str::trim).unwrap_or_default();
        let unsupported = || Error::UnsupportedPattern(pattern.to_string());

        if pattern.is_empty() {
            return Ok(AsOfFormatter::Date {
                format: ISO_8601.to_string(),
            });
        }
        if pattern.eq_ignore_ascii_case("l") {
            return Ok(AsOfFormatter::EpochMillis);
        }

        let format = if pattern.to_lowercase().starts_with("yyyy") {
            translate_date_pattern(pattern).ok_or_else(unsupported)?
        } else if pattern.contains('%') {
            pattern.to_string()
        } else {
            return Err(unsupported());
        };

        if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
            return Err(unsupported());
        }
        Ok(AsOfFormatter::Date { format })
    }

    pub fn format(&self, last_read: DateTime<Utc>) -> String {
        match self {
            AsOfFormatter::EpochMillis => last_read.timestamp_millis().to_string(),
            AsOfFormatter::Date { format } => {
                let formatted = last_read.format(format).to_string();
                format!("'{}'", formatted.replace('\'', "''"))
            }
        }
    }
}

/// Translate a `yyyy-MM-dd`-style pattern into a strftime format. Text in
/// single quotes is literal and `''` is a quote.
fn translate_date_pattern(pattern: &str) -> Option<String> {
    let mut format = String::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\'' {
            if chars.peek() == Some(&'\'') {
                chars.next();
                format.push('\'');
                continue;
            }
            loop {
                match chars.next()? {
                    '\'' if chars.peek() == Some(&'\'') => {
                        chars.next();
                        format.push('\'');
                    }
                    '\'' => break,
                    literal => push_literal(&mut format, literal),
                }
            }
        } else if c.is_ascii_alphabetic() {
            let mut width = 1;
            while chars.peek() == Some(&c) {
                chars.next();
                width += 1;
            }
            format.push_str(specifier(c, width)?);
        } else {
            push_literal(&mut format, c);
        }
    }
    Some(format)
}

fn push_literal(format: &mut String, c: char) {
    if c == '%' {
        format.push_str("%%");
    } else {
        format.push(c);
    }
}

fn specifier(letter: char, width: usize) -> Option<&'static str> {
    Some(match (letter, width) {
        ('y' | 'Y' | 'u', 2) => "%y",
        ('y' | 'Y' | 'u', _) => "%Y",
        ('M', 1) => "%-m",
        ('M', 2) => "%m",
        ('M', 3) => "%b",
        ('M', _) => "%B",
        ('d', 1) => "%-d",
        ('d', 2) => "%d",
        ('D', _) => "%j",
        ('E', 1..=3) => "%a",
        ('E', _) => "%A",
        ('H', 1) => "%-H",
        ('H', 2) => "%H",
        ('h', 1) => "%-I",
        ('h', 2) => "%I",
        ('m', 1) => "%-M",
        ('m', 2) => "%M",
        ('s', 1) => "%-S",
        ('s', 2) => "%S",
        ('S', 3) => "%3f",
        ('S', 6) => "%6f",
        ('S', 9) => "%9f",
        ('a', 1) => "%p",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn last_read() -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2017, 6, 1)
            .unwrap()
            .and_hms_milli_opt(10, 20, 30, 123)
            .unwrap()
            .and_utc()
    }

    fn format(pattern: Option<&str>) -> String {
        AsOfFormatter::for_pattern(pattern)
            .unwrap()
            .format(last_read())
    }

    #[test]
    fn blank_patterns_are_iso_8601() {
        assert_eq!(format(None), "'2017-06-01T10:20:30.123'");
        assert_eq!(format(Some("  ")), "'2017-06-01T10:20:30.123'");
    }

    #[test]
    fn epoch_millis_are_unquoted() {
        assert_eq!(format(Some("L")), "1496312430123");
        assert_eq!(format(Some("l")), "1496312430123");
    }

    #[test]
    fn date_patterns_are_translated() {
        assert_eq!(format(Some("yyyy-MM-dd HH:mm:ss")), "'2017-06-01 10:20:30'");
        assert_eq!(format(Some("yyyy-MM-dd'T'HH:mm")), "'2017-06-01T10:20'");
        assert_eq!(format(Some("YYYY/MMM/d h:mm a")), "'2017/Jun/1 10:20 AM'");
        assert_eq!(format(Some("yyyyMMddHHmmssSSS")), "'20170601102030123'");
    }

    #[test]
    fn strftime_formats_are_accepted() {
        assert_eq!(format(Some("%Y/%m/%d")), "'2017/06/01'");
    }

    #[test]
    fn other_patterns_are_rejected() {
        for pattern in ["dd/MM/yyyy", "yyyy-MM-dd Q", "yyyy-MM-dd 'open", "%Q"] {
            assert_eq!(
                AsOfFormatter::for_pattern(Some(pattern)),
                Err(Error::UnsupportedPattern(pattern.to_string()))
            );
        }
        insta::assert_snapshot!(
            AsOfFormatter::for_pattern(Some("dd/MM/yyyy")).unwrap_err(),
            @"Cannot format AsOf for an unsupported pattern: dd/MM/yyyy!"
        );
    }
}
