//! Polars AnyValue utility functions.
//!
//! This module provides the single set of coercion rules used after load:
//! text rendering for search and export, and numeric coercion for sums.

use chrono::{DateTime, NaiveDateTime, NaiveTime};
use polars::prelude::{AnyValue, TimeUnit};

/// Converts a Polars AnyValue to a String representation.
/// Returns empty string for Null, properly formats numeric and temporal types.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => format_bool(b),
        AnyValue::Datetime(v, unit, _) => match datetime_from_timestamp(v, unit) {
            Some(dt) => format_datetime(dt),
            None => v.to_string(),
        },
        other => other.to_string(),
    }
}

/// Converts AnyValue to text, returning None for nulls.
pub fn any_to_text(value: AnyValue<'_>) -> Option<String> {
    if matches!(value, AnyValue::Null) {
        None
    } else {
        Some(any_to_string(value))
    }
}

/// Formats a floating-point number as a string without trailing zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

pub fn format_bool(value: bool) -> String {
    if value { "True" } else { "False" }.to_string()
}

/// Formats a date-time as `YYYY-MM-DD`, adding `HH:MM:SS` when not midnight.
pub fn format_datetime(value: NaiveDateTime) -> String {
    if value.time() == NaiveTime::MIN {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Converts a polars datetime physical value to a naive date-time.
pub fn datetime_from_timestamp(value: i64, unit: TimeUnit) -> Option<NaiveDateTime> {
    let millis = match unit {
        TimeUnit::Nanoseconds => value.div_euclid(1_000_000),
        TimeUnit::Microseconds => value.div_euclid(1_000),
        TimeUnit::Milliseconds => value,
    };
    DateTime::from_timestamp_millis(millis).map(|dt| dt.naive_utc())
}

/// Converts an AnyValue to f64, returning None for non-numeric or null values.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::String(s) => parse_amount(s),
        AnyValue::StringOwned(s) => parse_amount(&s),
        _ => None,
    }
}

/// Parses a string as f64, returning None for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    if value.trim().is_empty() {
        return None;
    }
    value.trim().parse::<f64>().ok()
}

/// Parses a monetary amount such as `¥1,200` or `1,200.5`.
///
/// Strips a leading yen sign and thousands separators before parsing.
/// Non-finite results are rejected.
pub fn parse_amount(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let unsigned = trimmed
        .strip_prefix('¥')
        .or_else(|| trimmed.strip_prefix('￥'))
        .unwrap_or(trimmed);
    let cleaned: String = unsigned.chars().filter(|ch| *ch != ',').collect();
    parse_f64(&cleaned).filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_numeric() {
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(1.50), "1.5");
        assert_eq!(format_numeric(-0.25), "-0.25");
        assert_eq!(format_numeric(0.0), "0");
    }

    #[test]
    fn test_any_to_string() {
        assert_eq!(any_to_string(AnyValue::Null), "");
        assert_eq!(any_to_string(AnyValue::Float64(1200.0)), "1200");
        assert_eq!(any_to_string(AnyValue::Int64(7)), "7");
        assert_eq!(any_to_string(AnyValue::String("完了")), "完了");
        assert_eq!(any_to_string(AnyValue::Boolean(true)), "True");
        assert!(any_to_text(AnyValue::Null).is_none());
        assert_eq!(any_to_text(AnyValue::String("")), Some(String::new()));
    }

    #[test]
    fn test_datetime_rendering() {
        let midnight = NaiveDate::from_ymd_opt(2024, 4, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let afternoon = NaiveDate::from_ymd_opt(2024, 4, 1)
            .unwrap()
            .and_hms_opt(13, 5, 9)
            .unwrap();
        assert_eq!(format_datetime(midnight), "2024-04-01");
        assert_eq!(format_datetime(afternoon), "2024-04-01 13:05:09");

        let millis = afternoon.and_utc().timestamp_millis();
        assert_eq!(
            datetime_from_timestamp(millis, TimeUnit::Milliseconds),
            Some(afternoon)
        );
        assert_eq!(
            datetime_from_timestamp(millis * 1_000, TimeUnit::Microseconds),
            Some(afternoon)
        );
    }

    #[test]
    fn test_amount_coercion() {
        assert_eq!(parse_amount("¥1,200"), Some(1200.0));
        assert_eq!(parse_amount("￥3,000.5"), Some(3000.5));
        assert_eq!(parse_amount(" 42 "), Some(42.0));
        assert_eq!(parse_amount("未定"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(any_to_f64(AnyValue::String("1,000")), Some(1000.0));
        assert_eq!(any_to_f64(AnyValue::Boolean(true)), None);
    }
}
