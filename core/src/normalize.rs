//! Coercion rules applied to loosely typed backend fields.
//!
//! The backend is inconsistent about scalar encodings: flags arrive as `1`,
//! `"1"` or `true`, amounts as numbers or decimal strings, timestamps in more
//! than one layout. Every DTO goes through these functions so a given field
//! kind is normalized the same way wherever it appears.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Rendered by [`format_date`] when the input is not a recognizable date.
pub const INVALID_DATE: &str = "Invalid Date";

/// A boolean-like field is set only for `true`, the number 1, or the string
/// `"1"`. Everything else, including `"true"` and `"yes"`, is unset.
pub fn is_truthy_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() == Some(1.0),
        Value::String(s) => s == "1",
        _ => false,
    }
}

/// Whether a nested value counts as present: null, `false`, zero and the
/// empty string do not.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Parse an amount-like field. Never fails: anything that is not a number or
/// a numeric string becomes NaN.
pub fn parse_amount(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// Render a stored date or timestamp as `YYYY-MM-DD`.
///
/// Accepts RFC 3339 (`2024-03-05T10:00:00.000000Z`), SQL timestamps
/// (`2024-03-05 10:00:00`) and plain dates. The calendar date is taken as
/// written; no timezone conversion happens.
pub fn format_date(raw: &str) -> String {
    parse_date(raw)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for layout in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, layout) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
