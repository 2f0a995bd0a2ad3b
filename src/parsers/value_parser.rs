//! Stateless converters from a raw report value to a field's type.
//!
//! Every function takes the value already trimmed by the line splitter.

use crate::errors::ValueError;
use crate::parsers::duration_grammar;
use chrono::{DateTime, FixedOffset};
use std::time::Duration;

/// Timestamp layout used by the daemon, e.g. `2023-01-15 08:30:00 -0500`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Reported by the daemon for timestamps it does not have.
pub const UNAVAILABLE: &str = "N/A";

/// Reported for the alarm delay when alarms are disabled.
pub const NO_ALARM: &str = "No alarm";

// Returns the part of a value before its unit token, e.g. "241.0" for "241.0 Volts".
fn leading_token(value: &str) -> &str {
    value.split(' ').next().unwrap_or(value)
}

pub fn parse_text(value: &str) -> Result<String, ValueError> {
    Ok(value.to_string())
}

/// Parses a real number, discarding any trailing unit token.
pub fn parse_number(value: &str) -> Result<f64, ValueError> {
    let number = leading_token(value);
    number
        .parse::<f64>()
        .map_err(|e| ValueError::NumericFormat {
            value: value.to_string(),
            source: e,
        })
}

pub fn parse_integer(value: &str) -> Result<i64, ValueError> {
    value.parse::<i64>().map_err(|e| ValueError::IntegerFormat {
        value: value.to_string(),
        source: e,
    })
}

/// Integer counterpart of [`parse_number`], e.g. `"865 Watts"` -> 865.
pub fn parse_unit_integer(value: &str) -> Result<i64, ValueError> {
    leading_token(value)
        .parse::<i64>()
        .map_err(|e| ValueError::IntegerFormat {
            value: value.to_string(),
            source: e,
        })
}

/// `YES` is true, anything else is false.
pub fn parse_flag(value: &str) -> Result<bool, ValueError> {
    Ok(value == "YES")
}

/// Parses a timestamp in [`TIMESTAMP_FORMAT`], keeping the reported UTC offset.
///
/// [`UNAVAILABLE`] maps to `None`. A `None` field therefore means either that
/// the key never appeared or that the daemon reported it as unavailable; the
/// two cases are not distinguished.
pub fn parse_timestamp(value: &str) -> Result<Option<DateTime<FixedOffset>>, ValueError> {
    if value == UNAVAILABLE {
        return Ok(None);
    }

    let time_format_error = |source: Option<chrono::ParseError>| ValueError::TimeFormat {
        value: value.to_string(),
        format: TIMESTAMP_FORMAT,
        source,
    };

    if !has_timestamp_shape(value) {
        return Err(time_format_error(None));
    }

    DateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map(Some)
        .map_err(|e| time_format_error(Some(e)))
}

// chrono accepts single-digit fields, signed years, `+hh:mm` offsets and any
// run of whitespace for a format space, so the exact layout
// `YYYY-MM-DD HH:MM:SS ±ZZZZ` is checked byte by byte first.
fn has_timestamp_shape(value: &str) -> bool {
    const SHAPE: &[u8] = b"dddd-dd-dd dd:dd:dd sdddd";

    let bytes = value.as_bytes();
    bytes.len() == SHAPE.len()
        && bytes.iter().zip(SHAPE).all(|(b, expected)| match expected {
            b'd' => b.is_ascii_digit(),
            b's' => *b == b'+' || *b == b'-',
            _ => b == expected,
        })
}

/// Parses a `"<number> <unit>"` duration such as `"5 Minutes"` or `"30 Seconds"`.
///
/// Only `minutes` and `seconds` (any case) are rewritten to their compact
/// suffixes. Other unit words are handed to the compact grammar unchanged, so
/// `"2 h"` works while `"2 Hours"` does not.
pub fn parse_duration(value: &str) -> Result<Duration, ValueError> {
    let (number, unit) = value
        .split_once(' ')
        .ok_or_else(|| ValueError::duration(value, "expected '<number> <unit>'"))?;

    let unit = match unit.to_lowercase().as_str() {
        "minutes" => "m",
        "seconds" => "s",
        _ => unit,
    };

    duration_grammar::parse_compact(&format!("{}{}", number, unit))
        .map_err(|reason| ValueError::duration(value, reason))
}

/// Alarm delay: like [`parse_duration`], but [`NO_ALARM`] is a zero delay.
pub fn parse_alarm_delay(value: &str) -> Result<Duration, ValueError> {
    if value == NO_ALARM {
        return Ok(Duration::ZERO);
    }
    parse_duration(value)
}
