//! Compact duration grammar, e.g. `"90s"`, `"1.5m"`, `"1h30m"`, `"250ms"`.
//!
//! Accepted form: `[-+]?([0-9]*(\.[0-9]*)?[a-zµμ]+)+`, or a bare `"0"`.
//! Units: `ns`, `us`, `µs`, `μs`, `ms`, `s`, `m`, `h`.

use std::time::Duration;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;

// Fraction digits beyond this scale cannot change the result at nanosecond resolution.
const MAX_FRACTION_SCALE: u128 = 1_000_000_000_000_000_000;

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(NANOS_PER_MINUTE),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

/// Parses a compact duration string. The error is a short human-readable reason.
///
/// A leading `-` is only accepted for a zero result: signed durations such as
/// `-5m` are valid in the usual Go-style grammar but are rejected here because
/// [`Duration`] is unsigned. `-0` and `-0s` parse as zero.
pub fn parse_compact(input: &str) -> Result<Duration, String> {
    let mut rest = input;
    let mut negative = false;
    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err("empty duration".to_string());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (segment, tail) = parse_segment(rest)?;
        total = total
            .checked_add(segment)
            .ok_or_else(|| "duration out of range".to_string())?;
        rest = tail;
    }

    if total > u128::from(u64::MAX) {
        return Err("duration out of range".to_string());
    }
    if negative && total != 0 {
        return Err("negative durations are not supported".to_string());
    }
    Ok(Duration::from_nanos(total as u64))
}

/// Consumes one `<decimal><unit>` segment, returning its length in
/// nanoseconds and the unconsumed tail.
fn parse_segment(input: &str) -> Result<(u128, &str), String> {
    let bytes = input.as_bytes();
    if !(bytes[0] == b'.' || bytes[0].is_ascii_digit()) {
        return Err(format!("expected a number at {:?}", input));
    }

    let int_len = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    let mut whole: u128 = 0;
    for b in &bytes[..int_len] {
        whole = whole
            .checked_mul(10)
            .and_then(|v| v.checked_add(u128::from(b - b'0')))
            .ok_or_else(|| "duration out of range".to_string())?;
    }
    let mut pos = int_len;

    let mut fraction: u128 = 0;
    let mut scale: u128 = 1;
    let mut fraction_len = 0;
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        fraction_len = bytes[pos..].iter().take_while(|b| b.is_ascii_digit()).count();
        for b in &bytes[pos..pos + fraction_len] {
            if scale < MAX_FRACTION_SCALE {
                fraction = fraction * 10 + u128::from(b - b'0');
                scale *= 10;
            }
        }
        pos += fraction_len;
    }
    if int_len == 0 && fraction_len == 0 {
        return Err(format!("expected digits at {:?}", input));
    }

    let tail = &input[pos..];
    let unit_len = tail
        .find(|c: char| c == '.' || c.is_ascii_digit())
        .unwrap_or(tail.len());
    if unit_len == 0 {
        return Err(format!("missing unit in duration {:?}", input));
    }
    let unit = &tail[..unit_len];
    let per_unit = unit_nanos(unit).ok_or_else(|| format!("unknown unit {:?}", unit))?;

    let nanos = whole
        .checked_mul(per_unit)
        .and_then(|v| v.checked_add(fraction * per_unit / scale))
        .ok_or_else(|| "duration out of range".to_string())?;
    Ok((nanos, &tail[unit_len..]))
}
