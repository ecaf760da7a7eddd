//! ATTRMAP - String Coercion Utilities
//! Converts stored string values into scalar types.
//!
//! Two layers:
//! - **Strict** (`parse_*`): returns `Result<_, ConvertError>` and reports
//!   exactly why an input was rejected.
//! - **Lenient** (`to_*`): wraps the strict layer and maps every failure to
//!   the target type's zero value. This is the documented contract used by
//!   the map's typed getters: `to_i64("abc") == 0`, never an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::time::Duration;

use crate::error::{ConvertError, Result};

/// Tokens recognized as `true`, compared case-insensitively after trimming.
/// Everything outside this set is falsy (including numeric strings like "10").
pub const TRUTHY_TOKENS: [&str; 5] = ["1", "t", "true", "on", "yes"];

/// Tokens recognized as `false` by the strict parser.
const FALSY_TOKENS: [&str; 6] = ["", "0", "f", "false", "off", "no"];

/// Fallback formats tried by [`parse_time`] when no explicit format is given.
const TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d"];

// =============================================================================
// Strict layer
// =============================================================================

/// Parse a boolean token.
/// Accepts the truthy set and the falsy set; anything else is an error.
pub fn parse_bool(s: &str) -> Result<bool> {
    let t = s.trim().to_ascii_lowercase();
    if TRUTHY_TOKENS.contains(&t.as_str()) {
        Ok(true)
    } else if FALSY_TOKENS.contains(&t.as_str()) {
        Ok(false)
    } else {
        Err(ConvertError::InvalidBool(s.to_string()))
    }
}

/// Parse a signed 64-bit integer.
/// Falls back to parsing as `f64` and truncating toward zero, so "10.5"
/// parses as 10.
pub fn parse_i64(s: &str) -> Result<i64> {
    let t = s.trim();
    if let Ok(n) = t.parse::<i64>() {
        return Ok(n);
    }
    let f = t
        .parse::<f64>()
        .map_err(|_| ConvertError::InvalidNumber(s.to_string()))?;
    if !f.is_finite() || f <= (i64::MIN as f64) - 1.0 || f >= (i64::MAX as f64) + 1.0 {
        return Err(ConvertError::OutOfRange(s.to_string()));
    }
    Ok(f.trunc() as i64)
}

/// Parse an unsigned 64-bit integer, with the same float fallback as
/// [`parse_i64`]. Negative input is out of range.
pub fn parse_u64(s: &str) -> Result<u64> {
    let t = s.trim();
    if let Ok(n) = t.parse::<u64>() {
        return Ok(n);
    }
    let f = t
        .parse::<f64>()
        .map_err(|_| ConvertError::InvalidNumber(s.to_string()))?;
    if !f.is_finite() || f <= -1.0 || f >= (u64::MAX as f64) + 1.0 {
        return Err(ConvertError::OutOfRange(s.to_string()));
    }
    Ok(f.trunc() as u64)
}

/// Parse a 64-bit float.
pub fn parse_f64(s: &str) -> Result<f64> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| ConvertError::InvalidNumber(s.to_string()))
}

/// Parse a timestamp.
///
/// With an explicit chrono `%`-style format the input is tried as a
/// datetime, then as a bare date (midnight). Without a format the input is
/// tried as RFC 3339, then `"%Y-%m-%d %H:%M:%S"`, then `"%Y-%m-%d"`, then
/// as integer Unix seconds. All results are UTC.
pub fn parse_time(s: &str, format: Option<&str>) -> Result<DateTime<Utc>> {
    let t = s.trim();
    if let Some(fmt) = format {
        if let Ok(dt) = NaiveDateTime::parse_from_str(t, fmt) {
            return Ok(Utc.from_utc_datetime(&dt));
        }
        if let Ok(d) = NaiveDate::parse_from_str(t, fmt) {
            if let Some(dt) = d.and_hms_opt(0, 0, 0) {
                return Ok(Utc.from_utc_datetime(&dt));
            }
        }
        return Err(ConvertError::InvalidTimestamp(s.to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(t, fmt) {
            return Ok(Utc.from_utc_datetime(&dt));
        }
        if let Ok(d) = NaiveDate::parse_from_str(t, fmt) {
            if let Some(dt) = d.and_hms_opt(0, 0, 0) {
                return Ok(Utc.from_utc_datetime(&dt));
            }
        }
    }
    if let Ok(secs) = t.parse::<i64>() {
        if let Some(dt) = DateTime::from_timestamp(secs, 0) {
            return Ok(dt);
        }
    }
    Err(ConvertError::InvalidTimestamp(s.to_string()))
}

/// Parse a duration.
///
/// Accepts humantime syntax ("1h 30m", "250ms"); a bare integer is taken as
/// nanoseconds, matching the base unit of the source data model.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let t = s.trim();
    if let Ok(d) = humantime::parse_duration(t) {
        return Ok(d);
    }
    if let Ok(nanos) = t.parse::<u64>() {
        return Ok(Duration::from_nanos(nanos));
    }
    Err(ConvertError::InvalidDuration(s.to_string()))
}

// =============================================================================
// Lenient layer (try-convert-or-zero)
// =============================================================================

/// True iff the trimmed, lowercased input is one of [`TRUTHY_TOKENS`].
/// Everything else is false; this function cannot fail.
pub fn to_bool(s: &str) -> bool {
    let t = s.trim().to_ascii_lowercase();
    TRUTHY_TOKENS.contains(&t.as_str())
}

/// Convert to `i64`, or 0 when the input is not numeric.
pub fn to_i64(s: &str) -> i64 {
    parse_i64(s).unwrap_or(0)
}

/// Convert to `i32`, or 0 when not numeric or out of range.
pub fn to_i32(s: &str) -> i32 {
    narrow_i64(to_checked_i64(s), i32::MIN as i64, i32::MAX as i64) as i32
}

/// Convert to `i16`, or 0 when not numeric or out of range.
pub fn to_i16(s: &str) -> i16 {
    narrow_i64(to_checked_i64(s), i16::MIN as i64, i16::MAX as i64) as i16
}

/// Convert to `i8`, or 0 when not numeric or out of range.
pub fn to_i8(s: &str) -> i8 {
    narrow_i64(to_checked_i64(s), i8::MIN as i64, i8::MAX as i64) as i8
}

/// Convert to `u64`, or 0 when not numeric or negative.
pub fn to_u64(s: &str) -> u64 {
    parse_u64(s).unwrap_or(0)
}

/// Convert to `u32`, or 0 when not numeric or out of range.
pub fn to_u32(s: &str) -> u32 {
    narrow_u64(parse_u64(s).ok(), u32::MAX as u64) as u32
}

/// Convert to `u16`, or 0 when not numeric or out of range.
pub fn to_u16(s: &str) -> u16 {
    narrow_u64(parse_u64(s).ok(), u16::MAX as u64) as u16
}

/// Convert to `u8`, or 0 when not numeric or out of range.
pub fn to_u8(s: &str) -> u8 {
    narrow_u64(parse_u64(s).ok(), u8::MAX as u64) as u8
}

/// Convert to `f64`, or 0.0 when not numeric.
pub fn to_f64(s: &str) -> f64 {
    parse_f64(s).unwrap_or(0.0)
}

/// Convert to `f32`, or 0.0 when not numeric.
pub fn to_f32(s: &str) -> f32 {
    parse_f64(s).unwrap_or(0.0) as f32
}

/// Convert to a UTC timestamp, or the Unix epoch when unparseable.
pub fn to_time(s: &str, format: Option<&str>) -> DateTime<Utc> {
    parse_time(s, format).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Convert to a duration, or `Duration::ZERO` when unparseable.
pub fn to_duration(s: &str) -> Duration {
    parse_duration(s).unwrap_or(Duration::ZERO)
}

fn to_checked_i64(s: &str) -> Option<i64> {
    parse_i64(s).ok()
}

fn narrow_i64(n: Option<i64>, min: i64, max: i64) -> i64 {
    match n {
        Some(v) if v >= min && v <= max => v,
        _ => 0,
    }
}

fn narrow_u64(n: Option<u64>, max: u64) -> u64 {
    match n {
        Some(v) if v <= max => v,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_truthy_set() {
        for token in ["1", "t", "true", "on", "yes", "TRUE", " True "] {
            assert!(to_bool(token), "{token:?} should be truthy");
        }
        for token in ["", "0", "false", "off", "no", "10", "abc", "2"] {
            assert!(!to_bool(token), "{token:?} should be falsy");
        }
    }

    #[test]
    fn test_parse_bool_strict_rejects_junk() {
        assert_eq!(parse_bool("yes"), Ok(true));
        assert_eq!(parse_bool("off"), Ok(false));
        assert!(parse_bool("10").is_err());
    }

    #[test]
    fn test_integer_coercion() {
        assert_eq!(to_i64("42"), 42);
        assert_eq!(to_i64("-7"), -7);
        assert_eq!(to_i64("  13  "), 13);
        assert_eq!(to_i64("abc"), 0);
        assert_eq!(to_i64(""), 0);
    }

    #[test]
    fn test_float_fallback_truncates_toward_zero() {
        assert_eq!(to_i64("10.5"), 10);
        assert_eq!(to_i64("-10.5"), -10);
        assert_eq!(to_u64("3.9"), 3);
    }

    #[test]
    fn test_narrow_widths_reject_overflow() {
        assert_eq!(to_i8("127"), 127);
        assert_eq!(to_i8("128"), 0);
        assert_eq!(to_i8("-128"), -128);
        assert_eq!(to_u8("255"), 255);
        assert_eq!(to_u8("256"), 0);
        assert_eq!(to_u16("70000"), 0);
        assert_eq!(to_i16("-40000"), 0);
        assert_eq!(to_i32("2147483648"), 0);
        assert_eq!(to_u32("4294967295"), u32::MAX);
    }

    #[test]
    fn test_unsigned_rejects_negative() {
        assert_eq!(to_u64("-1"), 0);
        assert!(parse_u64("-1").is_err());
    }

    #[test]
    fn test_float_coercion() {
        assert_eq!(to_f64("2.5"), 2.5);
        assert_eq!(to_f32("2.5"), 2.5_f32);
        assert_eq!(to_f64("junk"), 0.0);
    }

    #[test]
    fn test_time_rfc3339() {
        let dt = to_time("2024-03-01T12:30:00Z", None);
        assert_eq!(dt.timestamp(), 1_709_296_200);
    }

    #[test]
    fn test_time_common_formats() {
        let dt = to_time("2024-03-01 12:30:00", None);
        assert_eq!(dt.timestamp(), 1_709_296_200);

        let midnight = to_time("2024-03-01", None);
        assert_eq!(midnight.timestamp(), 1_709_251_200);
    }

    #[test]
    fn test_time_explicit_format() {
        let dt = to_time("01/03/2024 12:30", Some("%d/%m/%Y %H:%M"));
        assert_eq!(dt.timestamp(), 1_709_296_200);

        // Bare date with an explicit date format resolves to midnight.
        let d = to_time("01/03/2024", Some("%d/%m/%Y"));
        assert_eq!(d.timestamp(), 1_709_251_200);
    }

    #[test]
    fn test_time_unix_seconds() {
        let dt = to_time("1709296200", None);
        assert_eq!(dt.timestamp(), 1_709_296_200);
    }

    #[test]
    fn test_time_invalid_is_epoch() {
        assert_eq!(to_time("not a date", None), DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(
            to_time("2024-03-01", Some("%H:%M:%S")),
            DateTime::<Utc>::UNIX_EPOCH
        );
    }

    #[test]
    fn test_duration_humantime() {
        assert_eq!(to_duration("1h 30m"), Duration::from_secs(5400));
        assert_eq!(to_duration("250ms"), Duration::from_millis(250));
    }

    #[test]
    fn test_duration_bare_integer_is_nanos() {
        assert_eq!(to_duration("1500"), Duration::from_nanos(1500));
    }

    #[test]
    fn test_duration_invalid_is_zero() {
        assert_eq!(to_duration("soon"), Duration::ZERO);
        assert_eq!(to_duration("-5s"), Duration::ZERO);
    }
}
