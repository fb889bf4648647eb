//! Timestamp codec
//!
//! Parses a strict ISO-8601 UTC instant ("YYYY-MM-DDTHH:MM:SSZ", optionally
//! with fractional seconds) into microseconds since 2000-01-01T00:00:00Z,
//! the epoch the downstream store counts from.
//!
//! Date arithmetic is O(1): a precomputed table gives the cumulative count
//! of leap days since 2000 for every supported year, so no calendar walking
//! happens per message. Only "Z" offsets are accepted, and only years 2000
//! through 4027.

use thiserror::Error;

#[cfg(test)]
#[path = "timestamp_test.rs"]
mod tests;

/// Shortest accepted form: "YYYY-MM-DDTHH:MM:SSZ"
const MIN_LEN: usize = 20;

/// Longest accepted form: "YYYY-MM-DDTHH:MM:SS.ffffffZ" plus ignored
/// fraction digits, 31 bytes total
const MAX_LEN: usize = 31;

/// The downstream store keeps 6 fractional digits; the rest are truncated
const MAX_FRACTION_DIGITS: usize = 6;

/// First supported year (the epoch year)
const MIN_YEAR: u32 = 2000;

/// Last year the leap table covers usefully
const MAX_YEAR: u32 = 4027;

/// Seconds in a day / in a 365-day year
const SECS_PER_DAY: u64 = 86_400;
const SECS_PER_YEAR: u64 = 31_536_000;

/// Days per month, February in non-leap years
const MONTH_DAYS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Errors from the timestamp codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimestampError {
    /// Not in a supported ISO-8601 UTC form
    #[error("not a supported timestamp format")]
    Format,

    /// Year outside [2000, 4027]
    #[error("date out of range")]
    OutOfRange,

    /// A date or time field outside its valid range
    #[error("not a valid date or time")]
    Invalid,
}

/// Leap year by the proleptic Gregorian rule, over years offset from 2000
///
/// Correct on offsets because 2000 is divisible by 400.
const fn is_leap(y: u32) -> bool {
    (y % 4 == 0 && y % 100 != 0) || y % 400 == 0
}

/// Cumulative leap days in offset years [0, y), for every supported y
///
/// 2048 years ought to be enough.
const fn leap_prefix() -> [u32; 2048] {
    let mut table = [0u32; 2048];
    let mut acc = 0u32;
    let mut y = 0;
    while y < 2047 {
        if is_leap(y as u32) {
            acc += 1;
        }
        table[y + 1] = acc;
        y += 1;
    }
    table
}

/// Shared read-only by all timestamp needles
static LEAP_PREFIX: [u32; 2048] = leap_prefix();

/// Parse a fixed-width run of ASCII digits
fn digits(bytes: &[u8]) -> Result<u32, TimestampError> {
    let mut value = 0u32;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return Err(TimestampError::Format);
        }
        value = value * 10 + (b - b'0') as u32;
    }
    Ok(value)
}

/// Parse an ISO-8601 UTC instant into microseconds since 2000-01-01T00:00:00Z
///
/// Accepted forms, 20 to 31 bytes:
///
/// ```text
/// 2019-11-05T11:31:34Z
/// 2019-11-05T11:31:34.123456Z
/// ```
///
/// Fractional digits beyond the sixth are truncated, not rounded. A leap
/// second (":60") is accepted; the downstream store normalizes it. Month
/// lengths are only capped at 31 (29 for February): impossible dates like
/// April 31 pass through and are normalized downstream.
pub(crate) fn parse_timestamp(ts: &str) -> Result<u64, TimestampError> {
    let b = ts.as_bytes();
    let len = b.len();

    if !(MIN_LEN..=MAX_LEN).contains(&len) {
        return Err(TimestampError::Format);
    }

    if b[4] != b'-'
        || b[7] != b'-'
        || b[10] != b'T'
        || b[13] != b':'
        || b[16] != b':'
        || !(b[19] == b'.' || b[19] == b'Z')
        || b[len - 1] != b'Z'
    {
        return Err(TimestampError::Format);
    }

    let year = digits(&b[0..4])?;
    let month = digits(&b[5..7])?;
    let day = digits(&b[8..10])?;
    let hour = digits(&b[11..13])?;
    let minute = digits(&b[14..16])?;
    let second = digits(&b[17..19])?;

    let mut micro: u64 = 0;
    if b[19] == b'.' {
        let fraction = &b[20..len - 1];
        let take = fraction.len().min(MAX_FRACTION_DIGITS);
        for &d in &fraction[..take] {
            if !d.is_ascii_digit() {
                return Err(TimestampError::Format);
            }
            micro = micro * 10 + (d - b'0') as u64;
        }
        // missing digits are zeros
        for _ in take..MAX_FRACTION_DIGITS {
            micro *= 10;
        }
    }

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(TimestampError::OutOfRange);
    }
    // leap seconds are accepted and normalized downstream
    if !(1..=12).contains(&month)
        || !(1..=31).contains(&day)
        || hour > 23
        || minute > 59
        || second > 60
    {
        return Err(TimestampError::Invalid);
    }
    if month == 2 && day > 29 {
        return Err(TimestampError::Invalid);
    }

    // the downstream epoch starts at 2000-01-01
    let y = year - MIN_YEAR;

    // 1-indexed day of year
    let mut yday = day;
    for m in 0..(month - 1) as usize {
        yday += MONTH_DAYS[m];
        if m == 1 && is_leap(y) {
            yday += 1;
        }
    }

    let epoch_s = second as u64
        + 60 * minute as u64
        + 3_600 * hour as u64
        + SECS_PER_DAY * (yday - 1) as u64
        + SECS_PER_DAY * LEAP_PREFIX[y as usize] as u64
        + SECS_PER_YEAR * y as u64;

    Ok(epoch_s * 1_000_000 + micro)
}

/// Encode an ISO-8601 UTC instant as the 8-byte big-endian field payload
pub(crate) fn encode_timestamp(ts: &str) -> Result<[u8; 8], TimestampError> {
    parse_timestamp(ts).map(u64::to_be_bytes)
}
