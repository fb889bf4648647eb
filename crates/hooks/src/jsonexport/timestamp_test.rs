//! Tests for the timestamp codec

use super::*;

const US_PER_DAY: u64 = 86_400 * 1_000_000;

#[test]
fn test_epoch_start_is_zero() {
    assert_eq!(parse_timestamp("2000-01-01T00:00:00Z"), Ok(0));
}

#[test]
fn test_encode_is_big_endian() {
    assert_eq!(
        encode_timestamp("2000-01-01T00:00:00.000001Z"),
        Ok([0, 0, 0, 0, 0, 0, 0, 1])
    );
}

#[test]
fn test_time_components() {
    assert_eq!(parse_timestamp("2000-01-01T00:00:01Z"), Ok(1_000_000));
    assert_eq!(parse_timestamp("2000-01-01T00:01:00Z"), Ok(60_000_000));
    assert_eq!(parse_timestamp("2000-01-01T01:00:00Z"), Ok(3_600_000_000));
    assert_eq!(parse_timestamp("2000-01-02T00:00:00Z"), Ok(US_PER_DAY));
}

#[test]
fn test_known_instant() {
    // 2019-11-05T11:31:34Z is unix 1572953494; the store's epoch starts
    // 946684800 seconds after unix zero
    assert_eq!(
        parse_timestamp("2019-11-05T11:31:34Z"),
        Ok((1_572_953_494 - 946_684_800) * 1_000_000)
    );
}

#[test]
fn test_leap_day_counted() {
    // 2000 is a leap year: March 1st is day 61
    assert_eq!(parse_timestamp("2000-03-01T00:00:00Z"), Ok(60 * US_PER_DAY));
    // 2001 is not: March 1st is day 60
    let us_2001 = parse_timestamp("2001-01-01T00:00:00Z").unwrap();
    assert_eq!(
        parse_timestamp("2001-03-01T00:00:00Z"),
        Ok(us_2001 + 59 * US_PER_DAY)
    );
}

#[test]
fn test_year_2001_includes_leap_2000() {
    // 366 days elapsed in 2000
    assert_eq!(parse_timestamp("2001-01-01T00:00:00Z"), Ok(366 * US_PER_DAY));
}

#[test]
fn test_century_rule() {
    // 2100 is not a leap year, 2400 is
    let feb28_2100 = parse_timestamp("2100-02-28T00:00:00Z").unwrap();
    let mar1_2100 = parse_timestamp("2100-03-01T00:00:00Z").unwrap();
    assert_eq!(mar1_2100 - feb28_2100, US_PER_DAY);

    let feb28_2400 = parse_timestamp("2400-02-28T00:00:00Z").unwrap();
    let mar1_2400 = parse_timestamp("2400-03-01T00:00:00Z").unwrap();
    assert_eq!(mar1_2400 - feb28_2400, 2 * US_PER_DAY);
}

// ============================================================================
// Fractional seconds
// ============================================================================

#[test]
fn test_fraction_parsed() {
    assert_eq!(parse_timestamp("2000-01-01T00:00:00.000001Z"), Ok(1));
    assert_eq!(parse_timestamp("2000-01-01T00:00:00.123456Z"), Ok(123_456));
}

#[test]
fn test_short_fraction_padded_with_zeros() {
    assert_eq!(parse_timestamp("2000-01-01T00:00:00.1Z"), Ok(100_000));
    assert_eq!(parse_timestamp("2000-01-01T00:00:00.123Z"), Ok(123_000));
}

#[test]
fn test_long_fraction_truncated_not_rounded() {
    assert_eq!(parse_timestamp("2000-01-01T00:00:00.123456789Z"), Ok(123_456));
    assert_eq!(parse_timestamp("2000-01-01T00:00:00.9999999Z"), Ok(999_999));
}

#[test]
fn test_digits_beyond_sixth_not_validated() {
    // only the first six fraction digits are consumed
    assert_eq!(parse_timestamp("2000-01-01T00:00:00.123456xxZ"), Ok(123_456));
}

#[test]
fn test_dot_with_no_digits() {
    assert_eq!(parse_timestamp("2000-01-01T00:00:00.Z"), Ok(0));
}

#[test]
fn test_nondigit_fraction_rejected() {
    assert_eq!(
        parse_timestamp("2000-01-01T00:00:00.12abZ"),
        Err(TimestampError::Format)
    );
}

// ============================================================================
// Format rejection
// ============================================================================

#[test]
fn test_length_bounds() {
    // 19 bytes: missing Z
    assert_eq!(
        parse_timestamp("2000-01-01T00:00:00"),
        Err(TimestampError::Format)
    );
    // 32 bytes: one fraction digit too many
    assert_eq!(
        parse_timestamp("2000-01-01T00:00:00.1234567890xZ"),
        Err(TimestampError::Format)
    );
}

#[test]
fn test_punctuation_enforced() {
    for bad in [
        "2000/01/01T00:00:00Z",
        "2000-01-01 00:00:00Z",
        "2000-01-01T00.00.00Z",
        "2000-01-01T00:00:00z",
        "2000-01-01T00:00:00+00:00",
        "2000-01-01T00:00:00.123456+0",
    ] {
        assert_eq!(parse_timestamp(bad), Err(TimestampError::Format), "{bad}");
    }
}

#[test]
fn test_nondigit_fields_rejected() {
    assert_eq!(
        parse_timestamp("20x0-01-01T00:00:00Z"),
        Err(TimestampError::Format)
    );
    assert_eq!(
        parse_timestamp("2000-01-01T0a:00:00Z"),
        Err(TimestampError::Format)
    );
}

// ============================================================================
// Range checks
// ============================================================================

#[test]
fn test_year_range() {
    assert_eq!(
        parse_timestamp("1999-12-31T23:59:59Z"),
        Err(TimestampError::OutOfRange)
    );
    assert_eq!(
        parse_timestamp("4028-01-01T00:00:00Z"),
        Err(TimestampError::OutOfRange)
    );
    // boundaries are inclusive
    assert!(parse_timestamp("2000-01-01T00:00:00Z").is_ok());
    assert!(parse_timestamp("4027-12-31T23:59:59.999999Z").is_ok());
}

#[test]
fn test_field_ranges() {
    for bad in [
        "2000-00-01T00:00:00Z", // month 0
        "2000-13-01T00:00:00Z", // month 13
        "2000-01-00T00:00:00Z", // day 0
        "2000-01-32T00:00:00Z", // day 32
        "2000-01-01T24:00:00Z", // hour 24
        "2000-01-01T00:60:00Z", // minute 60
        "2000-01-01T00:00:61Z", // second 61
        "2000-02-30T00:00:00Z", // February 30th
    ] {
        assert_eq!(parse_timestamp(bad), Err(TimestampError::Invalid), "{bad}");
    }
}

#[test]
fn test_leap_second_accepted() {
    // normalized into the next minute downstream
    assert_eq!(parse_timestamp("2000-01-01T00:00:60Z"), Ok(60_000_000));
}

#[test]
fn test_month_lengths_not_enforced_beyond_cap() {
    // April 31st passes through; the store normalizes it
    assert!(parse_timestamp("2000-04-31T00:00:00Z").is_ok());
}

#[test]
fn test_february_29_accepted_every_year() {
    // even in non-leap years; lands on March 1st downstream
    assert!(parse_timestamp("2000-02-29T00:00:00Z").is_ok());
    assert!(parse_timestamp("2001-02-29T00:00:00Z").is_ok());

    let feb29_2001 = parse_timestamp("2001-02-29T00:00:00Z").unwrap();
    let mar1_2001 = parse_timestamp("2001-03-01T00:00:00Z").unwrap();
    assert_eq!(feb29_2001, mar1_2001);
}
