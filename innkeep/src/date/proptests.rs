//! Property-based tests for the calendar date codec.

use super::{format_date, parse_date, ToCalendarDate};
use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;

// Any real day with a four-digit year
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1i32..=9999, 1u32..=12, 1u32..=31)
        .prop_filter_map("not a calendar day", |(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // format then parse is lossless at day granularity
    #[test]
    fn format_parse_roundtrip(date in date_strategy()) {
        let text = format_date(date);
        prop_assert_eq!(parse_date(&text).unwrap(), date);
    }

    // The storage form is always exactly ten characters
    #[test]
    fn formatted_length_is_fixed(date in date_strategy()) {
        prop_assert_eq!(format_date(date).len(), 10);
    }

    // Local midnight timestamps land on the same day
    #[test]
    fn naive_midnight_timestamp_keeps_day(date in date_strategy()) {
        let text = format!("{}T00:00:00", format_date(date));
        prop_assert_eq!(parse_date(&text).unwrap(), date);
    }

    // Native dates are never altered
    #[test]
    fn native_dates_pass_through(date in date_strategy()) {
        let converted = date.to_calendar_date().unwrap();
        prop_assert_eq!(converted.year(), date.year());
        prop_assert_eq!(converted.ordinal(), date.ordinal());
    }

    // Out-of-range day numbers are rejected rather than rolled over
    #[test]
    fn overflowing_days_are_rejected(year in 1i32..=9999, month in 1u32..=12, day in 32u32..=99) {
        let text = format!("{year:04}-{month:02}-{day:02}");
        prop_assert!(parse_date(&text).is_err());
    }
}
