//! Calendar date codec.
//!
//! Reservations carry calendar dates: a local year, month and day with no
//! time-of-day and no zone. Every date that crosses the persistence boundary
//! or the form is converted with the helpers here, never through an instant.
//! Parsing a bare `YYYY-MM-DD` as a timestamp would place it at UTC midnight
//! and show the previous day in zones west of UTC, so the bare form is always
//! built from its components.

use std::ops::RangeInclusive;
use std::sync::OnceLock;

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone};
use regex::Regex;

use crate::error::{Error, Result};

/// Naive timestamp layouts accepted by [`parse_date`], read as local time.
const NAIVE_TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Years the four-digit `YYYY-MM-DD` form can carry.
pub const STORABLE_YEARS: RangeInclusive<i32> = 0..=9999;

fn bare_date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("bare date pattern is valid")
    })
}

/// Formats a calendar date as `YYYY-MM-DD`.
///
/// This is both the storage/wire form and the form shown in edit fields.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use innkeep::date::format_date;
///
/// let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// assert_eq!(format_date(date), "2024-06-01");
/// ```
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// True if `date` survives [`format_date`] followed by [`parse_date`].
///
/// ```
/// use chrono::NaiveDate;
/// use innkeep::date::is_storable;
///
/// assert!(is_storable(NaiveDate::from_ymd_opt(9999, 12, 31).unwrap()));
/// assert!(!is_storable(NaiveDate::from_ymd_opt(10000, 1, 1).unwrap()));
/// ```
#[must_use]
pub fn is_storable(date: NaiveDate) -> bool {
    STORABLE_YEARS.contains(&date.year())
}

/// Passes `date` through if [`is_storable`] holds.
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] for a year outside [`STORABLE_YEARS`].
pub fn ensure_storable(date: NaiveDate) -> Result<NaiveDate> {
    if is_storable(date) {
        Ok(date)
    } else {
        Err(Error::InvalidDate {
            input: date.to_string(),
            reason: "year must be between 0000 and 9999".to_string(),
        })
    }
}

/// Formats a calendar date for the reservation list, e.g. `Jun 1, 2024`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use innkeep::date::format_display_long;
///
/// let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// assert_eq!(format_display_long(date), "Jun 1, 2024");
/// ```
#[must_use]
pub fn format_display_long(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Parses a calendar date.
///
/// A bare `YYYY-MM-DD` string is split into its components and the date is
/// built from them directly. Any other string is parsed as a timestamp
/// (RFC 3339, RFC 2822, or a naive local date-time) and truncated to its
/// local calendar day.
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] if the components do not name a real day
/// or the string is not a recognized timestamp.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use innkeep::date::parse_date;
///
/// let date = parse_date("2024-06-01").unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
///
/// assert!(parse_date("2024-02-30").is_err());
/// assert!(parse_date("next tuesday").is_err());
/// ```
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    if bare_date_pattern().is_match(input) {
        return parse_components(input);
    }

    parse_timestamp(input)
        .ok_or_else(|| Error::InvalidDate {
            input: input.to_string(),
            reason: "expected YYYY-MM-DD or a timestamp".to_string(),
        })
        .and_then(ensure_storable)
}

fn parse_components(input: &str) -> Result<NaiveDate> {
    let invalid = |reason: &str| Error::InvalidDate {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let mut parts = input.split('-');
    let (Some(year), Some(month), Some(day)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid("expected three date components"));
    };

    let year: i32 = year.parse().map_err(|_| invalid("bad year"))?;
    let month: u32 = month.parse().map_err(|_| invalid("bad month"))?;
    let day: u32 = day.parse().map_err(|_| invalid("bad day"))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| invalid("no such calendar day"))
}

fn parse_timestamp(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(instant.with_timezone(&Local).date_naive());
    }
    if let Ok(instant) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(instant.with_timezone(&Local).date_naive());
    }

    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|local| local.date())
}

/// The current local calendar day.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Conversion into a calendar date.
///
/// Values that are already calendar dates pass through unchanged; text goes
/// through [`parse_date`]; zoned timestamps keep only their local day.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use innkeep::date::ToCalendarDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// assert_eq!(date.to_calendar_date().unwrap(), date);
/// assert_eq!("2024-06-01".to_calendar_date().unwrap(), date);
/// ```
pub trait ToCalendarDate {
    /// Converts `self` into a calendar date.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDate`] if `self` is text that is not a date.
    fn to_calendar_date(&self) -> Result<NaiveDate>;
}

impl ToCalendarDate for NaiveDate {
    fn to_calendar_date(&self) -> Result<NaiveDate> {
        Ok(*self)
    }
}

impl ToCalendarDate for str {
    fn to_calendar_date(&self) -> Result<NaiveDate> {
        parse_date(self)
    }
}

impl ToCalendarDate for String {
    fn to_calendar_date(&self) -> Result<NaiveDate> {
        parse_date(self)
    }
}

impl<Tz: TimeZone> ToCalendarDate for DateTime<Tz> {
    fn to_calendar_date(&self) -> Result<NaiveDate> {
        Ok(self.with_timezone(&Local).date_naive())
    }
}

/// Serde adapter that stores a [`NaiveDate`] as `YYYY-MM-DD`.
///
/// Deserialization accepts anything [`parse_date`] accepts, so timestamps
/// coming back from a server are truncated to a calendar day.
pub mod serde_date {
    use chrono::NaiveDate;
    use serde::{de, ser, Deserialize, Deserializer, Serializer};

    /// Serializes a date as `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Fails for a year outside [`STORABLE_YEARS`](super::STORABLE_YEARS),
    /// which could not be read back; otherwise propagates serializer errors.
    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let date = super::ensure_storable(*date).map_err(ser::Error::custom)?;
        serializer.serialize_str(&super::format_date(date))
    }

    /// Deserializes a date from a date or timestamp string.
    ///
    /// # Errors
    ///
    /// Fails if the value is not a string or not a recognized date.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(de::Error::custom)
    }
}

#[cfg(all(test, feature = "property-tests"))]
mod proptests;
