//! Reservation types.
//!
//! A [`ReservationDraft`] is everything a guest fills in; a [`Reservation`]
//! is a draft that a store has accepted and given a [`ReservationId`]. Only
//! stores mint ids, so `create` takes a draft and there is no way to pass an
//! id through it.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::{is_storable, serde_date};

/// Identifier of a stored reservation.
///
/// Servers hand out either numbers or strings. Two ids are equal when their
/// textual forms are equal, so `7` and `"7"` name the same record.
///
/// # Examples
///
/// ```
/// use innkeep::ReservationId;
///
/// let id: ReservationId = "42".parse().unwrap();
/// assert_eq!(id, ReservationId::Number(42));
/// assert_eq!(id, ReservationId::Text("42".into()));
/// assert_eq!(id.to_string(), "42");
///
/// let id: ReservationId = "a1b2".parse().unwrap();
/// assert_eq!(id, ReservationId::Text("a1b2".into()));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReservationId {
    /// Numeric id (server sequence or millisecond timestamp).
    Number(u64),
    /// Opaque string id.
    Text(String),
}

impl ReservationId {
    /// Whether this id is the "unsaved" placeholder (`0` or empty).
    #[must_use]
    pub fn is_unsaved(&self) -> bool {
        match self {
            Self::Number(n) => *n == 0,
            Self::Text(s) => s.is_empty() || s == "0",
        }
    }

    /// The id as it appears in a URL path segment.
    #[must_use]
    pub fn as_path_segment(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl PartialEq for ReservationId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl Eq for ReservationId {}

impl Hash for ReservationId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl From<u64> for ReservationId {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl FromStr for ReservationId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // Leading zeros would not survive a trip through u64
        let canonical_number = !trimmed.is_empty()
            && trimmed.bytes().all(|b| b.is_ascii_digit())
            && (trimmed == "0" || !trimmed.starts_with('0'));
        if canonical_number {
            if let Ok(n) = trimmed.parse() {
                return Ok(Self::Number(n));
            }
        }
        Ok(Self::Text(trimmed.to_string()))
    }
}

/// The guest-supplied part of a reservation.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use innkeep::ReservationDraft;
///
/// let draft = ReservationDraft::builder("Jo", "jo@x.com")
///     .stay(
///         NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
///     )
///     .room_number(101)
///     .build()
///     .unwrap();
///
/// assert_eq!(draft.nights(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDraft {
    /// Guest's full name.
    pub guest_name: String,
    /// Guest's contact email.
    pub guest_email: String,
    /// First night of the stay.
    #[serde(with = "serde_date")]
    pub check_in_date: NaiveDate,
    /// Departure day; strictly after `check_in_date`.
    #[serde(with = "serde_date")]
    pub check_out_date: NaiveDate,
    /// Room number, at least 1.
    pub room_number: u32,
}

impl ReservationDraft {
    /// Starts building a draft for the given guest.
    #[must_use]
    pub fn builder(guest_name: impl Into<String>, guest_email: impl Into<String>) -> DraftBuilder {
        DraftBuilder {
            guest_name: guest_name.into(),
            guest_email: guest_email.into(),
            check_in_date: None,
            check_out_date: None,
            room_number: None,
        }
    }

    /// Number of nights between check-in and check-out.
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.check_out_date - self.check_in_date).num_days()
    }
}

/// A stored reservation.
///
/// Serializes flat, with `id` next to the draft fields:
///
/// ```
/// use chrono::NaiveDate;
/// use innkeep::{Reservation, ReservationDraft, ReservationId};
///
/// let draft = ReservationDraft::builder("Jo", "jo@x.com")
///     .stay(
///         NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
///     )
///     .room_number(101)
///     .build()
///     .unwrap();
/// let reservation = Reservation::new(ReservationId::Number(1), draft);
///
/// let json = serde_json::to_value(&reservation).unwrap();
/// assert_eq!(json["id"], 1);
/// assert_eq!(json["checkInDate"], "2024-06-01");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Store-assigned identifier.
    pub id: ReservationId,
    /// Guest-supplied fields.
    #[serde(flatten)]
    pub details: ReservationDraft,
}

impl Reservation {
    /// Attaches an id to a draft.
    #[must_use]
    pub const fn new(id: ReservationId, details: ReservationDraft) -> Self {
        Self { id, details }
    }

    /// Returns the guest name.
    #[must_use]
    pub fn guest_name(&self) -> &str {
        &self.details.guest_name
    }

    /// Returns the guest email.
    #[must_use]
    pub fn guest_email(&self) -> &str {
        &self.details.guest_email
    }

    /// Returns the check-in date.
    #[must_use]
    pub const fn check_in_date(&self) -> NaiveDate {
        self.details.check_in_date
    }

    /// Returns the check-out date.
    #[must_use]
    pub const fn check_out_date(&self) -> NaiveDate {
        self.details.check_out_date
    }

    /// Returns the room number.
    #[must_use]
    pub const fn room_number(&self) -> u32 {
        self.details.room_number
    }
}

/// Builder for [`ReservationDraft`].
#[derive(Debug)]
pub struct DraftBuilder {
    guest_name: String,
    guest_email: String,
    check_in_date: Option<NaiveDate>,
    check_out_date: Option<NaiveDate>,
    room_number: Option<u32>,
}

impl DraftBuilder {
    /// Sets check-in and check-out dates.
    #[must_use]
    pub const fn stay(mut self, check_in: NaiveDate, check_out: NaiveDate) -> Self {
        self.check_in_date = Some(check_in);
        self.check_out_date = Some(check_out);
        self
    }

    /// Sets the room number.
    #[must_use]
    pub const fn room_number(mut self, room_number: u32) -> Self {
        self.room_number = Some(room_number);
        self
    }

    /// Builds the draft.
    ///
    /// Only the date-independent invariants are checked here. Whether the
    /// check-in may lie in the past depends on create versus edit and is the
    /// form's concern.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The guest name is shorter than 2 characters after trimming
    /// - Dates or room are missing
    /// - A date falls outside [`STORABLE_YEARS`](crate::date::STORABLE_YEARS)
    /// - The check-out is not strictly after the check-in
    /// - The room number is 0
    pub fn build(self) -> Result<ReservationDraft, ValidationError> {
        let guest_name = self.guest_name.trim().to_string();
        if guest_name.chars().count() < 2 {
            return Err(ValidationError::new(
                "guestName",
                "guest name must be at least 2 characters",
            ));
        }

        let guest_email = self.guest_email.trim().to_string();
        if guest_email.is_empty() {
            return Err(ValidationError::new("guestEmail", "guest email is required"));
        }

        let (Some(check_in_date), Some(check_out_date)) = (self.check_in_date, self.check_out_date)
        else {
            return Err(ValidationError::new("checkInDate", "stay dates are required"));
        };
        if !(is_storable(check_in_date) && is_storable(check_out_date)) {
            return Err(ValidationError::new(
                "checkInDate",
                "stay dates must fall in years 0000 to 9999",
            ));
        }
        if check_out_date <= check_in_date {
            return Err(ValidationError::new(
                "checkOutDate",
                "check-out date must be after check-in date",
            ));
        }

        let room_number = match self.room_number {
            Some(0) => {
                return Err(ValidationError::new("roomNumber", "room number must be at least 1"))
            }
            Some(room) => room,
            None => return Err(ValidationError::new("roomNumber", "room number is required")),
        };

        Ok(ReservationDraft {
            guest_name,
            guest_email,
            check_in_date,
            check_out_date,
            room_number,
        })
    }
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

#[cfg(all(test, feature = "property-tests"))]
mod proptests;
