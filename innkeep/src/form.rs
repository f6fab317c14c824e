//! Reservation form state and validation.
//!
//! The form holds what the user typed, as text. Validation runs per field
//! first and then across the two dates; only a fully valid form turns into a
//! [`Submission`].
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use innkeep::form::{Field, FormState, Submission};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
//! let mut form = FormState::new();
//! form.set(Field::GuestName, "Jo");
//! form.set(Field::GuestEmail, "jo@x.com");
//! form.set(Field::CheckInDate, "2024-06-01");
//! form.set(Field::CheckOutDate, "2024-06-03");
//! form.set(Field::RoomNumber, "101");
//!
//! let Ok(Submission::Create(draft)) = form.submit(today) else {
//!     panic!("form should be valid");
//! };
//! assert_eq!(draft.room_number, 101);
//! ```

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::date::{format_date, parse_date};
use crate::reservation::{Reservation, ReservationDraft, ReservationId};

/// Minimum guest name length, in characters.
pub const MIN_NAME_LENGTH: usize = 2;

/// Lowest bookable room number.
pub const MIN_ROOM_NUMBER: i64 = 1;

const MAX_EMAIL_LENGTH: usize = 254;
const MAX_EMAIL_LOCAL_LENGTH: usize = 64;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        )
        .expect("email pattern is valid")
    })
}

/// Checks email syntax. Hosts without a dot (`guest@localhost`) are allowed.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, _)) = value.split_once('@') else {
        return false;
    };

    value.len() <= MAX_EMAIL_LENGTH
        && local.len() <= MAX_EMAIL_LOCAL_LENGTH
        && email_pattern().is_match(value)
}

/// A form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Guest's name.
    GuestName,
    /// Guest's email.
    GuestEmail,
    /// First night.
    CheckInDate,
    /// Departure day.
    CheckOutDate,
    /// Room number.
    RoomNumber,
}

impl Field {
    /// Every field, in display order.
    pub const ALL: [Self; 5] = [
        Self::GuestName,
        Self::GuestEmail,
        Self::CheckInDate,
        Self::CheckOutDate,
        Self::RoomNumber,
    ];

    /// The wire name of the field.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GuestName => "guestName",
            Self::GuestEmail => "guestEmail",
            Self::CheckInDate => "checkInDate",
            Self::CheckOutDate => "checkOutDate",
            Self::RoomNumber => "roomNumber",
        }
    }

    /// The label shown next to the input.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::GuestName => "Guest name",
            Self::GuestEmail => "Guest email",
            Self::CheckInDate => "Check-in date",
            Self::CheckOutDate => "Check-out date",
            Self::RoomNumber => "Room number",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A rule a single field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// Nothing entered.
    Required,
    /// Too short.
    MinLength {
        /// Minimum length.
        required: usize,
        /// Length entered.
        actual: usize,
    },
    /// Not an email address.
    Email,
    /// Not a calendar date.
    InvalidDate,
    /// Not a whole number.
    NotANumber,
    /// Below the minimum.
    Min {
        /// Smallest accepted value.
        min: i64,
        /// Value entered.
        actual: i64,
    },
    /// Above the maximum.
    Max {
        /// Largest accepted value.
        max: i64,
    },
}

impl FieldError {
    /// The message shown for this error on `field`.
    #[must_use]
    pub fn message(&self, field: Field) -> String {
        let label = field.label();
        match self {
            Self::Required => format!("{label} is required"),
            Self::MinLength { required, .. } => {
                format!("{label} must be at least {required} characters")
            }
            Self::Email => "Please enter a valid email address".to_string(),
            Self::InvalidDate => format!("{label} must be a valid date"),
            Self::NotANumber => format!("{label} must be a whole number"),
            Self::Min { min, .. } => format!("{label} must be at least {min}"),
            Self::Max { max } => format!("{label} must be at most {max}"),
        }
    }
}

/// A rule the form as a whole failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    /// New reservation starting before today.
    PastDate,
    /// Check-out on or before check-in.
    InvalidDateRange,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PastDate => f.write_str("Check-in date cannot be in the past"),
            Self::InvalidDateRange => f.write_str("Check-out date must be after check-in date"),
        }
    }
}

/// Everything wrong with a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Per-field failures, in field order. A field may fail more than once.
    pub field_errors: Vec<(Field, FieldError)>,
    /// Cross-field failure, if any.
    pub form_error: Option<FormError>,
}

impl ValidationReport {
    /// True when nothing failed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty() && self.form_error.is_none()
    }

    /// The errors reported for one field.
    pub fn errors_for(&self, field: Field) -> impl Iterator<Item = &FieldError> {
        self.field_errors
            .iter()
            .filter(move |(f, _)| *f == field)
            .map(|(_, e)| e)
    }

    /// True if `field` failed any rule.
    #[must_use]
    pub fn has_error(&self, field: Field) -> bool {
        self.errors_for(field).next().is_some()
    }

    /// User-facing messages, field errors first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.field_errors
            .iter()
            .map(|(field, error)| error.message(*field))
            .chain(self.form_error.iter().map(ToString::to_string))
            .collect()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

impl std::error::Error for ValidationReport {}

/// Raw form values as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationForm {
    /// Guest's name.
    pub guest_name: String,
    /// Guest's email.
    pub guest_email: String,
    /// Check-in, normally `YYYY-MM-DD`.
    pub check_in_date: String,
    /// Check-out, normally `YYYY-MM-DD`.
    pub check_out_date: String,
    /// Room number.
    pub room_number: String,
}

/// A form that passed every rule, converted to typed values.
struct ParsedForm {
    guest_name: String,
    guest_email: String,
    check_in_date: NaiveDate,
    check_out_date: NaiveDate,
    room_number: u32,
}

impl ReservationForm {
    /// The value of one field.
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::GuestName => &self.guest_name,
            Field::GuestEmail => &self.guest_email,
            Field::CheckInDate => &self.check_in_date,
            Field::CheckOutDate => &self.check_out_date,
            Field::RoomNumber => &self.room_number,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::GuestName => &mut self.guest_name,
            Field::GuestEmail => &mut self.guest_email,
            Field::CheckInDate => &mut self.check_in_date,
            Field::CheckOutDate => &mut self.check_out_date,
            Field::RoomNumber => &mut self.room_number,
        }
    }

    /// Fills every value from a stored reservation.
    #[must_use]
    pub fn from_reservation(reservation: &Reservation) -> Self {
        Self {
            guest_name: reservation.guest_name().to_string(),
            guest_email: reservation.guest_email().to_string(),
            check_in_date: format_date(reservation.check_in_date()),
            check_out_date: format_date(reservation.check_out_date()),
            room_number: reservation.room_number().to_string(),
        }
    }

    /// Runs every rule.
    ///
    /// `allow_past_check_in` is set while editing; new reservations may not
    /// start before `today`.
    #[must_use]
    pub fn validate(&self, allow_past_check_in: bool, today: NaiveDate) -> ValidationReport {
        self.check(allow_past_check_in, today).0
    }

    fn check(&self, allow_past_check_in: bool, today: NaiveDate) -> (ValidationReport, Option<ParsedForm>) {
        let mut report = ValidationReport::default();

        let guest_name = self.guest_name.trim();
        if guest_name.is_empty() {
            report.field_errors.push((Field::GuestName, FieldError::Required));
        } else {
            let actual = guest_name.chars().count();
            if actual < MIN_NAME_LENGTH {
                report.field_errors.push((
                    Field::GuestName,
                    FieldError::MinLength {
                        required: MIN_NAME_LENGTH,
                        actual,
                    },
                ));
            }
        }

        let guest_email = self.guest_email.trim();
        if guest_email.is_empty() {
            report.field_errors.push((Field::GuestEmail, FieldError::Required));
        } else if !is_valid_email(guest_email) {
            report.field_errors.push((Field::GuestEmail, FieldError::Email));
        }

        let check_in = Self::check_date(&mut report, Field::CheckInDate, &self.check_in_date);
        let check_out = Self::check_date(&mut report, Field::CheckOutDate, &self.check_out_date);
        let room_number = Self::check_room(&mut report, &self.room_number);

        if let (Some(check_in), Some(check_out)) = (check_in, check_out) {
            if !allow_past_check_in && check_in < today {
                report.form_error = Some(FormError::PastDate);
            } else if check_out <= check_in {
                report.form_error = Some(FormError::InvalidDateRange);
            }
        }

        let parsed = match (check_in, check_out, room_number) {
            (Some(check_in_date), Some(check_out_date), Some(room_number)) if report.is_valid() => {
                Some(ParsedForm {
                    guest_name: guest_name.to_string(),
                    guest_email: guest_email.to_string(),
                    check_in_date,
                    check_out_date,
                    room_number,
                })
            }
            _ => None,
        };

        (report, parsed)
    }

    fn check_date(report: &mut ValidationReport, field: Field, raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if raw.is_empty() {
            report.field_errors.push((field, FieldError::Required));
            return None;
        }

        match parse_date(raw) {
            Ok(date) => Some(date),
            Err(e) => {
                log::debug!("{field} rejected: {e}");
                report.field_errors.push((field, FieldError::InvalidDate));
                None
            }
        }
    }

    fn check_room(report: &mut ValidationReport, raw: &str) -> Option<u32> {
        let raw = raw.trim();
        if raw.is_empty() {
            report.field_errors.push((Field::RoomNumber, FieldError::Required));
            return None;
        }

        let Ok(value) = raw.parse::<i64>() else {
            report.field_errors.push((Field::RoomNumber, FieldError::NotANumber));
            return None;
        };

        if value < MIN_ROOM_NUMBER {
            report.field_errors.push((
                Field::RoomNumber,
                FieldError::Min {
                    min: MIN_ROOM_NUMBER,
                    actual: value,
                },
            ));
            return None;
        }

        u32::try_from(value).map_or_else(
            |_| {
                report.field_errors.push((
                    Field::RoomNumber,
                    FieldError::Max {
                        max: i64::from(u32::MAX),
                    },
                ));
                None
            },
            Some,
        )
    }
}

/// Whether the form creates a reservation or edits one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    /// Blank form for a new reservation.
    #[default]
    Create,
    /// Editing the reservation with this id.
    Edit(ReservationId),
}

/// What a valid form asks the store to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Store a new reservation.
    Create(ReservationDraft),
    /// Replace the stored reservation with the same id.
    Update(Reservation),
}

/// The form a user is working on: mode, values and which inputs were
/// touched. Errors are shown only for touched inputs.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    mode: FormMode,
    values: ReservationForm,
    touched: [bool; 5],
}

impl FormState {
    /// A blank create form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// True while editing an existing reservation.
    #[must_use]
    pub const fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    /// Current values.
    #[must_use]
    pub const fn values(&self) -> &ReservationForm {
        &self.values
    }

    /// Replaces one value. Does not mark it touched.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.values.value_mut(field) = value.into();
    }

    /// Marks one input as visited.
    pub fn touch(&mut self, field: Field) {
        self.touched[field.index()] = true;
    }

    /// True once the user visited `field` or tried to submit.
    #[must_use]
    pub const fn is_touched(&self, field: Field) -> bool {
        self.touched[field.index()]
    }

    /// Switches to a blank create form.
    pub fn start_create(&mut self) {
        self.mode = FormMode::Create;
        self.reset();
    }

    /// Switches to editing `id`. Values stay until [`patch`](Self::patch).
    pub fn start_edit(&mut self, id: ReservationId) {
        self.mode = FormMode::Edit(id);
    }

    /// Fills the values from a loaded reservation.
    pub fn patch(&mut self, reservation: &Reservation) {
        self.values = ReservationForm::from_reservation(reservation);
    }

    /// Clears every value and touched flag. The mode is kept.
    pub fn reset(&mut self) {
        self.values = ReservationForm::default();
        self.touched = [false; 5];
    }

    /// Runs every rule against the current values.
    #[must_use]
    pub fn validate(&self, today: NaiveDate) -> ValidationReport {
        self.values.validate(self.is_edit(), today)
    }

    /// Errors the user should currently see: field errors for touched
    /// inputs, plus the form error once both dates were touched.
    #[must_use]
    pub fn visible_errors(&self, today: NaiveDate) -> ValidationReport {
        let mut report = self.validate(today);
        report.field_errors.retain(|(field, _)| self.is_touched(*field));
        if !(self.is_touched(Field::CheckInDate) && self.is_touched(Field::CheckOutDate)) {
            report.form_error = None;
        }
        report
    }

    /// Validates and converts the form.
    ///
    /// # Errors
    ///
    /// Returns the full report when any rule fails; every input is then
    /// marked touched so all errors become visible.
    pub fn submit(&mut self, today: NaiveDate) -> Result<Submission, ValidationReport> {
        let (report, parsed) = self.values.check(self.is_edit(), today);
        let Some(parsed) = parsed else {
            self.touched = [true; 5];
            return Err(report);
        };

        let draft = ReservationDraft {
            guest_name: parsed.guest_name,
            guest_email: parsed.guest_email,
            check_in_date: parsed.check_in_date,
            check_out_date: parsed.check_out_date,
            room_number: parsed.room_number,
        };

        Ok(match &self.mode {
            FormMode::Create => Submission::Create(draft),
            FormMode::Edit(id) => Submission::Update(Reservation::new(id.clone(), draft)),
        })
    }
}

#[cfg(all(test, feature = "property-tests"))]
mod proptests;
