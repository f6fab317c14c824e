//! Property-based tests for form validation.

use super::{Field, FieldError, FormError, FormState, Submission};
use crate::date::format_date;
use chrono::{Days, NaiveDate};
use proptest::prelude::*;

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1990i32..=2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn form_with(check_in: NaiveDate, check_out: NaiveDate, room: &str) -> FormState {
    let mut form = FormState::new();
    form.set(Field::GuestName, "Jo");
    form.set(Field::GuestEmail, "jo@x.com");
    form.set(Field::CheckInDate, format_date(check_in));
    form.set(Field::CheckOutDate, format_date(check_out));
    form.set(Field::RoomNumber, room);
    form
}

proptest! {
    // A stay of at least one night starting today or later is always accepted
    #[test]
    fn future_stays_accepted(
        today in date_strategy(),
        lead in 0u64..400,
        nights in 1u64..60,
        room in 1u32..10_000,
    ) {
        let check_in = today + Days::new(lead);
        let check_out = check_in + Days::new(nights);
        let mut form = form_with(check_in, check_out, &room.to_string());

        let Ok(Submission::Create(draft)) = form.submit(today) else {
            return Err(TestCaseError::fail("valid form rejected"));
        };
        prop_assert_eq!(draft.check_in_date, check_in);
        prop_assert_eq!(draft.check_out_date, check_out);
        prop_assert_eq!(draft.room_number, room);
    }

    // Zero-night or reversed stays fail on range, never on a field
    #[test]
    fn non_positive_stays_rejected(
        check_in in date_strategy(),
        back in 0u64..30,
    ) {
        let check_out = check_in - Days::new(back);
        let form = form_with(check_in, check_out, "101");

        let report = form.validate(check_in);
        prop_assert!(report.field_errors.is_empty());
        prop_assert_eq!(report.form_error, Some(FormError::InvalidDateRange));
    }

    // Only create mode cares about the past
    #[test]
    fn past_check_in_depends_on_mode(
        today in date_strategy(),
        ago in 1u64..1000,
    ) {
        let check_in = today - Days::new(ago);
        let mut form = form_with(check_in, check_in + Days::new(2), "101");
        prop_assert_eq!(form.validate(today).form_error, Some(FormError::PastDate));

        form.start_edit(7u64.into());
        prop_assert!(form.validate(today).is_valid());
    }

    // Any room number below one is a Min failure carrying the entered value
    #[test]
    fn low_rooms_rejected(room in -10_000i64..1) {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let form = form_with(today, today + Days::new(1), &room.to_string());
        let report = form.validate(today);
        prop_assert_eq!(
            report.errors_for(Field::RoomNumber).copied().collect::<Vec<_>>(),
            vec![FieldError::Min { min: 1, actual: room }]
        );
    }
}
