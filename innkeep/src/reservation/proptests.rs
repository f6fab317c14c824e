//! Property-based tests for reservation ids and drafts.

use super::{Reservation, ReservationDraft, ReservationId};
use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn hash_of(id: &ReservationId) -> u64 {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    hasher.finish()
}

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1990i32..=2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // A number and its decimal text name the same reservation
    #[test]
    fn numeric_and_text_ids_agree(n in any::<u64>()) {
        let number = ReservationId::Number(n);
        let text = ReservationId::Text(n.to_string());
        prop_assert_eq!(&number, &text);
        prop_assert_eq!(hash_of(&number), hash_of(&text));
    }

    // Parsing what Display printed gives back an equal id
    #[test]
    fn id_display_parse_roundtrip(raw in "[a-z0-9]{1,16}") {
        let id: ReservationId = raw.parse().unwrap();
        let reparsed: ReservationId = id.to_string().parse().unwrap();
        prop_assert_eq!(reparsed, id);
    }

    // Digit strings with leading zeros stay textual
    #[test]
    fn leading_zero_ids_stay_text(digits in "0[0-9]{1,8}") {
        let id: ReservationId = digits.parse().unwrap();
        prop_assert_eq!(id, ReservationId::Text(digits));
    }

    // The builder accepts exactly the stays with at least one night
    #[test]
    fn builder_requires_positive_stay(
        check_in in date_strategy(),
        offset in -30i64..30,
        room in 1u32..5000,
    ) {
        let check_out = if offset >= 0 {
            check_in + Days::new(offset.unsigned_abs())
        } else {
            check_in - Days::new(offset.unsigned_abs())
        };
        let built = ReservationDraft::builder("Jo", "jo@x.com")
            .stay(check_in, check_out)
            .room_number(room)
            .build();

        if offset > 0 {
            let draft = built.unwrap();
            prop_assert_eq!(draft.nights(), offset);
        } else {
            prop_assert!(built.is_err());
        }
    }

    // JSON keeps the flat camelCase shape and loses nothing
    #[test]
    fn json_preserves_reservation(
        id in any::<u64>(),
        check_in in date_strategy(),
        nights in 1u64..60,
        room in 1u32..5000,
    ) {
        let draft = ReservationDraft::builder("Jo", "jo@x.com")
            .stay(check_in, check_in + Days::new(nights))
            .room_number(room)
            .build()
            .unwrap();
        let reservation = Reservation::new(ReservationId::Number(id), draft);

        let json = serde_json::to_value(&reservation).unwrap();
        prop_assert_eq!(&json["roomNumber"], &serde_json::json!(room));
        let back: Reservation = serde_json::from_value(json).unwrap();
        prop_assert_eq!(back, reservation);
    }
}
