//! End-to-end flows through the list and form controllers.

mod common;

use common::{day, draft, FakeApi, ScriptedNotifier, API_URL};
use innkeep::controller::{CONFIRM_DELETE, DELETE_FAILED, LOAD_FAILED};
use innkeep::form::{Field, FieldError, FormError};
use innkeep::navigation::{Route, Router};
use innkeep::store::{LocalStore, MemorySlotStorage, RemoteStore, ReservationStore};
use innkeep::{FormController, ListController, SubmitError};

fn fill(form: &mut FormController<'_>, email: &str, check_in: &str, check_out: &str) {
    let values = form.form_mut();
    values.set(Field::GuestName, "Jo");
    values.set(Field::GuestEmail, email);
    values.set(Field::CheckInDate, check_in);
    values.set(Field::CheckOutDate, check_out);
    values.set(Field::RoomNumber, "101");
}

#[test]
fn test_new_reservation_appears_in_list() {
    let mut store = LocalStore::open(MemorySlotStorage::new(), "reservations");
    let mut router = Router::new(Route::List);
    let mut notifier = ScriptedNotifier::agreeing();

    let mut list = ListController::new(&mut store);
    list.activate(&mut notifier).unwrap();
    assert!(list.reservations().is_empty());
    list.create_new(&mut router);
    drop(list);

    let created = {
        let mut form = FormController::new(&mut store);
        form.activate(&mut router);
        fill(&mut form, "jo@x.com", "2024-06-01", "2024-06-03");
        form.submit(day(2024, 5, 30), &mut notifier, &mut router)
            .unwrap()
    };
    assert_eq!(router.current(), &Route::List);

    let mut list = ListController::new(&mut store);
    list.activate(&mut notifier).unwrap();
    assert_eq!(list.reservations(), &[created]);
    assert!(notifier.alerts.is_empty());
}

#[test]
fn test_invalid_email_never_reaches_api() {
    let api = FakeApi::new();
    let mut store = RemoteStore::new(API_URL, api.clone()).unwrap();
    let mut router = Router::new(Route::New);
    let mut notifier = ScriptedNotifier::agreeing();

    let mut form = FormController::new(&mut store);
    form.activate(&mut router);
    fill(&mut form, "not-an-email", "2024-06-01", "2024-06-03");

    let Err(SubmitError::Invalid(report)) =
        form.submit(day(2024, 5, 30), &mut notifier, &mut router)
    else {
        panic!("submission must be blocked");
    };
    assert!(report.errors_for(Field::GuestEmail).eq([&FieldError::Email]));
    assert!(Field::ALL.iter().all(|f| form.form().is_touched(*f)));
    assert!(api.requests().is_empty());
    assert_eq!(router.current(), &Route::New);
}

#[test]
fn test_same_day_stay_is_rejected_but_next_day_accepted() {
    let mut store = LocalStore::open(MemorySlotStorage::new(), "reservations");
    let mut router = Router::new(Route::New);
    let mut notifier = ScriptedNotifier::agreeing();

    let mut form = FormController::new(&mut store);
    form.activate(&mut router);
    fill(&mut form, "jo@x.com", "2024-06-01", "2024-06-01");
    let Err(SubmitError::Invalid(report)) =
        form.submit(day(2024, 6, 1), &mut notifier, &mut router)
    else {
        panic!("zero-night stay must be rejected");
    };
    assert_eq!(report.form_error, Some(FormError::InvalidDateRange));

    form.form_mut().set(Field::CheckOutDate, "2024-06-02");
    assert!(form
        .submit(day(2024, 6, 1), &mut notifier, &mut router)
        .is_ok());
}

#[test]
fn test_edit_past_reservation_over_api() {
    let api = FakeApi::new();
    let mut store = RemoteStore::new(API_URL, api.clone()).unwrap();
    let past = store
        .create(draft("Jo", day(2020, 3, 1), day(2020, 3, 4)))
        .unwrap();

    let mut router = Router::new(Route::List);
    let mut notifier = ScriptedNotifier::agreeing();
    let mut list = ListController::new(&mut store);
    list.activate(&mut notifier).unwrap();
    list.edit(&past.id, &mut router);
    drop(list);

    let mut form = FormController::new(&mut store);
    form.activate(&mut router);
    assert!(form.form().is_edit());
    assert_eq!(form.form().values().check_in_date, "2020-03-01");

    form.form_mut().set(Field::RoomNumber, "12");
    let updated = form
        .submit(day(2024, 6, 1), &mut notifier, &mut router)
        .unwrap();

    assert_eq!(updated.id, past.id);
    assert_eq!(api.record(1).unwrap()["roomNumber"], 12);
    assert_eq!(router.current(), &Route::List);
}

#[test]
fn test_editing_missing_reservation_returns_to_list() {
    let mut store = RemoteStore::new(API_URL, FakeApi::new()).unwrap();
    let mut router: Router = Router::new("/reservations/31/edit".parse().unwrap());

    let mut form = FormController::new(&mut store);
    form.activate(&mut router);
    assert_eq!(router.current(), &Route::List);
}

#[test]
fn test_delete_flow_with_confirmation() {
    let mut store = LocalStore::open(MemorySlotStorage::new(), "reservations");
    let doomed = store
        .create(draft("Jo", day(2024, 6, 1), day(2024, 6, 3)))
        .unwrap();

    let mut declining = ScriptedNotifier::declining();
    let mut list = ListController::new(&mut store);
    list.activate(&mut declining).unwrap();
    assert!(!list.request_delete(&doomed.id, &mut declining).unwrap());
    assert_eq!(declining.questions, vec![CONFIRM_DELETE.to_string()]);
    assert_eq!(list.reservations().len(), 1);

    let mut agreeing = ScriptedNotifier::agreeing();
    assert!(list.request_delete(&doomed.id, &mut agreeing).unwrap());
    assert!(list.reservations().is_empty());
    drop(list);
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_api_outage_alerts_user() {
    let api = FakeApi::new();
    let mut store = RemoteStore::new(API_URL, api.clone()).unwrap();
    let created = store
        .create(draft("Jo", day(2024, 6, 1), day(2024, 6, 3)))
        .unwrap();

    let mut notifier = ScriptedNotifier::agreeing();
    let mut list = ListController::new(&mut store);
    list.activate(&mut notifier).unwrap();
    assert_eq!(list.reservations().len(), 1);

    api.fail_all();
    assert!(list.request_delete(&created.id, &mut notifier).is_err());
    assert!(list.activate(&mut notifier).is_err());
    assert!(list.reservations().is_empty());
    assert_eq!(
        notifier.alerts,
        vec![DELETE_FAILED.to_string(), LOAD_FAILED.to_string()]
    );
}
