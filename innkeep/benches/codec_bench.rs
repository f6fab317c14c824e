use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use innkeep::date::{format_date, parse_date};
use innkeep::form::{Field, FormState};
use innkeep::store::{LocalStore, MemorySlotStorage, ReservationStore};
use innkeep::ReservationDraft;

fn bench_date_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("date_codec");
    let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

    group.bench_function("format", |b| {
        b.iter(|| format_date(black_box(date)));
    });

    // Bare dates take the component path
    group.bench_function("parse_bare", |b| {
        b.iter(|| parse_date(black_box("2024-06-01")));
    });

    // Timestamps fall through to the chrono parsers
    group.bench_function("parse_rfc3339", |b| {
        b.iter(|| parse_date(black_box("2024-06-01T09:30:00+02:00")));
    });

    group.bench_function("parse_rejected", |b| {
        b.iter(|| parse_date(black_box("first of june")));
    });

    group.finish();
}

fn bench_form_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("form_validation");
    let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

    let mut valid = FormState::new();
    valid.set(Field::GuestName, "Jo");
    valid.set(Field::GuestEmail, "jo@x.com");
    valid.set(Field::CheckInDate, "2024-06-01");
    valid.set(Field::CheckOutDate, "2024-06-03");
    valid.set(Field::RoomNumber, "101");

    group.bench_function("valid", |b| {
        b.iter(|| black_box(&valid).validate(today));
    });

    group.bench_function("blank", |b| {
        let blank = FormState::new();
        b.iter(|| black_box(&blank).validate(today));
    });

    group.finish();
}

fn bench_local_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("local_store");
    let draft = ReservationDraft::builder("Jo", "jo@x.com")
        .stay(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        )
        .room_number(101)
        .build()
        .unwrap();

    // Every write reserializes the whole slot
    for size in [10u64, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("create_into", size), &size, |b, &size| {
            let mut store = LocalStore::open(MemorySlotStorage::new(), "reservations");
            for _ in 0..size {
                store.create(draft.clone()).unwrap();
            }
            b.iter(|| store.create(black_box(draft.clone())).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_date_codec,
    bench_form_validation,
    bench_local_store
);
criterion_main!(benches);
