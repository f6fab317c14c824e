#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # innkeep
//!
//! A library for managing hotel reservations.
//!
//! This library provides the reservation model, a calendar date codec, two
//! interchangeable persistence backends (a REST API and a local JSON slot),
//! form validation, and the controllers that drive the list and form views.
//!
//! ## Core Types
//!
//! - [`Reservation`], [`ReservationDraft`] and [`ReservationId`]: the data model
//! - [`ReservationStore`]: the persistence contract, opened with [`open_store`]
//! - [`FormState`]: user input and its validation
//! - [`ListController`] and [`FormController`]: the two views
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use innkeep::form::Field;
//! use innkeep::navigation::{Route, Router};
//! use innkeep::store::{LocalStore, MemorySlotStorage};
//! use innkeep::{FormController, Notifier};
//!
//! struct Console;
//! impl Notifier for Console {
//!     fn confirm(&mut self, _message: &str) -> bool { true }
//!     fn alert(&mut self, message: &str) { eprintln!("{message}"); }
//! }
//!
//! let mut store = LocalStore::open(MemorySlotStorage::new(), "reservations");
//! let mut router = Router::new(Route::New);
//! let mut form = FormController::new(&mut store);
//! form.activate(&mut router);
//!
//! let values = form.form_mut();
//! values.set(Field::GuestName, "Jo");
//! values.set(Field::GuestEmail, "jo@x.com");
//! values.set(Field::CheckInDate, "2024-06-01");
//! values.set(Field::CheckOutDate, "2024-06-03");
//! values.set(Field::RoomNumber, "101");
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//! let saved = form.submit(today, &mut Console, &mut router).unwrap();
//! assert_eq!(saved.room_number(), 101);
//! assert_eq!(router.current(), &Route::List);
//! ```

pub mod config;
pub mod controller;
pub mod date;
pub mod error;
pub mod form;
pub mod logging;
pub mod navigation;
pub mod reservation;
pub mod store;

// Re-export key types at crate root for convenience
pub use config::{Backend, Config, ConfigBuilder};
pub use controller::{FormController, ListController, Notifier, SubmitError};
pub use error::{Error, Result};
pub use form::{FormState, Submission, ValidationReport};
pub use logging::{init_logger, LogLevel, Logger};
pub use navigation::{Route, Router};
pub use reservation::{Reservation, ReservationDraft, ReservationId};
pub use store::{open_store, ReservationStore};
