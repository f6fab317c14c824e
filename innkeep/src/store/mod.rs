//! Reservation persistence.
//!
//! [`ReservationStore`] is the one contract the rest of the crate talks to.
//! Two implementations exist:
//!
//! - [`RemoteStore`]: a REST API (`/reservations`), ids assigned by the server
//! - [`LocalStore`]: a JSON array kept in a named [`SlotStorage`] slot, ids
//!   derived from the current time
//!
//! Which one is used is decided once, at startup, by [`open_store`].
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use innkeep::store::{LocalStore, MemorySlotStorage, ReservationStore};
//! use innkeep::ReservationDraft;
//!
//! let mut store = LocalStore::open(MemorySlotStorage::new(), "reservations");
//! let draft = ReservationDraft::builder("Jo", "jo@x.com")
//!     .stay(
//!         NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
//!     )
//!     .room_number(101)
//!     .build()
//!     .unwrap();
//!
//! let created = store.create(draft).unwrap();
//! assert_eq!(store.get_by_id(&created.id).unwrap(), Some(created));
//! ```

mod local;
mod remote;
mod storage;

pub use local::LocalStore;
pub use remote::{ApiRequest, ApiResponse, HttpTransport, Method, RemoteStore, Transport};
pub use storage::{FileSlotStorage, MemorySlotStorage, SlotStorage};

use crate::config::{Backend, Config};
use crate::error::Result;
use crate::reservation::{Reservation, ReservationDraft, ReservationId};

/// CRUD contract shared by every reservation backend.
#[cfg_attr(test, mockall::automock)]
pub trait ReservationStore {
    /// Short backend name for logs and diagnostics.
    fn backend_name(&self) -> &'static str;

    /// Returns every stored reservation.
    ///
    /// # Errors
    ///
    /// The remote backend fails on transport or server errors. The local
    /// backend never fails.
    fn list(&self) -> Result<Vec<Reservation>>;

    /// Looks up one reservation. `Ok(None)` means no such id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend could not be queried.
    fn get_by_id(&self, id: &ReservationId) -> Result<Option<Reservation>>;

    /// Stores a new reservation and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejected or could not take the write.
    fn create(&mut self, draft: ReservationDraft) -> Result<Reservation>;

    /// Replaces the stored reservation with the same id.
    ///
    /// Returns the stored result, or `Ok(None)` when the local backend had no
    /// matching record (nothing is changed in that case).
    ///
    /// # Errors
    ///
    /// Returns an error if the backend could not take the write. The remote
    /// backend reports an unknown id as [`crate::Error::NotFound`].
    fn update(&mut self, reservation: &Reservation) -> Result<Option<Reservation>>;

    /// Removes the reservation with this id, if there is one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend could not take the write.
    fn delete(&mut self, id: &ReservationId) -> Result<()>;
}

/// Builds the store selected by `config`.
///
/// # Errors
///
/// Returns an error if the API URL is unusable, the HTTP client cannot be
/// built, or the data directory cannot be determined.
pub fn open_store(config: &Config) -> Result<Box<dyn ReservationStore>> {
    match config.backend() {
        Backend::Remote => {
            let transport = HttpTransport::new(config.request_timeout())?;
            let store = RemoteStore::new(config.api_url(), transport)?;
            log::debug!("Using remote reservation API at {}", store.collection_url());
            Ok(Box::new(store))
        }
        Backend::Local => {
            let data_dir = config.data_dir()?;
            log::debug!(
                "Using local reservation slot '{}' in {}",
                config.storage_slot(),
                data_dir.display()
            );
            let storage = FileSlotStorage::new(data_dir);
            Ok(Box::new(LocalStore::open(storage, config.storage_slot())))
        }
    }
}
