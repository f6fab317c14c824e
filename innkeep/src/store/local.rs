//! Reservation store backed by a single storage slot.

use chrono::Utc;

use crate::date::ensure_storable;
use crate::error::Result;
use crate::reservation::{Reservation, ReservationDraft, ReservationId};
use crate::store::storage::SlotStorage;
use crate::store::ReservationStore;

type Clock = Box<dyn Fn() -> u64>;

fn unix_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
}

/// Keeps every reservation in memory and mirrors the whole set into one
/// storage slot after each change.
///
/// The in-memory records are authoritative for the lifetime of the store. If
/// the slot cannot be read at startup the store starts empty; if a write
/// fails the error is logged and the change stays in memory.
///
/// New ids are the current Unix time in milliseconds, bumped past the
/// largest numeric id already stored so that two creations inside the same
/// millisecond still get distinct ids.
pub struct LocalStore<S> {
    storage: S,
    slot: String,
    records: Vec<Reservation>,
    clock: Clock,
}

impl<S: SlotStorage> LocalStore<S> {
    /// Loads the reservations stored in `slot`.
    pub fn open(storage: S, slot: impl Into<String>) -> Self {
        let slot = slot.into();
        let records = Self::load(&storage, &slot);
        log::debug!("Loaded {} reservation(s) from slot '{slot}'", records.len());

        Self {
            storage,
            slot,
            records,
            clock: Box::new(unix_millis),
        }
    }

    /// Replaces the id clock.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Fn() -> u64 + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// The underlying slot storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn load(storage: &S, slot: &str) -> Vec<Reservation> {
        let raw = match storage.read(slot) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::error!("Error loading reservations from storage: {e}");
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::error!("Error loading reservations from storage: slot '{slot}' is unreadable: {e}");
            Vec::new()
        })
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.records)
            .map_err(crate::Error::from)
            .and_then(|json| self.storage.write(&self.slot, &json));

        if let Err(e) = result {
            log::error!("Error saving reservations to storage: {e}");
        }
    }

    fn next_id(&self) -> ReservationId {
        let floor = self
            .records
            .iter()
            .filter_map(|r| match r.id {
                ReservationId::Number(n) => n.checked_add(1),
                ReservationId::Text(_) => None,
            })
            .max()
            .unwrap_or_default();
        ReservationId::Number((self.clock)().max(floor))
    }

    // A record the slot cannot hold would make every later write fail and
    // the next open discard the slot.
    fn check_storable(details: &ReservationDraft) -> Result<()> {
        ensure_storable(details.check_in_date)?;
        ensure_storable(details.check_out_date)?;
        Ok(())
    }

    fn position(&self, id: &ReservationId) -> Option<usize> {
        self.records.iter().position(|r| &r.id == id)
    }
}

impl<S: SlotStorage> ReservationStore for LocalStore<S> {
    fn backend_name(&self) -> &'static str {
        "local"
    }

    fn list(&self) -> Result<Vec<Reservation>> {
        Ok(self.records.clone())
    }

    fn get_by_id(&self, id: &ReservationId) -> Result<Option<Reservation>> {
        Ok(self.position(id).map(|index| self.records[index].clone()))
    }

    fn create(&mut self, draft: ReservationDraft) -> Result<Reservation> {
        Self::check_storable(&draft)?;
        let reservation = Reservation::new(self.next_id(), draft);
        self.records.push(reservation.clone());
        self.persist();
        log::info!("Created reservation {}", reservation.id);
        Ok(reservation)
    }

    fn update(&mut self, reservation: &Reservation) -> Result<Option<Reservation>> {
        Self::check_storable(&reservation.details)?;
        let Some(index) = self.position(&reservation.id) else {
            log::debug!("No reservation {} to update", reservation.id);
            return Ok(None);
        };

        self.records[index] = reservation.clone();
        self.persist();
        log::info!("Updated reservation {}", reservation.id);
        Ok(Some(reservation.clone()))
    }

    fn delete(&mut self, id: &ReservationId) -> Result<()> {
        let before = self.records.len();
        self.records.retain(|r| &r.id != id);

        if self.records.len() == before {
            log::debug!("No reservation {id} to delete");
        } else {
            self.persist();
            log::info!("Deleted reservation {id}");
        }
        Ok(())
    }
}
