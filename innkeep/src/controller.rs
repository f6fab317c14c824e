//! List and form view controllers.
//!
//! Controllers sit between a [`ReservationStore`] and whatever presents the
//! views. They borrow the store for their lifetime, talk to the user through
//! a [`Notifier`] and move between views with a [`Router`].

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::form::{FormState, Submission, ValidationReport};
use crate::navigation::{Route, RouteSubscription, Router};
use crate::reservation::{Reservation, ReservationId};
use crate::store::ReservationStore;

/// Asked before deleting.
pub const CONFIRM_DELETE: &str = "Are you sure you want to delete this reservation?";

/// Shown when a delete fails.
pub const DELETE_FAILED: &str = "Failed to delete reservation. Please try again.";

/// Shown when the list cannot be loaded.
pub const LOAD_FAILED: &str = "Failed to load reservations. Please try again.";

/// Shown when a submitted form cannot be stored.
pub const SAVE_FAILED: &str = "Failed to save reservation. Please try again.";

/// Blocking user notices.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    /// Asks a yes/no question.
    fn confirm(&mut self, message: &str) -> bool;

    /// Shows a message that needs no answer.
    fn alert(&mut self, message: &str);
}

/// Controller for the reservation list.
pub struct ListController<'a> {
    store: &'a mut dyn ReservationStore,
    reservations: Vec<Reservation>,
}

impl<'a> ListController<'a> {
    /// A controller with an empty list; call [`activate`](Self::activate)
    /// to load it.
    pub fn new(store: &'a mut dyn ReservationStore) -> Self {
        Self {
            store,
            reservations: Vec::new(),
        }
    }

    /// Loads every reservation.
    ///
    /// # Errors
    ///
    /// Returns the store error after clearing the list and alerting the user.
    pub fn activate(&mut self, notifier: &mut dyn Notifier) -> Result<()> {
        self.reload(notifier)
    }

    /// Rows currently shown.
    #[must_use]
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    /// Deletes `id` after the user confirms, then reloads.
    ///
    /// Returns `Ok(false)` if the user declined.
    ///
    /// # Errors
    ///
    /// Returns the store error if the delete or the reload failed. The user
    /// has already been alerted.
    pub fn request_delete(
        &mut self,
        id: &ReservationId,
        notifier: &mut dyn Notifier,
    ) -> Result<bool> {
        if !notifier.confirm(CONFIRM_DELETE) {
            log::debug!("Delete of reservation {id} declined");
            return Ok(false);
        }

        if let Err(e) = self.store.delete(id) {
            log::error!("Error deleting reservation: {e}");
            notifier.alert(DELETE_FAILED);
            return Err(e);
        }

        self.reload(notifier)?;
        Ok(true)
    }

    /// Opens the edit view for `id`.
    pub fn edit(&self, id: &ReservationId, router: &mut Router) {
        router.navigate(Route::Edit(id.clone()));
    }

    /// Opens a blank form.
    pub fn create_new(&self, router: &mut Router) {
        router.navigate(Route::New);
    }

    fn reload(&mut self, notifier: &mut dyn Notifier) -> Result<()> {
        match self.store.list() {
            Ok(reservations) => {
                log::debug!(
                    "Loaded {} reservation(s) from {}",
                    reservations.len(),
                    self.store.backend_name()
                );
                self.reservations = reservations;
                Ok(())
            }
            Err(e) => {
                log::error!("Error loading reservations: {e}");
                self.reservations.clear();
                notifier.alert(LOAD_FAILED);
                Err(e)
            }
        }
    }
}

/// Why a form submission did not go through.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The form failed validation; nothing was sent to the store.
    #[error("{0}")]
    Invalid(ValidationReport),

    /// The store did not take the write.
    #[error("Failed to save reservation: {0}")]
    Store(#[source] Error),
}

/// Controller for the create/edit form.
///
/// Reacts to route changes while active: an edit route loads that
/// reservation, anything else shows a blank create form.
pub struct FormController<'a> {
    store: &'a mut dyn ReservationStore,
    form: FormState,
    subscription: Option<RouteSubscription>,
}

impl<'a> FormController<'a> {
    /// An inactive controller with a blank create form.
    pub fn new(store: &'a mut dyn ReservationStore) -> Self {
        Self {
            store,
            form: FormState::new(),
            subscription: None,
        }
    }

    /// Subscribes to `router` and handles its current route.
    pub fn activate(&mut self, router: &mut Router) {
        self.subscription = Some(router.subscribe());
        let current = router.current().clone();
        self.on_route(current, router);
    }

    /// True between [`activate`](Self::activate) and
    /// [`teardown`](Self::teardown).
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    /// Switches the form for `route`.
    ///
    /// An edit route whose reservation cannot be loaded redirects to the
    /// list.
    pub fn on_route(&mut self, route: Route, router: &mut Router) {
        let Route::Edit(id) = route else {
            self.form.start_create();
            return;
        };

        self.form.start_edit(id.clone());
        match self.store.get_by_id(&id) {
            Ok(Some(reservation)) => self.form.patch(&reservation),
            Ok(None) => {
                log::warn!("Reservation {id} not found");
                router.navigate(Route::List);
            }
            Err(e) => {
                log::error!("Error loading reservation {id}: {e}");
                router.navigate(Route::List);
            }
        }
    }

    /// Handles every queued route event in order. Returns how many were
    /// handled.
    pub fn pump(&mut self, router: &mut Router) -> usize {
        let mut handled = 0;
        while let Some(route) = self.subscription.as_ref().and_then(RouteSubscription::next_event) {
            self.on_route(route, router);
            handled += 1;
        }
        handled
    }

    /// The form being edited.
    #[must_use]
    pub const fn form(&self) -> &FormState {
        &self.form
    }

    /// Mutable access for entering values.
    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    /// Validates and stores the form, then returns to the list.
    ///
    /// Navigation happens only after the store confirmed the write.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::Invalid`] if validation failed; every field is now
    ///   touched and the store was not called.
    /// - [`SubmitError::Store`] if the write failed; the user was alerted and
    ///   the form keeps its values.
    pub fn submit(
        &mut self,
        today: NaiveDate,
        notifier: &mut dyn Notifier,
        router: &mut Router,
    ) -> std::result::Result<Reservation, SubmitError> {
        let submission = self.form.submit(today).map_err(SubmitError::Invalid)?;

        let saved = match submission {
            Submission::Create(draft) => self.store.create(draft),
            Submission::Update(reservation) => {
                self.store.update(&reservation).and_then(|stored| {
                    stored.ok_or_else(|| Error::NotFound {
                        resource: format!("reservation {}", reservation.id),
                    })
                })
            }
        };

        match saved {
            Ok(reservation) => {
                router.navigate(Route::List);
                Ok(reservation)
            }
            Err(e) => {
                log::error!("Error saving reservation: {e}");
                notifier.alert(SAVE_FAILED);
                Err(SubmitError::Store(e))
            }
        }
    }

    /// Stops listening for route changes.
    pub fn teardown(&mut self) {
        self.subscription = None;
    }
}
