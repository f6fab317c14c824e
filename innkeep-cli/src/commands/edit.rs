//! Edit command implementation.

use super::new::ReservationFields;
use crate::error::CliError;
use crate::utils::{
    load_configuration, open_store, parse_id, today, GlobalOptions, TerminalNotifier,
};
use clap::Args;
use innkeep::{FormController, Route, Router};

/// Change an existing reservation.
///
/// Fields not given keep their stored values.
#[derive(Args)]
pub struct EditCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: String,

    #[command(flatten)]
    pub fields: ReservationFields,
}

impl EditCommand {
    /// Execute the edit command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let id = parse_id(&self.id)?;
        if self.fields.is_empty() {
            return Err(CliError::InvalidArguments(
                "nothing to change; pass at least one field".to_string(),
            ));
        }

        let config = load_configuration(global)?;
        let mut store = open_store(&config)?;

        let mut router = Router::new(Route::Edit(id.clone()));
        let mut notifier = TerminalNotifier::new(false);
        let mut controller = FormController::new(store.as_mut());
        controller.activate(&mut router);

        // A reservation that could not be loaded sends the router back to the list.
        if router.current() == &Route::List {
            return Err(CliError::SemanticFailure(format!(
                "Reservation {id} not found"
            )));
        }

        self.fields.apply(controller.form_mut());
        let saved = controller.submit(today(), &mut notifier, &mut router)?;
        controller.teardown();

        if !global.quiet {
            println!(
                "Updated reservation {} for {} ({} nights, room {})",
                saved.id,
                saved.guest_name(),
                saved.details.nights(),
                saved.room_number()
            );
        }

        Ok(())
    }
}
