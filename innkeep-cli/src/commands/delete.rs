//! Delete command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, parse_id, GlobalOptions, TerminalNotifier};
use clap::Args;
use innkeep::ListController;

/// Delete a reservation.
#[derive(Args)]
pub struct DeleteCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl DeleteCommand {
    /// Execute the delete command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let id = parse_id(&self.id)?;
        let config = load_configuration(global)?;
        let mut store = open_store(&config)?;

        let mut notifier = TerminalNotifier::new(self.yes);
        let mut list = ListController::new(store.as_mut());
        list.activate(&mut notifier)?;

        if !list.reservations().iter().any(|r| r.id == id) {
            return Err(CliError::SemanticFailure(format!(
                "Reservation {id} not found"
            )));
        }

        let deleted = list.request_delete(&id, &mut notifier)?;
        if !global.quiet {
            if deleted {
                println!("Deleted reservation {id}");
            } else {
                println!("Kept reservation {id}");
            }
        }

        Ok(())
    }
}
