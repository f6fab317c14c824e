//! Show command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, parse_id, GlobalOptions};
use clap::Args;
use innkeep::date::format_display_long;

/// Show one reservation.
#[derive(Args)]
pub struct ShowCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: String,

    /// Print the stored JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let id = parse_id(&self.id)?;
        let config = load_configuration(global)?;
        let store = open_store(&config)?;

        let reservation = store
            .get_by_id(&id)?
            .ok_or_else(|| CliError::SemanticFailure(format!("Reservation {id} not found")))?;

        if self.json {
            let json = serde_json::to_string_pretty(&reservation)
                .map_err(|e| CliError::Library(e.into()))?;
            println!("{json}");
            return Ok(());
        }

        println!("Reservation {}", reservation.id);
        println!("  Guest:     {}", reservation.guest_name());
        println!("  Email:     {}", reservation.guest_email());
        println!(
            "  Check-in:  {}",
            format_display_long(reservation.check_in_date())
        );
        println!(
            "  Check-out: {}",
            format_display_long(reservation.check_out_date())
        );
        println!("  Nights:    {}", reservation.details.nights());
        println!("  Room:      {}", reservation.room_number());

        Ok(())
    }
}
