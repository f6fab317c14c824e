//! New command implementation.
//!
//! Fills the reservation form from flags and submits it. Missing or
//! malformed values are reported with the same messages the form shows.

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, today, GlobalOptions, TerminalNotifier};
use clap::Args;
use innkeep::form::{Field, FormState};
use innkeep::{FormController, Route, Router};

/// Form values accepted on the command line.
#[derive(Args, Debug, Default)]
pub struct ReservationFields {
    /// Guest's full name
    #[arg(long, value_name = "NAME")]
    pub guest_name: Option<String>,

    /// Guest's email address
    #[arg(long, value_name = "EMAIL")]
    pub guest_email: Option<String>,

    /// First night of the stay (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_in: Option<String>,

    /// Departure day (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_out: Option<String>,

    /// Room number
    #[arg(long, value_name = "NUMBER")]
    pub room: Option<String>,
}

impl ReservationFields {
    /// Writes every given value into `form` and marks it touched.
    pub fn apply(self, form: &mut FormState) {
        let values = [
            (Field::GuestName, self.guest_name),
            (Field::GuestEmail, self.guest_email),
            (Field::CheckInDate, self.check_in),
            (Field::CheckOutDate, self.check_out),
            (Field::RoomNumber, self.room),
        ];
        for (field, value) in values {
            if let Some(value) = value {
                form.set(field, value);
                form.touch(field);
            }
        }
    }

    /// True if no value was given.
    pub fn is_empty(&self) -> bool {
        self.guest_name.is_none()
            && self.guest_email.is_none()
            && self.check_in.is_none()
            && self.check_out.is_none()
            && self.room.is_none()
    }
}

/// Create a reservation.
#[derive(Args)]
pub struct NewCommand {
    #[command(flatten)]
    pub fields: ReservationFields,
}

impl NewCommand {
    /// Execute the new command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut store = open_store(&config)?;

        let mut router = Router::new(Route::New);
        let mut notifier = TerminalNotifier::new(false);
        let mut controller = FormController::new(store.as_mut());
        controller.activate(&mut router);

        self.fields.apply(controller.form_mut());
        let saved = controller.submit(today(), &mut notifier, &mut router)?;
        controller.teardown();

        if global.quiet {
            println!("{}", saved.id);
        } else {
            println!(
                "Created reservation {} for {} ({} nights, room {})",
                saved.id,
                saved.guest_name(),
                saved.details.nights(),
                saved.room_number()
            );
        }

        Ok(())
    }
}
