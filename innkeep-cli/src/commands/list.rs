//! List command implementation.
//!
//! The list view: every stored reservation, as a table for people or as
//! JSON/CSV/TSV for scripts.

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, GlobalOptions, TerminalNotifier};
use clap::{Args, ValueEnum};
use innkeep::date::{format_date, format_display_long};
use innkeep::{ListController, Reservation};
use serde::Serialize;
use std::io::{self, Write};

/// List reservations.
#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "table",
        env = "INNKEEP_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,
}

/// Output format for the list command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned columns with long dates
    Table,
    /// The stored JSON records
    Json,
    /// Comma-separated rows with a header
    Csv,
    /// Tab-separated rows with a header
    Tsv,
}

/// One flattened output row. Field order is column order.
#[derive(Serialize)]
struct Row<'a> {
    id: String,
    guest_name: &'a str,
    guest_email: &'a str,
    check_in: String,
    check_out: String,
    nights: i64,
    room: u32,
}

impl<'a> From<&'a Reservation> for Row<'a> {
    fn from(reservation: &'a Reservation) -> Self {
        Self {
            id: reservation.id.to_string(),
            guest_name: reservation.guest_name(),
            guest_email: reservation.guest_email(),
            check_in: format_date(reservation.check_in_date()),
            check_out: format_date(reservation.check_out_date()),
            nights: reservation.details.nights(),
            room: reservation.room_number(),
        }
    }
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut store = open_store(&config)?;

        let mut notifier = TerminalNotifier::new(false);
        let mut list = ListController::new(store.as_mut());
        list.activate(&mut notifier)?;

        let mut out = io::stdout().lock();
        match self.format {
            OutputFormat::Table => write_table(&mut out, list.reservations()),
            OutputFormat::Json => write_json(&mut out, list.reservations()),
            OutputFormat::Csv => write_delimited(out, list.reservations(), b','),
            OutputFormat::Tsv => write_delimited(out, list.reservations(), b'\t'),
        }
    }
}

fn write_table(out: &mut impl Write, reservations: &[Reservation]) -> Result<(), CliError> {
    if reservations.is_empty() {
        writeln!(out, "No reservations")?;
        return Ok(());
    }

    let name_width = reservations
        .iter()
        .map(|r| r.guest_name().chars().count())
        .max()
        .unwrap_or(0)
        .max("GUEST".len());
    let id_width = reservations
        .iter()
        .map(|r| r.id.to_string().len())
        .max()
        .unwrap_or(0)
        .max("ID".len());

    writeln!(
        out,
        "{:<id_width$}  {:<name_width$}  {:<6}  {:<12}  {:<12}  NIGHTS",
        "ID", "GUEST", "ROOM", "CHECK-IN", "CHECK-OUT"
    )?;
    for r in reservations {
        writeln!(
            out,
            "{:<id_width$}  {:<name_width$}  {:<6}  {:<12}  {:<12}  {}",
            r.id.to_string(),
            r.guest_name(),
            r.room_number(),
            format_display_long(r.check_in_date()),
            format_display_long(r.check_out_date()),
            r.details.nights(),
        )?;
    }

    Ok(())
}

fn write_json(out: &mut impl Write, reservations: &[Reservation]) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, reservations)
        .map_err(|e| CliError::Io(io::Error::new(io::ErrorKind::Other, e)))?;
    writeln!(out)?;
    Ok(())
}

fn write_delimited(
    out: impl Write,
    reservations: &[Reservation],
    delimiter: u8,
) -> Result<(), CliError> {
    let csv_error = |e: csv::Error| CliError::Io(io::Error::new(io::ErrorKind::Other, e));

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(out);

    if reservations.is_empty() {
        writer
            .write_record([
                "id",
                "guest_name",
                "guest_email",
                "check_in",
                "check_out",
                "nights",
                "room",
            ])
            .map_err(csv_error)?;
    }
    for reservation in reservations {
        writer.serialize(Row::from(reservation)).map_err(csv_error)?;
    }

    writer.flush()?;
    Ok(())
}
