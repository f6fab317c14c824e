//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, store construction and the terminal
//! notifier.

use crate::error::CliError;
use chrono::NaiveDate;
use innkeep::{Backend, Config, ConfigBuilder, Notifier, ReservationId, ReservationStore};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
#[allow(dead_code)] // verbose is consumed by the logger in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the backend.
    pub backend: Option<Backend>,

    /// Override the API base URL.
    pub api_url: Option<String>,

    /// Override the storage slot.
    pub storage_slot: Option<String>,
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. Configuration files
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new().with_config(Config {
        backend: global.backend,
        api_url: global.api_url.clone(),
        storage_slot: global.storage_slot.clone(),
        data_dir: global.data_dir.clone(),
        request_timeout_seconds: None,
    });

    if let Some(ref data_dir) = global.data_dir {
        builder = builder.with_data_dir(data_dir);
    }

    let config = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;
    log::debug!(
        "Resolved configuration: backend={}, slot={}, api_url={}",
        config.backend(),
        config.storage_slot(),
        config.api_url()
    );
    Ok(config)
}

/// Open the reservation store selected by the configuration.
pub fn open_store(config: &Config) -> Result<Box<dyn ReservationStore>, CliError> {
    innkeep::open_store(config).map_err(|e| match e {
        innkeep::Error::InvalidUrl { .. } | innkeep::Error::Validation { .. } => {
            CliError::Config(e.to_string())
        }
        other => CliError::Library(other),
    })
}

/// Parse a reservation id argument.
pub fn parse_id(raw: &str) -> Result<ReservationId, CliError> {
    let id: ReservationId = raw
        .parse()
        .unwrap_or_else(|never: std::convert::Infallible| match never {});
    if id.is_unsaved() {
        return Err(CliError::InvalidArguments(format!(
            "'{raw}' is not a reservation id"
        )));
    }
    Ok(id)
}

/// The current local calendar day.
pub fn today() -> NaiveDate {
    innkeep::date::today()
}

/// Writes a yes/no question to `output` and reads one line from `input`.
///
/// Anything other than `y` or `yes` is a no, and so is a prompt that could
/// not be shown or answered.
fn ask(input: &mut impl BufRead, output: &mut impl Write, message: &str) -> bool {
    if write!(output, "{message} [y/N] ")
        .and_then(|()| output.flush())
        .is_err()
    {
        return false;
    }

    let mut answer = String::new();
    if input.read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Terminal notifier: questions on stderr, answers from stdin.
pub struct TerminalNotifier {
    assume_yes: bool,
}

impl TerminalNotifier {
    /// A notifier that prompts, or answers yes itself if `assume_yes`.
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Notifier for TerminalNotifier {
    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        ask(&mut io::stdin().lock(), &mut io::stderr(), message)
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{message}");
    }
}
