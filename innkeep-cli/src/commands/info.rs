//! Info command implementation.
//!
//! Prints the configuration a command would run with, after files,
//! environment and flags have been merged.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;
use innkeep::store::FileSlotStorage;
use innkeep::Backend;
use serde::Serialize;
use std::path::PathBuf;

/// Show the resolved configuration.
#[derive(Args)]
pub struct InfoCommand {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
struct ResolvedInfo {
    backend: Backend,
    api_url: String,
    request_timeout_seconds: u64,
    data_dir: PathBuf,
    storage_slot: String,
    slot_file: PathBuf,
}

impl InfoCommand {
    /// Execute the info command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let data_dir = config.data_dir()?;
        let slot_file = FileSlotStorage::new(&data_dir).slot_path(config.storage_slot());

        let info = ResolvedInfo {
            backend: config.backend(),
            api_url: config.api_url().to_string(),
            request_timeout_seconds: config.request_timeout().as_secs(),
            data_dir,
            storage_slot: config.storage_slot().to_string(),
            slot_file,
        };

        if self.json {
            let json =
                serde_json::to_string_pretty(&info).map_err(|e| CliError::Library(e.into()))?;
            println!("{json}");
            return Ok(());
        }

        println!("Backend:       {}", info.backend);
        println!("API URL:       {}", info.api_url);
        println!("Timeout:       {}s", info.request_timeout_seconds);
        println!("Data dir:      {}", info.data_dir.display());
        println!("Storage slot:  {}", info.storage_slot);
        println!("Slot file:     {}", info.slot_file.display());

        Ok(())
    }
}
