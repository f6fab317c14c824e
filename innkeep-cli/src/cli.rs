//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompletionsCommand, DeleteCommand, EditCommand, InfoCommand, ListCommand, NewCommand,
    ShowCommand,
};
use clap::{Parser, Subcommand};
use innkeep::Backend;
use std::path::PathBuf;

/// Command-line tool for managing hotel reservations.
#[derive(Parser)]
#[command(name = "innkeep")]
#[command(version, about = "Manage hotel reservations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "INNKEEP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Reservation backend to use
    #[arg(long, value_enum, global = true, env = "INNKEEP_BACKEND", ignore_case = true)]
    pub backend: Option<Backend>,

    /// Base URL of the reservation API (remote backend)
    #[arg(long, value_name = "URL", global = true, env = "INNKEEP_API_URL")]
    pub api_url: Option<String>,

    /// Storage slot name (local backend)
    #[arg(long, value_name = "NAME", global = true, env = "INNKEEP_STORAGE_SLOT")]
    pub storage_slot: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// List reservations
    List(ListCommand),

    /// Show one reservation
    Show(ShowCommand),

    /// Create a reservation
    New(NewCommand),

    /// Edit a reservation
    Edit(EditCommand),

    /// Delete a reservation
    Delete(DeleteCommand),

    /// Show the resolved configuration
    Info(InfoCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
