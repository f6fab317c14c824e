//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `list`: List reservations
//! - `show`: Show one reservation
//! - `new`: Create a reservation through the reservation form
//! - `edit`: Change an existing reservation
//! - `delete`: Delete a reservation after confirmation
//! - `info`: Show the resolved configuration
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod delete;
pub mod edit;
pub mod info;
pub mod list;
pub mod new;
pub mod show;

pub use completions::CompletionsCommand;
pub use delete::DeleteCommand;
pub use edit::EditCommand;
pub use info::InfoCommand;
pub use list::ListCommand;
pub use new::NewCommand;
pub use show::ShowCommand;
