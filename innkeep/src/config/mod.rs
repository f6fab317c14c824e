//! Configuration system for innkeep.
//!
//! Configuration is merged from several sources. From highest to lowest
//! precedence:
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`INNKEEP_*`)
//! 3. Project config (nearest `innkeep.yaml` at or above the working directory)
//! 4. User config (`~/.innkeep/config.yaml`)
//! 5. Built-in defaults
//!
//! # Examples
//!
//! ```
//! use innkeep::config::{Backend, Config, ConfigBuilder};
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(Config {
//!         backend: Some(Backend::Remote),
//!         ..Default::default()
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.backend(), Backend::Remote);
//! assert_eq!(config.api_url(), "http://localhost:3000");
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

use std::path::PathBuf;

use crate::error::{Error, Result};

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigOrigin, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Backend, Config};
pub use validator::ConfigValidator;

/// Returns the default data directory, `~/.innkeep`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(".innkeep"))
        .ok_or_else(|| Error::Validation {
            field: "home_directory".into(),
            message: "Cannot determine home directory".into(),
        })
}
