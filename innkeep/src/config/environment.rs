//! Environment variable handling for configuration overrides.
//!
//! This module provides support for INNKEEP_* environment variables that
//! override configuration file values.

use crate::config::schema::{Backend, Config};
use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use innkeep::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., unknown backend, non-numeric timeout).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(val) = env::var("INNKEEP_BACKEND") {
            config.backend = Some(Self::parse_backend("INNKEEP_BACKEND", &val)?);
        }

        if let Ok(url) = env::var("INNKEEP_API_URL") {
            config.api_url = Some(url);
        }

        if let Ok(slot) = env::var("INNKEEP_STORAGE_SLOT") {
            config.storage_slot = Some(slot);
        }

        if let Ok(dir) = env::var("INNKEEP_DATA_DIR") {
            config.data_dir = Some(PathBuf::from(dir));
        }

        if let Ok(seconds) = env::var("INNKEEP_REQUEST_TIMEOUT_SECONDS") {
            config.request_timeout_seconds =
                Some(seconds.trim().parse().map_err(|_| Error::Validation {
                    field: "INNKEEP_REQUEST_TIMEOUT_SECONDS".into(),
                    message: "Must be a positive integer".into(),
                })?);
        }

        Ok(())
    }

    /// Parse a backend name (case-insensitive).
    fn parse_backend(field: &str, s: &str) -> Result<Backend> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Backend::Local),
            "remote" => Ok(Backend::Remote),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!("Invalid backend: '{s}' (expected local or remote)"),
            }),
        }
    }
}
