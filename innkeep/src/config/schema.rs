//! Configuration schema definitions.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default base URL of the reservation API.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Default storage slot for the local backend.
pub const DEFAULT_STORAGE_SLOT: &str = "reservations";

/// Default HTTP request timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Which reservation store to use.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum Backend {
    /// JSON file in the data directory.
    #[default]
    Local,
    /// REST API.
    Remote,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

/// Complete configuration structure.
///
/// Every field is optional so that partial configurations from several
/// sources can be layered; the accessor methods supply defaults.
///
/// # Examples
///
/// ```
/// use innkeep::config::{Backend, Config};
///
/// let config = Config {
///     backend: Some(Backend::Remote),
///     api_url: Some("http://hotel.internal:8080".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(config.backend(), Backend::Remote);
/// assert_eq!(config.storage_slot(), "reservations");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Reservation store to use.
    pub backend: Option<Backend>,

    /// Base URL of the reservation API (remote backend).
    pub api_url: Option<String>,

    /// Storage slot name (local backend).
    pub storage_slot: Option<String>,

    /// Directory holding local storage slots.
    pub data_dir: Option<PathBuf>,

    /// HTTP request timeout in seconds (remote backend).
    pub request_timeout_seconds: Option<u64>,
}

impl Config {
    /// The selected backend.
    #[must_use]
    pub fn backend(&self) -> Backend {
        self.backend.unwrap_or_default()
    }

    /// The API base URL.
    #[must_use]
    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// The local storage slot name.
    #[must_use]
    pub fn storage_slot(&self) -> &str {
        self.storage_slot.as_deref().unwrap_or(DEFAULT_STORAGE_SLOT)
    }

    /// The HTTP request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_seconds
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECONDS),
        )
    }

    /// The data directory, falling back to `~/.innkeep`.
    ///
    /// # Errors
    ///
    /// Returns an error if no directory is configured and the home directory
    /// cannot be determined.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => super::default_data_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend(), Backend::Local);
        assert_eq!(config.api_url(), DEFAULT_API_URL);
        assert_eq!(config.storage_slot(), DEFAULT_STORAGE_SLOT);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let yaml = "backend: remote\napi_url: http://example.com\nrequest_timeout_seconds: 5\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.backend(), Backend::Remote);
        assert_eq!(config.api_url(), "http://example.com");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: std::result::Result<Config, _> = serde_yaml::from_str("colour: blue\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let result: std::result::Result<Config, _> = serde_yaml::from_str("backend: carrier-pigeon\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_data_dir() {
        let config = Config {
            data_dir: Some(PathBuf::from("/srv/innkeep")),
            ..Default::default()
        };
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/srv/innkeep"));
    }
}
