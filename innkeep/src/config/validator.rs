//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use innkeep::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { api_url: Some("ftp://files".into()), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref url) = config.api_url {
            Self::validate_api_url(url)?;
        }

        if let Some(ref slot) = config.storage_slot {
            Self::validate_storage_slot(slot)?;
        }

        if let Some(timeout) = config.request_timeout_seconds {
            if timeout == 0 {
                return Err(Error::Validation {
                    field: "request_timeout_seconds".into(),
                    message: "Timeout must be greater than 0".into(),
                });
            }
        }

        Ok(())
    }

    /// An API URL must be absolute http(s).
    ///
    /// # Errors
    ///
    /// Returns a validation error for any other scheme or a missing host.
    pub fn validate_api_url(url: &str) -> Result<()> {
        let rest = url
            .strip_prefix("http://")
            .or_else(|| url.strip_prefix("https://"))
            .ok_or_else(|| Error::Validation {
                field: "api_url".into(),
                message: format!("'{url}' must start with http:// or https://"),
            })?;

        if rest.is_empty() || rest.starts_with('/') {
            return Err(Error::Validation {
                field: "api_url".into(),
                message: format!("'{url}' has no host"),
            });
        }

        Ok(())
    }

    /// A storage slot becomes a file name, so it must be non-empty and use
    /// only ASCII letters, digits, `-`, `_` and `.`, and must not start with
    /// a dot.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is unusable.
    pub fn validate_storage_slot(slot: &str) -> Result<()> {
        if slot.is_empty() {
            return Err(Error::Validation {
                field: "storage_slot".into(),
                message: "Cannot be empty".into(),
            });
        }

        if slot.starts_with('.') {
            return Err(Error::Validation {
                field: "storage_slot".into(),
                message: format!("'{slot}' cannot start with '.'"),
            });
        }

        if let Some(bad) = slot
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
        {
            return Err(Error::Validation {
                field: "storage_slot".into(),
                message: format!("'{slot}' contains invalid character '{bad}'"),
            });
        }

        Ok(())
    }
}
