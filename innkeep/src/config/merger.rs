//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use innkeep::config::{Config, ConfigMerger};
///
/// let low = Config { storage_slot: Some("low".to_string()), ..Default::default() };
/// let high = Config { storage_slot: Some("high".to_string()), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.storage_slot, Some("high".to_string()));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();

        for source in sources {
            log::debug!(
                "Applying {:?} configuration from {}",
                source.origin,
                source.path.display()
            );
            Self::merge_into(&mut result, &source.config);
        }

        result
    }

    /// Merge source config into target. Every field present in `source`
    /// overwrites the target's value.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.backend.is_some() {
            target.backend = source.backend;
        }

        if source.api_url.is_some() {
            target.api_url.clone_from(&source.api_url);
        }

        if source.storage_slot.is_some() {
            target.storage_slot.clone_from(&source.storage_slot);
        }

        if source.data_dir.is_some() {
            target.data_dir.clone_from(&source.data_dir);
        }

        if source.request_timeout_seconds.is_some() {
            target.request_timeout_seconds = source.request_timeout_seconds;
        }
    }
}
