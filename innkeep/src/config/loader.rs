//! Finding and reading configuration files.
//!
//! Two files are looked for: the user file in the data directory and the
//! nearest project file at or above the working directory. Either may be
//! absent; a file that exists but does not parse is an error.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-project configuration file.
pub const PROJECT_CONFIG_FILE: &str = "innkeep.yaml";

/// Name of the user configuration file inside the data directory.
pub const USER_CONFIG_FILE: &str = "config.yaml";

/// Where a configuration file came from. Later variants override earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigOrigin {
    /// `<data_dir>/config.yaml`.
    User,
    /// The nearest `innkeep.yaml`.
    Project,
}

/// One parsed configuration file.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// File the values were read from.
    pub path: PathBuf,
    /// Which layer the file belongs to.
    pub origin: ConfigOrigin,
    /// Parsed values.
    pub config: Config,
}

/// Reads configuration files from disk.
///
/// ```no_run
/// use innkeep::config::ConfigLoader;
/// use std::path::Path;
///
/// for source in ConfigLoader::load_all(Path::new("."), None).unwrap() {
///     println!("{:?}: {}", source.origin, source.path.display());
/// }
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Every configuration file that applies, lowest precedence first.
    ///
    /// Without `data_dir` the user file is looked up in the default data
    /// directory.
    ///
    /// # Errors
    ///
    /// Fails if a file exists but cannot be read or parsed, or if no data
    /// directory was given and the home directory is unknown.
    pub fn load_all(working_dir: &Path, data_dir: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let user_dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => crate::config::default_data_dir()?,
        };

        let mut sources: Vec<ConfigSource> = [
            Self::load_optional(&user_dir.join(USER_CONFIG_FILE), ConfigOrigin::User)?,
            Self::discover_project_config(working_dir)?,
        ]
        .into_iter()
        .flatten()
        .collect();

        sources.sort_by_key(|source| source.origin);
        Ok(sources)
    }

    /// The nearest `innkeep.yaml` in `start_dir` or any of its ancestors.
    ///
    /// # Errors
    ///
    /// Fails if the file found cannot be read or parsed.
    pub fn discover_project_config(start_dir: &Path) -> Result<Option<ConfigSource>> {
        match start_dir
            .ancestors()
            .map(|dir| dir.join(PROJECT_CONFIG_FILE))
            .find(|candidate| candidate.is_file())
        {
            Some(path) => Self::load_optional(&path, ConfigOrigin::Project),
            None => Ok(None),
        }
    }

    /// Parses one YAML file.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPath`] if the file cannot be read,
    /// [`Error::Validation`] if it is not a valid configuration.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("cannot read configuration: {e}"),
        })?;

        serde_yaml::from_str(&contents).map_err(|e| Error::Validation {
            field: path.display().to_string(),
            message: format!("not a valid innkeep configuration: {e}"),
        })
    }

    fn load_optional(path: &Path, origin: ConfigOrigin) -> Result<Option<ConfigSource>> {
        if !path.is_file() {
            return Ok(None);
        }
        log::debug!("Reading {origin:?} configuration from {}", path.display());
        Ok(Some(ConfigSource {
            path: path.to_path_buf(),
            origin,
            config: Self::load_file(path)?,
        }))
    }
}
