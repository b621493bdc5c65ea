//! JSON configuration loader.
//!
//! # Responsibility
//! - Read `config.json` into a two-level string map.
//! - Expose the `database` section as typed connection settings.
//!
//! # Invariants
//! - Missing keys are not validated; they resolve to empty strings.
//! - Only the `database` section is consumed.

use log::{error, info, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::path::{Path, PathBuf};

/// Config file name, resolved against the process working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

const DATABASE_SECTION: &str = "database";
const KEY_USER: &str = "user";
const KEY_PASSWORD: &str = "password";
const KEY_DATABASE_NAME: &str = "databaseName";
const KEY_ADDRESS: &str = "address";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    /// File missing or unreadable.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Malformed JSON, or JSON that is not a map of string maps.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Parse { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Whole decoded config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AppConfig {
    sections: HashMap<String, HashMap<String, String>>,
}

impl AppConfig {
    /// Decodes config text without touching the filesystem.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Returns one raw section, if present.
    pub fn section(&self, name: &str) -> Option<&HashMap<String, String>> {
        self.sections.get(name)
    }

    /// Extracts the `database` section.
    ///
    /// Absent section or keys produce empty strings.
    pub fn database(&self) -> DatabaseConfig {
        let Some(section) = self.section(DATABASE_SECTION) else {
            warn!("event=config_database module=config status=missing_section");
            return DatabaseConfig::default();
        };

        let missing: Vec<&str> = [KEY_USER, KEY_PASSWORD, KEY_DATABASE_NAME, KEY_ADDRESS]
            .into_iter()
            .filter(|key| !section.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            warn!(
                "event=config_database module=config status=missing_keys keys={}",
                missing.join(",")
            );
        }

        let value = |key: &str| section.get(key).cloned().unwrap_or_default();
        DatabaseConfig {
            user: value(KEY_USER),
            password: value(KEY_PASSWORD),
            database_name: value(KEY_DATABASE_NAME),
            address: value(KEY_ADDRESS),
        }
    }
}

/// Connection settings from the `database` section.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub user: String,
    pub password: String,
    /// Database file name; `:memory:` selects a private in-memory store.
    pub database_name: String,
    /// Directory that holds the database file; empty means working directory.
    pub address: String,
}

impl Debug for DatabaseConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database_name", &self.database_name)
            .field("address", &self.address)
            .finish()
    }
}

/// Reads and decodes the config file at `path`.
///
/// # Errors
/// - `ConfigError::Read` when the file cannot be read.
/// - `ConfigError::Parse` when the content is not a JSON map of string maps.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<AppConfig> {
    let path = path.as_ref();

    let text = std::fs::read_to_string(path).map_err(|source| {
        error!(
            "event=config_load module=config status=error error_code=config_read_failed path={} error={}",
            path.display(),
            source
        );
        ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let config = AppConfig::from_json_str(&text).map_err(|source| {
        error!(
            "event=config_load module=config status=error error_code=config_parse_failed path={} error={}",
            path.display(),
            source
        );
        ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })?;

    info!(
        "event=config_load module=config status=ok path={} sections={}",
        path.display(),
        config.sections.len()
    );
    Ok(config)
}
