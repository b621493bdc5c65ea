//! Linear startup: config, connect, ping, schema.
//!
//! # Invariants
//! - Steps run strictly in order and stop at the first failure.
//! - A failed connect or ping never reaches schema creation.

use crate::config::{load_config, AppConfig, ConfigError};
use crate::db::{DbError, Gateway};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Fatal startup failures; each one ends the process before a window opens.
#[derive(Debug)]
pub enum StartupError {
    Config(ConfigError),
    Connect(DbError),
    Ping(DbError),
    Schema(DbError),
}

impl Display for StartupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err @ ConfigError::Read { .. }) => {
                write!(f, "Error opening config file: {err}")
            }
            Self::Config(err @ ConfigError::Parse { .. }) => {
                write!(f, "Error decoding config file: {err}")
            }
            Self::Connect(err) | Self::Ping(err) => {
                write!(f, "Error connecting to the database: {err}")
            }
            Self::Schema(err) => write!(f, "Error creating schema: {err}"),
        }
    }
}

impl Error for StartupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Connect(err) | Self::Ping(err) | Self::Schema(err) => Some(err),
        }
    }
}

impl From<ConfigError> for StartupError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

/// Loads `config_path` and returns a gateway with the schema applied.
pub fn bootstrap(config_path: impl AsRef<Path>) -> Result<Gateway, StartupError> {
    let config = load_config(config_path)?;
    open_store(&config)
}

/// Connect, ping and schema steps for an already loaded config.
pub fn open_store(config: &AppConfig) -> Result<Gateway, StartupError> {
    let mut gateway = Gateway::connect(&config.database()).map_err(StartupError::Connect)?;
    gateway.ping().map_err(StartupError::Ping)?;
    gateway.create_schema().map_err(StartupError::Schema)?;
    Ok(gateway)
}
