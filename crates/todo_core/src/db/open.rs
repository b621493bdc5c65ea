//! One-step open helpers for tests and tooling.
//!
//! # Invariants
//! - Returned connections have the schema fully applied.

use super::gateway::Gateway;
use super::DbResult;
use crate::config::DatabaseConfig;
use rusqlite::Connection;
use std::path::Path;

/// Opens a SQLite database file and applies the schema.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    let config = match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => DatabaseConfig {
            database_name: name.to_string_lossy().into_owned(),
            address: parent.to_string_lossy().into_owned(),
            ..DatabaseConfig::default()
        },
        _ => DatabaseConfig {
            database_name: path.to_string_lossy().into_owned(),
            ..DatabaseConfig::default()
        },
    };
    let mut gateway = Gateway::connect(&config)?;
    gateway.create_schema()?;
    Ok(gateway.into_connection())
}

/// Opens an in-memory SQLite database and applies the schema.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let mut gateway = Gateway::in_memory()?;
    gateway.create_schema()?;
    Ok(gateway.into_connection())
}
