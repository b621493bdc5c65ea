//! The single store connection used by every task operation.
//!
//! # Responsibility
//! - Translate `DatabaseConfig` into a SQLite target and open it.
//! - Provide the liveness check and the idempotent schema step.
//!
//! # Invariants
//! - Exactly one connection per gateway; no pooling, retry or reconnection.
//! - `connect` never creates the schema; callers run `create_schema` after
//!   a successful `ping`.
//! - The target directory is never created implicitly.

use super::migrations::apply_migrations;
use super::DbResult;
use crate::config::DatabaseConfig;
use log::{error, info};
use rusqlite::{Connection, OpenFlags};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

const MEMORY_DATABASE_NAME: &str = ":memory:";

/// Where the gateway's connection points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbTarget {
    Memory,
    File(PathBuf),
}

impl DbTarget {
    fn mode(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::File(_) => "file",
        }
    }
}

impl Display for DbTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => write!(f, "{MEMORY_DATABASE_NAME}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Maps `address` (directory) and `databaseName` (file) onto a target.
pub fn resolve_target(config: &DatabaseConfig) -> DbTarget {
    if config.database_name == MEMORY_DATABASE_NAME {
        return DbTarget::Memory;
    }
    if config.address.is_empty() {
        return DbTarget::File(PathBuf::from(&config.database_name));
    }
    DbTarget::File(Path::new(&config.address).join(&config.database_name))
}

/// Owner of the one connection shared serially by all store operations.
#[derive(Debug)]
pub struct Gateway {
    conn: Connection,
    target: DbTarget,
}

impl Gateway {
    /// Opens the connection described by `config`.
    ///
    /// `user` is recorded in the log event; SQLite has no authentication so
    /// credentials do not take part in the open.
    pub fn connect(config: &DatabaseConfig) -> DbResult<Self> {
        let target = resolve_target(config);
        let started_at = Instant::now();
        info!(
            "event=db_connect module=db status=start mode={} target={} user={}",
            target.mode(),
            target,
            config.user
        );

        match Self::open_target(&target) {
            Ok(conn) => {
                info!(
                    "event=db_connect module=db status=ok mode={} duration_ms={}",
                    target.mode(),
                    started_at.elapsed().as_millis()
                );
                Ok(Self { conn, target })
            }
            Err(err) => {
                error!(
                    "event=db_connect module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                    target.mode(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }

    /// Opens a private in-memory gateway.
    pub fn in_memory() -> DbResult<Self> {
        Self::connect(&DatabaseConfig {
            database_name: MEMORY_DATABASE_NAME.to_string(),
            ..DatabaseConfig::default()
        })
    }

    fn open_target(target: &DbTarget) -> rusqlite::Result<Connection> {
        match target {
            DbTarget::Memory => Connection::open_in_memory(),
            DbTarget::File(path) => Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_WRITE
                    | OpenFlags::SQLITE_OPEN_CREATE
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            ),
        }
    }

    /// Liveness check: one trivial round trip.
    pub fn ping(&self) -> DbResult<()> {
        match self.conn.query_row("SELECT 1;", [], |row| row.get::<_, i64>(0)) {
            Ok(_) => {
                info!("event=db_ping module=db status=ok");
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=db_ping module=db status=error error_code=db_ping_failed error={}",
                    err
                );
                Err(err.into())
            }
        }
    }

    /// Ensures the `tasks` table exists. Safe to call repeatedly.
    pub fn create_schema(&mut self) -> DbResult<()> {
        let started_at = Instant::now();
        match apply_migrations(&mut self.conn) {
            Ok(()) => {
                info!(
                    "event=db_schema module=db status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=db_schema module=db status=error duration_ms={} error_code=db_schema_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn target(&self) -> &DbTarget {
        &self.target
    }

    pub fn into_connection(self) -> Connection {
        self.conn
    }
}
