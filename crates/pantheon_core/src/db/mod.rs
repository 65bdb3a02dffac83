//! SQLite bootstrap for durable key-value storage.
//!
//! # Responsibility
//! - Open and configure SQLite connections used by favorites persistence.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - No key-value reads or writes happen before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while bringing the key-value database up.
#[derive(Debug)]
pub enum DbError {
    /// Opening or configuring the connection to `target` failed.
    Open {
        target: String,
        error: rusqlite::Error,
    },
    /// Moving the schema to `version` failed; the transaction was rolled back.
    Migration {
        version: u32,
        error: rusqlite::Error,
    },
    /// The file was written by a newer build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { target, error } => {
                write!(f, "cannot open favorites database `{target}`: {error}")
            }
            Self::Migration { version, error } => {
                write!(f, "favorites schema migration to v{version} failed: {error}")
            }
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "favorites database schema v{db_version} is newer than supported v{latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { error, .. } | Self::Migration { error, .. } => Some(error),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}
