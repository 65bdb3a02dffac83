//! Durable key-value storage contracts and implementations.
//!
//! # Responsibility
//! - Provide the get/set capability that favorites persistence relies on.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `set` replaces the whole value for a key atomically.
//! - Reading a key that was never written returns `None`, not an error.

use crate::db::{open_db, open_db_in_memory, DbError};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type RepoResult<T> = Result<T, RepoError>;

/// Key-value storage failure.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidKey(String),
    /// Reading `key` failed.
    Read { key: String, error: rusqlite::Error },
    /// Writing `key` failed; the previous value is untouched.
    Write { key: String, error: rusqlite::Error },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidKey(key) => write!(f, "invalid storage key: `{key}`"),
            Self::Read { key, error } => write!(f, "reading `{key}` failed: {error}"),
            Self::Write { key, error } => write!(f, "writing `{key}` failed: {error}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidKey(_) => None,
            Self::Read { error, .. } | Self::Write { error, .. } => Some(error),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

/// Synchronous durable key-value capability.
pub trait KvRepository {
    fn get(&self, key: &str) -> RepoResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> RepoResult<()>;
}

impl<T: KvRepository + ?Sized> KvRepository for &T {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).set(key, value)
    }
}

/// SQLite-backed key-value storage. Owns its connection.
pub struct SqliteKvRepository {
    conn: Connection,
}

impl SqliteKvRepository {
    /// Wraps an already migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Opens a database file, applying migrations first.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    pub fn open_in_memory() -> RepoResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }
}

impl KvRepository for SqliteKvRepository {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let key = validate_key(key)?;
        self.conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|error| RepoError::Read {
                key: key.to_string(),
                error,
            })
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        let key = validate_key(key)?;
        self.conn
            .execute(
                "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = (strftime('%s', 'now') * 1000);",
                params![key, value],
            )
            .map(|_| ())
            .map_err(|error| RepoError::Write {
                key: key.to_string(),
                error,
            })
    }
}

/// Process-local key-value storage.
#[derive(Debug, Default)]
pub struct MemoryKvRepository {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryKvRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvRepository for MemoryKvRepository {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let key = validate_key(key)?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        let key = validate_key(key)?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn validate_key(key: &str) -> RepoResult<&str> {
    let trimmed = key.trim();
    if trimmed.is_empty() || trimmed.len() != key.len() {
        return Err(RepoError::InvalidKey(key.to_string()));
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::{KvRepository, MemoryKvRepository, RepoError, SqliteKvRepository};
    use rusqlite::Connection;

    #[test]
    fn sqlite_set_replaces_previous_value() {
        let repo = SqliteKvRepository::open_in_memory().expect("in-memory repo");
        assert_eq!(repo.get("pantheon.favorites").expect("get"), None);

        repo.set("pantheon.favorites", "[\"zeus-01\"]").expect("first set");
        repo.set("pantheon.favorites", "[]").expect("second set");
        assert_eq!(
            repo.get("pantheon.favorites").expect("get").as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn sql_failures_name_the_key() {
        // No migrations applied, so `kv_entries` does not exist.
        let repo = SqliteKvRepository::new(Connection::open_in_memory().expect("raw connection"));

        match repo.set("pantheon.favorites", "[]") {
            Err(RepoError::Write { key, .. }) => assert_eq!(key, "pantheon.favorites"),
            other => panic!("expected write failure, got {other:?}"),
        }
        let err = repo.get("pantheon.favorites").expect_err("read must fail");
        assert!(matches!(&err, RepoError::Read { key, .. } if key == "pantheon.favorites"));
        assert!(err.to_string().starts_with("reading `pantheon.favorites` failed"));
    }

    #[test]
    fn memory_repo_round_trips_through_reference() {
        let repo = MemoryKvRepository::new();
        let by_ref = &repo;
        by_ref.set("k", "v").expect("set");
        assert_eq!(repo.get("k").expect("get").as_deref(), Some("v"));
    }

    #[test]
    fn rejects_blank_or_padded_keys() {
        let repo = MemoryKvRepository::new();
        assert!(matches!(repo.get("  "), Err(RepoError::InvalidKey(_))));
        assert!(matches!(repo.set(" k", "v"), Err(RepoError::InvalidKey(_))));
    }
}
