//! Catalog runtime configuration.
//!
//! # Responsibility
//! - Hold every tunable the catalog controller reads (paths, batch size,
//!   debounce delay, storage key, routes).
//! - Apply environment overrides on top of defaults.
//!
//! # Invariants
//! - `batch_size` is never zero.
//! - `allowed_routes` always contains `/`.

use log::warn;
use std::path::PathBuf;
use std::time::Duration;

/// Relative path of the bundled character catalog.
pub const DEFAULT_DATA_PATH: &str = "./data/greek_characters.json";
/// Number of cards rendered per "load more" step.
pub const DEFAULT_BATCH_SIZE: usize = 6;
/// Search input coalescing delay.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
/// Namespaced durable-storage key for the favorites set.
pub const FAVORITES_STORAGE_KEY: &str = "pantheon.favorites";
/// Destination used by the route guard for unknown fragments.
pub const NOT_FOUND_DESTINATION: &str = "404.html";
/// Upper bound on accepted records kept after load.
pub const DEFAULT_MAX_RECORDS: usize = 60;
/// Fraction of the viewport height a card top must be above to reveal.
pub const DEFAULT_REVEAL_RATIO: f64 = 0.9;

const KNOWN_ROUTES: &[&str] = &["/", "/characters", "/about"];

/// Env var overriding [`CatalogConfig::data_path`].
pub const ENV_DATA_PATH: &str = "PANTHEON_DATA_PATH";
/// Env var overriding [`CatalogConfig::db_path`].
pub const ENV_DB_PATH: &str = "PANTHEON_DB_PATH";
/// Env var overriding [`CatalogConfig::batch_size`].
pub const ENV_BATCH_SIZE: &str = "PANTHEON_BATCH_SIZE";

const DB_FILE_NAME: &str = "pantheon.sqlite3";

/// Controller configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    /// Record source file.
    pub data_path: PathBuf,
    /// SQLite file backing durable key-value storage.
    pub db_path: PathBuf,
    pub batch_size: usize,
    pub debounce: Duration,
    pub favorites_key: String,
    pub allowed_routes: Vec<String>,
    pub not_found_destination: String,
    /// `None` keeps every accepted record.
    pub max_records: Option<usize>,
    pub reveal_ratio: f64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            db_path: std::env::temp_dir().join(DB_FILE_NAME),
            batch_size: DEFAULT_BATCH_SIZE,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            favorites_key: FAVORITES_STORAGE_KEY.to_string(),
            allowed_routes: KNOWN_ROUTES.iter().map(|route| route.to_string()).collect(),
            not_found_destination: NOT_FOUND_DESTINATION.to_string(),
            max_records: Some(DEFAULT_MAX_RECORDS),
            reveal_ratio: DEFAULT_REVEAL_RATIO,
        }
    }
}

impl CatalogConfig {
    /// Defaults with `PANTHEON_*` environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary lookup; blank values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(path) = read(ENV_DATA_PATH) {
            self.data_path = PathBuf::from(path);
        }
        if let Some(path) = read(ENV_DB_PATH) {
            self.db_path = PathBuf::from(path);
        }
        if let Some(raw) = read(ENV_BATCH_SIZE) {
            match raw.parse::<usize>() {
                Ok(size) if size > 0 => self.batch_size = size,
                _ => warn!(
                    "event=config_override module=config status=error key={} value={}",
                    ENV_BATCH_SIZE, raw
                ),
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogConfig, DEFAULT_BATCH_SIZE, ENV_BATCH_SIZE, ENV_DATA_PATH};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn defaults_match_catalog_contract() {
        let config = CatalogConfig::default();
        assert_eq!(config.batch_size, 6);
        assert_eq!(config.debounce, Duration::from_millis(300));
        assert_eq!(config.max_records, Some(60));
        assert_eq!(config.allowed_routes, vec!["/", "/characters", "/about"]);
        assert_eq!(config.not_found_destination, "404.html");
    }

    #[test]
    fn overrides_apply_and_ignore_blank_or_invalid_values() {
        let env = HashMap::from([
            (ENV_DATA_PATH, " /srv/catalog.json ".to_string()),
            (ENV_BATCH_SIZE, "0".to_string()),
        ]);
        let config = CatalogConfig::default().with_overrides(|key| env.get(key).cloned());
        assert_eq!(config.data_path, PathBuf::from("/srv/catalog.json"));
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);

        let env = HashMap::from([(ENV_BATCH_SIZE, "9".to_string())]);
        let config = CatalogConfig::default().with_overrides(|key| env.get(key).cloned());
        assert_eq!(config.batch_size, 9);
    }
}
