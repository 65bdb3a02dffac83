//! Favorites ledger over durable key-value storage.
//!
//! # Responsibility
//! - Answer membership checks and toggle favorites by record id.
//! - Persist the full set after every toggle.
//!
//! # Invariants
//! - Storage is read on every check; there is no in-memory cache to go stale.
//! - Every toggle writes the complete, de-duplicated id array in one `set`.
//! - Ids are never pruned, even if their record disappears from the catalog.
//! - A corrupt stored payload reads as an empty set.

use crate::model::record::RecordId;
use crate::repo::kv_repo::{KvRepository, RepoError};
use log::{info, warn};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Favorites persistence failure.
#[derive(Debug)]
pub enum FavoritesError {
    Repo(RepoError),
    Encode(serde_json::Error),
}

impl Display for FavoritesError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode favorites: {err}"),
        }
    }
}

impl Error for FavoritesError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<RepoError> for FavoritesError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub type FavoritesResult<T> = Result<T, FavoritesError>;

/// Persisted set of favorited record ids.
pub struct FavoritesLedger<R: KvRepository> {
    repo: R,
    key: String,
}

impl<R: KvRepository> FavoritesLedger<R> {
    /// Creates a ledger storing its set under `key`.
    pub fn new(repo: R, key: impl Into<String>) -> Self {
        Self {
            repo,
            key: key.into(),
        }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn is_favorite(&self, id: &str) -> FavoritesResult<bool> {
        Ok(self.read_ids()?.iter().any(|stored| stored == id))
    }

    pub fn list_favorites(&self) -> FavoritesResult<BTreeSet<RecordId>> {
        Ok(self.read_ids()?.into_iter().collect())
    }

    /// Flips membership of `id` and persists the whole set immediately.
    ///
    /// Returns the new membership (`true` when `id` is now a favorite).
    pub fn toggle(&self, id: &str) -> FavoritesResult<bool> {
        let mut ids = self.read_ids()?;
        let now_favorite = match ids.iter().position(|stored| stored == id) {
            Some(index) => {
                ids.remove(index);
                false
            }
            None => {
                ids.push(id.to_string());
                true
            }
        };

        let payload = serde_json::to_string(&ids).map_err(FavoritesError::Encode)?;
        self.repo.set(&self.key, &payload)?;
        info!(
            "event=favorite_toggle module=favorites status=ok favorite={} count={}",
            now_favorite,
            ids.len()
        );
        Ok(now_favorite)
    }

    /// Stored ids in insertion order.
    fn read_ids(&self) -> FavoritesResult<Vec<RecordId>> {
        let Some(payload) = self.repo.get(&self.key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<RecordId>>(&payload) {
            Ok(ids) => {
                let mut seen = BTreeSet::new();
                Ok(ids.into_iter().filter(|id| seen.insert(id.clone())).collect())
            }
            Err(err) => {
                warn!(
                    "event=favorites_read module=favorites status=error key={} error={}",
                    self.key, err
                );
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FavoritesLedger;
    use crate::repo::kv_repo::{KvRepository, MemoryKvRepository};

    const KEY: &str = "pantheon.favorites";

    #[test]
    fn toggle_twice_restores_membership_and_persists_each_step() {
        let ledger = FavoritesLedger::new(MemoryKvRepository::new(), KEY);
        assert!(!ledger.is_favorite("zeus-01").expect("read"));

        assert!(ledger.toggle("zeus-01").expect("toggle on"));
        assert!(ledger.is_favorite("zeus-01").expect("read"));
        assert_eq!(
            ledger.repo().get(KEY).expect("get").as_deref(),
            Some("[\"zeus-01\"]")
        );

        assert!(!ledger.toggle("zeus-01").expect("toggle off"));
        assert!(!ledger.is_favorite("zeus-01").expect("read"));
        assert_eq!(ledger.repo().get(KEY).expect("get").as_deref(), Some("[]"));
    }

    #[test]
    fn reads_shared_storage_on_every_check() {
        let repo = MemoryKvRepository::new();
        let ledger = FavoritesLedger::new(&repo, KEY);
        repo.set(KEY, "[\"hera-01\",\"hera-01\",\"stale-99\"]")
            .expect("seed storage");

        let favorites = ledger.list_favorites().expect("list");
        assert_eq!(favorites.len(), 2);
        assert!(favorites.contains("stale-99"));
        assert!(ledger.is_favorite("hera-01").expect("read"));
    }

    #[test]
    fn corrupt_payload_reads_as_empty_and_is_replaced_on_toggle() {
        let repo = MemoryKvRepository::new();
        repo.set(KEY, "{not json").expect("seed storage");
        let ledger = FavoritesLedger::new(&repo, KEY);

        assert!(ledger.list_favorites().expect("list").is_empty());
        assert!(ledger.toggle("ares-01").expect("toggle"));
        assert_eq!(
            repo.get(KEY).expect("get").as_deref(),
            Some("[\"ares-01\"]")
        );
    }
}
