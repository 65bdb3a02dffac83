//! In-memory record store.
//!
//! # Responsibility
//! - Hold `all` records in load order and the current `visible` view.
//! - Answer id lookups for cards, favorites and deep links.
//!
//! # Invariants
//! - `all` only changes through [`RecordStore::load`].
//! - `visible` is replaced wholesale, never patched.

use crate::logging::sanitize_message;
use crate::model::record::{Record, RecordId};
use crate::search::filter::{compute_visible, FilterCriteria};
use crate::store::source::{LoadError, RecordSource};
use log::{error, info};
use std::collections::{BTreeSet, HashSet};

/// Owner of the loaded catalog and its visible subset.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    all: Vec<Record>,
    visible: Vec<Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from already accepted records. `visible` starts equal to
    /// `all`.
    #[cfg(test)]
    pub(crate) fn from_records(records: Vec<Record>) -> Self {
        Self {
            visible: records.clone(),
            all: records,
        }
    }

    /// Loads records from `source`, replacing any previous contents.
    ///
    /// Records failing the acceptance gate are dropped; at most `max_records`
    /// accepted records are kept. Returns the accepted count.
    ///
    /// # Errors
    /// Returns [`LoadError`] when the fetch or parse fails. The store is left
    /// empty in that case.
    pub fn load(
        &mut self,
        source: &dyn RecordSource,
        max_records: Option<usize>,
    ) -> Result<usize, LoadError> {
        self.all.clear();
        self.visible.clear();

        let document = match source.load_document() {
            Ok(document) => document,
            Err(err) => {
                error!(
                    "event=records_load module=store status=error source={} error={}",
                    source.describe(),
                    sanitize_message(&err.to_string(), 200)
                );
                return Err(err);
            }
        };

        let total = document.characters.len();
        let accepted = document
            .characters
            .into_iter()
            .filter_map(Record::from_raw)
            .take(max_records.unwrap_or(usize::MAX))
            .collect::<Vec<_>>();

        info!(
            "event=records_load module=store status=ok source={} total={} accepted={}",
            source.describe(),
            total,
            accepted.len()
        );

        self.visible = accepted.clone();
        self.all = accepted;
        Ok(self.all.len())
    }

    /// Full accepted set in load order.
    pub fn all(&self) -> &[Record] {
        &self.all
    }

    /// Current filtered and sorted view.
    pub fn visible(&self) -> &[Record] {
        &self.visible
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Recomputes `visible` from `all` under `criteria`.
    pub fn apply(&mut self, criteria: &FilterCriteria) -> &[Record] {
        self.visible = compute_visible(&self.all, criteria);
        &self.visible
    }

    pub fn find(&self, id: &str) -> Option<&Record> {
        self.all.iter().find(|record| record.id == id)
    }

    /// Index of `id` inside the visible view.
    pub fn position_in_visible(&self, id: &str) -> Option<usize> {
        self.visible.iter().position(|record| record.id == id)
    }

    /// Records whose id is in `ids`, in load order.
    pub fn select<'a>(&'a self, ids: &'a BTreeSet<RecordId>) -> impl Iterator<Item = &'a Record> {
        self.all.iter().filter(move |record| ids.contains(&record.id))
    }

    /// Distinct category tags in first-seen order.
    pub fn distinct_categories(&self) -> Vec<String> {
        first_seen(self.all.iter().flat_map(|record| record.categories.iter()))
    }

    /// Distinct non-empty eras in first-seen order.
    pub fn distinct_eras(&self) -> Vec<String> {
        first_seen(
            self.all
                .iter()
                .map(|record| &record.era)
                .filter(|era| !era.is_empty()),
        )
    }
}

fn first_seen<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|value| seen.insert(value.as_str()))
        .cloned()
        .collect()
}
