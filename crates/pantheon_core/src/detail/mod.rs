//! Detail overlay state machine and deep-link handling.
//!
//! # Responsibility
//! - Track whether the overlay is closed, open on one record, or poisoned by
//!   an unknown deep-link id.
//! - Describe every consequence of a transition as [`DetailEffect`] values so
//!   callers apply them to their surface and navigator.
//!
//! # Invariants
//! - `Poisoned` is terminal for the page view; every operation is a no-op
//!   once it is reached.
//! - Replayed opens (derived from the URL) never add a history entry.
//! - Opening an unknown id outside the URL path changes nothing.

use crate::model::record::{Record, RecordId};
use crate::store::record_store::RecordStore;
use crate::view::card::{palette_class, PALETTE};
use crate::view::stars::generate_stars;
use log::{info, warn};
use serde::Serialize;

/// Message shown when a deep link names an unknown record.
pub const NOT_FOUND_MESSAGE: &str = "Character not found";

/// Overlay state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetailState {
    #[default]
    Closed,
    Open(RecordId),
    /// An invalid deep link locked rendering for the rest of the page view.
    Poisoned,
}

/// How an open was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// User action: records a new history entry.
    Navigate,
    /// Derived from the current URL: history is left alone.
    Replay,
}

/// Populated overlay slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailView {
    pub id: RecordId,
    pub name: String,
    pub title: String,
    pub description: String,
    /// `Domain: <value>`
    pub domain_line: String,
    /// `Symbol: <value>`
    pub symbol_line: String,
    pub stars: String,
    pub image: String,
    /// Palette class of the card the overlay was opened from.
    pub color: String,
}

impl DetailView {
    pub fn build(record: &Record, color: &str) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
            domain_line: format!("Domain: {}", record.domain),
            symbol_line: format!("Symbol: {}", record.symbol),
            stars: generate_stars(record.rank),
            image: record.image_or_empty().to_string(),
            color: color.to_string(),
        }
    }
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailEffect {
    ShowOverlay(DetailView),
    HideOverlay,
    /// Push a new entry with `character=<id>`.
    PushCharacter(RecordId),
    /// Push a new entry without the `character` parameter.
    PushWithoutCharacter,
    /// Strip the `character` parameter from the current entry in place.
    ReplaceWithoutCharacter,
    /// Hide cards and load-more, show [`NOT_FOUND_MESSAGE`].
    LockRendering,
}

/// Owner of [`DetailState`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailController {
    state: DetailState,
}

impl DetailController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn is_poisoned(&self) -> bool {
        self.state == DetailState::Poisoned
    }

    pub fn open_id(&self) -> Option<&str> {
        match &self.state {
            DetailState::Open(id) => Some(id),
            _ => None,
        }
    }

    /// Opens the overlay on `id` with the caller's palette `color`.
    pub fn open(
        &mut self,
        store: &RecordStore,
        id: &str,
        color: &str,
        mode: OpenMode,
    ) -> Vec<DetailEffect> {
        if self.is_poisoned() {
            return Vec::new();
        }
        let Some(record) = store.find(id) else {
            return Vec::new();
        };

        self.state = DetailState::Open(record.id.clone());
        let mut effects = vec![DetailEffect::ShowOverlay(DetailView::build(record, color))];
        if mode == OpenMode::Navigate {
            effects.push(DetailEffect::PushCharacter(record.id.clone()));
        }
        effects
    }

    /// Hides the overlay and pushes an entry without the deep link.
    pub fn close(&mut self) -> Vec<DetailEffect> {
        match self.state {
            DetailState::Open(_) => {
                self.state = DetailState::Closed;
                vec![DetailEffect::HideOverlay, DetailEffect::PushWithoutCharacter]
            }
            DetailState::Closed | DetailState::Poisoned => Vec::new(),
        }
    }

    /// Page-load deep-link replay for the `character` parameter value.
    pub fn open_from_url(&mut self, store: &RecordStore, param: Option<&str>) -> Vec<DetailEffect> {
        if self.is_poisoned() {
            return Vec::new();
        }
        let Some(id) = param else {
            return Vec::new();
        };

        if store.find(id).is_none() {
            warn!(
                "event=deep_link module=detail status=error reason=unknown_id id={}",
                crate::logging::sanitize_message(id, 64)
            );
            self.state = DetailState::Poisoned;
            return vec![
                DetailEffect::ReplaceWithoutCharacter,
                DetailEffect::LockRendering,
            ];
        }

        info!("event=deep_link module=detail status=ok");
        let color = replay_color(store, id);
        self.open(store, id, color, OpenMode::Replay)
    }

    /// Re-derives the overlay from the URL after back/forward navigation.
    pub fn sync_with_url(&mut self, store: &RecordStore, param: Option<&str>) -> Vec<DetailEffect> {
        if self.is_poisoned() {
            return Vec::new();
        }
        match param {
            Some(id) if self.open_id() == Some(id) => Vec::new(),
            Some(_) => self.open_from_url(store, param),
            None => match self.state {
                DetailState::Open(_) => {
                    self.state = DetailState::Closed;
                    vec![DetailEffect::HideOverlay]
                }
                _ => Vec::new(),
            },
        }
    }
}

/// Color for an overlay opened without a card click: the palette class the
/// record's card has in the visible view, else the first palette class.
pub fn replay_color(store: &RecordStore, id: &str) -> &'static str {
    store
        .position_in_visible(id)
        .map(palette_class)
        .unwrap_or(PALETTE[0])
}
