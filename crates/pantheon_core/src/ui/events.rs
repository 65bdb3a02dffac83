//! UI events and the event-to-handler registration table.

use crate::model::record::RecordId;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Input delivered by the rendering shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    SearchInput(String),
    CategoryChanged(String),
    EraChanged(String),
    SortToggled,
    LoadMore,
    FavoriteClicked(RecordId),
    /// "See more" on a card; `color` is the card's palette class.
    SeeMore { id: RecordId, color: String },
    CloseDetail,
    ShowFavorites,
    ShowAll,
    Scroll,
    Resize,
    /// The fragment route changed.
    HashChanged,
    /// Back/forward moved through history.
    HistoryNavigated,
    /// Timer heartbeat used to fire debounced work.
    Tick,
}

/// Registration key: one per [`UiEvent`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    SearchInput,
    CategoryChanged,
    EraChanged,
    SortToggled,
    LoadMore,
    FavoriteClicked,
    SeeMore,
    CloseDetail,
    ShowFavorites,
    ShowAll,
    Scroll,
    Resize,
    HashChanged,
    HistoryNavigated,
    Tick,
}

impl UiEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::SearchInput(_) => EventKind::SearchInput,
            Self::CategoryChanged(_) => EventKind::CategoryChanged,
            Self::EraChanged(_) => EventKind::EraChanged,
            Self::SortToggled => EventKind::SortToggled,
            Self::LoadMore => EventKind::LoadMore,
            Self::FavoriteClicked(_) => EventKind::FavoriteClicked,
            Self::SeeMore { .. } => EventKind::SeeMore,
            Self::CloseDetail => EventKind::CloseDetail,
            Self::ShowFavorites => EventKind::ShowFavorites,
            Self::ShowAll => EventKind::ShowAll,
            Self::Scroll => EventKind::Scroll,
            Self::Resize => EventKind::Resize,
            Self::HashChanged => EventKind::HashChanged,
            Self::HistoryNavigated => EventKind::HistoryNavigated,
            Self::Tick => EventKind::Tick,
        }
    }
}

/// Handler invoked for one event kind.
pub type Handler<T> = fn(&mut T, &UiEvent, Instant);

/// Registration failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTableError {
    DuplicateHandler(EventKind),
}

impl Display for EventTableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateHandler(kind) => write!(f, "handler already registered for {kind:?}"),
        }
    }
}

impl Error for EventTableError {}

/// Explicit event-to-handler table; one handler per kind.
pub struct EventTable<T> {
    handlers: BTreeMap<EventKind, Handler<T>>,
}

impl<T> Default for EventTable<T> {
    fn default() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }
}

impl<T> EventTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: EventKind, handler: Handler<T>) -> Result<(), EventTableError> {
        if self.handlers.contains_key(&kind) {
            return Err(EventTableError::DuplicateHandler(kind));
        }
        self.handlers.insert(kind, handler);
        Ok(())
    }

    fn handler(&self, kind: EventKind) -> Option<Handler<T>> {
        self.handlers.get(&kind).copied()
    }

    /// Runs the handler for `event`; returns `false` when none is registered.
    pub fn dispatch(&self, target: &mut T, event: &UiEvent, now: Instant) -> bool {
        match self.handler(event.kind()) {
            Some(handler) => {
                handler(target, event, now);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EventKind, EventTable, EventTableError, UiEvent};
    use std::time::Instant;

    #[derive(Default)]
    struct Counter {
        loads: usize,
    }

    fn on_load_more(counter: &mut Counter, _event: &UiEvent, _now: Instant) {
        counter.loads += 1;
    }

    #[test]
    fn dispatches_registered_kinds_only() {
        let mut table = EventTable::<Counter>::new();
        table
            .register(EventKind::LoadMore, on_load_more)
            .expect("first registration");

        let mut counter = Counter::default();
        assert!(table.dispatch(&mut counter, &UiEvent::LoadMore, Instant::now()));
        assert!(!table.dispatch(&mut counter, &UiEvent::Scroll, Instant::now()));
        assert_eq!(counter.loads, 1);
    }

    #[test]
    fn rejects_duplicate_registration() {
        let mut table = EventTable::<Counter>::new();
        table
            .register(EventKind::LoadMore, on_load_more)
            .expect("first registration");
        assert_eq!(
            table.register(EventKind::LoadMore, on_load_more),
            Err(EventTableError::DuplicateHandler(EventKind::LoadMore))
        );
    }

    #[test]
    fn kind_matches_variant() {
        let event = UiEvent::SeeMore {
            id: "zeus-01".to_string(),
            color: "card-tea".to_string(),
        };
        assert_eq!(event.kind(), EventKind::SeeMore);
        assert_eq!(UiEvent::SearchInput("z".into()).kind(), EventKind::SearchInput);
    }
}
