//! Core logic for the Pantheon catalog browser.
//! This crate owns every filtering, pagination, favorites and deep-link rule;
//! shells only render what the controller writes to its surface.

pub mod app;
pub mod config;
pub mod db;
pub mod detail;
pub mod logging;
pub mod model;
pub mod nav;
pub mod repo;
pub mod search;
pub mod service;
pub mod store;
pub mod ui;
pub mod view;

pub use app::controller::{CatalogApp, LoadState, ViewMode};
pub use config::CatalogConfig;
pub use detail::{DetailController, DetailEffect, DetailState, DetailView, NOT_FOUND_MESSAGE};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::record::{Record, RecordId};
pub use nav::history::{MemoryNavigator, Navigator, CHARACTER_PARAM};
pub use nav::route::{RouteDecision, RouteGuard};
pub use repo::kv_repo::{
    KvRepository, MemoryKvRepository, RepoError, RepoResult, SqliteKvRepository,
};
pub use search::filter::{CategoryFilter, EraFilter, FilterCriteria, SortDirection};
pub use service::favorites_service::{FavoritesError, FavoritesLedger, FavoritesResult};
pub use store::record_store::RecordStore;
pub use store::source::{FileRecordSource, InlineRecordSource, LoadError, RecordSource};
pub use ui::events::{EventKind, EventTable, UiEvent};
pub use ui::surface::{MemorySurface, SelectOption, Surface};
pub use view::card::CardView;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
