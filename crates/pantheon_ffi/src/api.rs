//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose catalog use cases to Dart via FRB as sync calls.
//! - Own the process-wide session table; each session is one page view.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every catalog call returns a full [`CatalogSnapshot`] of the surface,
//!   so Dart never diffs state on its own.
//! - Unknown session ids produce `ok=false` snapshots, never errors.

use log::{info, warn};
use pantheon_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CatalogApp, CatalogConfig, DetailView, FileRecordSource, LoadState, MemoryNavigator,
    MemorySurface, Navigator, SqliteKvRepository, UiEvent,
};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Instant;

type FfiApp = CatalogApp<MemorySurface, SqliteKvRepository, MemoryNavigator>;

static SESSIONS: Mutex<BTreeMap<u64, FfiApp>> = Mutex::new(BTreeMap::new());
static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One rendered card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardItem {
    pub id: String,
    pub name: String,
    pub title: String,
    pub image: String,
    /// Category labels, parallel to `badge_classes`.
    pub badges: Vec<String>,
    pub badge_classes: Vec<String>,
    pub stars: String,
    pub favorite: bool,
    pub palette_class: String,
    /// Whether the scroll reveal has fired for this card.
    pub revealed: bool,
}

/// Populated detail overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailItem {
    pub id: String,
    pub name: String,
    pub title: String,
    pub description: String,
    pub domain_line: String,
    pub symbol_line: String,
    pub stars: String,
    pub image: String,
    pub color: String,
}

/// Selector option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionItem {
    pub value: String,
    pub label: String,
}

/// Full surface state after one call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogSnapshot {
    /// Whether the call reached a live session.
    pub ok: bool,
    pub session_id: u64,
    /// Human-readable response message for diagnostics.
    pub message: String,
    pub cards: Vec<CardItem>,
    pub cards_visible: bool,
    pub load_more_visible: bool,
    pub no_results_visible: bool,
    pub not_found_message: Option<String>,
    pub category_options: Vec<OptionItem>,
    pub era_options: Vec<OptionItem>,
    pub sort_label: String,
    /// Selector values the dropdowns should show as chosen.
    pub selected_category: String,
    pub selected_era: String,
    pub detail: Option<DetailItem>,
    /// Current history entry; Dart mirrors it into the address bar.
    pub url: String,
    /// Latest route-guard destination, if any.
    pub redirect: Option<String>,
    pub search_pending: bool,
}

impl CatalogSnapshot {
    fn failure(session_id: u64, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            session_id,
            message: message.into(),
            ..Self::default()
        }
    }

    fn capture(session_id: u64, app: &FfiApp, message: impl Into<String>) -> Self {
        let surface = app.surface();
        Self {
            ok: true,
            session_id,
            message: message.into(),
            cards: surface
                .cards
                .iter()
                .map(|rendered| CardItem {
                    id: rendered.card.id.clone(),
                    name: rendered.card.name.clone(),
                    title: rendered.card.title.clone(),
                    image: rendered.card.image.clone(),
                    badges: rendered
                        .card
                        .badges
                        .iter()
                        .map(|badge| badge.label.clone())
                        .collect(),
                    badge_classes: rendered
                        .card
                        .badges
                        .iter()
                        .map(|badge| badge.class_name.clone())
                        .collect(),
                    stars: rendered.card.stars.clone(),
                    favorite: rendered.card.favorite,
                    palette_class: rendered.card.palette_class.to_string(),
                    revealed: rendered.revealed,
                })
                .collect(),
            cards_visible: surface.cards_visible,
            load_more_visible: surface.load_more_visible,
            no_results_visible: surface.no_results_visible,
            not_found_message: surface.not_found_message.clone(),
            category_options: to_option_items(&surface.category_options),
            era_options: to_option_items(&surface.era_options),
            sort_label: surface.sort_label.clone(),
            selected_category: app.criteria().category.selector_value().to_string(),
            selected_era: app.criteria().era.selector_value().to_string(),
            detail: surface.detail.as_ref().map(to_detail_item),
            url: app.navigator().current_url().to_string(),
            redirect: app.navigator().redirects().last().cloned(),
            search_pending: app.is_search_pending(),
        }
    }
}

/// Opens a catalog session for the page at `url`.
///
/// Input semantics:
/// - `data_path`: catalog JSON file; `None` uses `PANTHEON_DATA_PATH` or the
///   bundled default.
/// - `db_path`: favorites database; `None` uses `PANTHEON_DB_PATH` or a file
///   in the temp directory.
///
/// # FFI contract
/// - Sync call; reads the catalog file and opens SQLite.
/// - A load failure still opens the session with an empty page.
#[flutter_rust_bridge::frb(sync)]
pub fn catalog_open(
    url: String,
    data_path: Option<String>,
    db_path: Option<String>,
) -> CatalogSnapshot {
    let mut config = CatalogConfig::from_env();
    if let Some(path) = non_blank(data_path) {
        config.data_path = PathBuf::from(path);
    }
    if let Some(path) = non_blank(db_path) {
        config.db_path = PathBuf::from(path);
    }

    let navigator = match MemoryNavigator::parse(url.trim()) {
        Ok(navigator) => navigator,
        Err(err) => return CatalogSnapshot::failure(0, format!("catalog_open failed: {err}")),
    };
    let storage = match SqliteKvRepository::open(&config.db_path) {
        Ok(storage) => storage,
        Err(err) => return CatalogSnapshot::failure(0, format!("catalog_open failed: {err}")),
    };

    let source = FileRecordSource::new(config.data_path.clone());
    let mut app = CatalogApp::new(config, MemorySurface::new(), storage, navigator);
    let message = match app.start(&source) {
        Ok(_) if app.load_state() == LoadState::Redirected => format!(
            "Redirected to {}.",
            app.navigator().redirects().last().map_or("", String::as_str)
        ),
        Ok(accepted) => format!("Loaded {accepted} record(s)."),
        Err(err) => format!("catalog load failed: {err}"),
    };

    let session_id = NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed);
    let snapshot = CatalogSnapshot::capture(session_id, &app, message);
    match SESSIONS.lock() {
        Ok(mut sessions) => {
            sessions.insert(session_id, app);
            info!("event=session_open module=ffi status=ok session_id={session_id}");
            snapshot
        }
        Err(_) => CatalogSnapshot::failure(0, "catalog_open failed: session table poisoned"),
    }
}

/// Drops a session. Returns `false` for unknown ids.
#[flutter_rust_bridge::frb(sync)]
pub fn catalog_close(session_id: u64) -> bool {
    match SESSIONS.lock() {
        Ok(mut sessions) => sessions.remove(&session_id).is_some(),
        Err(_) => false,
    }
}

/// Current surface state without changing anything.
#[flutter_rust_bridge::frb(sync)]
pub fn catalog_snapshot(session_id: u64) -> CatalogSnapshot {
    with_session(session_id, "catalog_snapshot", |_, _| {})
}

/// Search input; recomputation happens on a later [`catalog_tick`].
#[flutter_rust_bridge::frb(sync)]
pub fn catalog_search(session_id: u64, text: String) -> CatalogSnapshot {
    dispatch(session_id, "catalog_search", UiEvent::SearchInput(text))
}

/// Timer heartbeat; fires a due debounced search.
#[flutter_rust_bridge::frb(sync)]
pub fn catalog_tick(session_id: u64) -> CatalogSnapshot {
    dispatch(session_id, "catalog_tick", UiEvent::Tick)
}

#[flutter_rust_bridge::frb(sync)]
pub fn catalog_set_category(session_id: u64, value: String) -> CatalogSnapshot {
    dispatch(session_id, "catalog_set_category", UiEvent::CategoryChanged(value))
}

#[flutter_rust_bridge::frb(sync)]
pub fn catalog_set_era(session_id: u64, value: String) -> CatalogSnapshot {
    dispatch(session_id, "catalog_set_era", UiEvent::EraChanged(value))
}

#[flutter_rust_bridge::frb(sync)]
pub fn catalog_toggle_sort(session_id: u64) -> CatalogSnapshot {
    dispatch(session_id, "catalog_toggle_sort", UiEvent::SortToggled)
}

#[flutter_rust_bridge::frb(sync)]
pub fn catalog_load_more(session_id: u64) -> CatalogSnapshot {
    dispatch(session_id, "catalog_load_more", UiEvent::LoadMore)
}

#[flutter_rust_bridge::frb(sync)]
pub fn catalog_toggle_favorite(session_id: u64, record_id: String) -> CatalogSnapshot {
    dispatch(
        session_id,
        "catalog_toggle_favorite",
        UiEvent::FavoriteClicked(record_id),
    )
}

/// Opens the detail overlay from a card, recording a history entry.
#[flutter_rust_bridge::frb(sync)]
pub fn catalog_open_detail(session_id: u64, record_id: String, color: String) -> CatalogSnapshot {
    dispatch(
        session_id,
        "catalog_open_detail",
        UiEvent::SeeMore {
            id: record_id,
            color,
        },
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn catalog_close_detail(session_id: u64) -> CatalogSnapshot {
    dispatch(session_id, "catalog_close_detail", UiEvent::CloseDetail)
}

#[flutter_rust_bridge::frb(sync)]
pub fn catalog_show_favorites(session_id: u64) -> CatalogSnapshot {
    dispatch(session_id, "catalog_show_favorites", UiEvent::ShowFavorites)
}

#[flutter_rust_bridge::frb(sync)]
pub fn catalog_show_all(session_id: u64) -> CatalogSnapshot {
    dispatch(session_id, "catalog_show_all", UiEvent::ShowAll)
}

/// Moves one entry back in history and re-syncs the overlay.
#[flutter_rust_bridge::frb(sync)]
pub fn catalog_back(session_id: u64) -> CatalogSnapshot {
    with_session(session_id, "catalog_back", |app, now| {
        if app.navigator_mut().back() {
            app.dispatch(&UiEvent::HistoryNavigated, now);
        }
    })
}

/// Moves one entry forward in history and re-syncs the overlay.
#[flutter_rust_bridge::frb(sync)]
pub fn catalog_forward(session_id: u64) -> CatalogSnapshot {
    with_session(session_id, "catalog_forward", |app, now| {
        if app.navigator_mut().forward() {
            app.dispatch(&UiEvent::HistoryNavigated, now);
        }
    })
}

/// Changes the fragment route and runs the route guard.
#[flutter_rust_bridge::frb(sync)]
pub fn catalog_set_route(session_id: u64, route: String) -> CatalogSnapshot {
    with_session(session_id, "catalog_set_route", |app, now| {
        app.navigator_mut().set_fragment(route.trim());
        app.dispatch(&UiEvent::HashChanged, now);
    })
}

/// Reports the scroll offset and reveals cards entering the viewport.
#[flutter_rust_bridge::frb(sync)]
pub fn catalog_scroll(session_id: u64, offset: f64) -> CatalogSnapshot {
    with_session(session_id, "catalog_scroll", |app, now| {
        app.surface_mut().scroll_to(offset);
        app.dispatch(&UiEvent::Scroll, now);
    })
}

/// Reports a new viewport height and re-runs the reveal check.
#[flutter_rust_bridge::frb(sync)]
pub fn catalog_resize(session_id: u64, viewport_height: f64) -> CatalogSnapshot {
    with_session(session_id, "catalog_resize", |app, now| {
        app.surface_mut().resize(viewport_height);
        app.dispatch(&UiEvent::Resize, now);
    })
}

fn dispatch(session_id: u64, operation: &str, event: UiEvent) -> CatalogSnapshot {
    with_session(session_id, operation, move |app, now| {
        app.dispatch(&event, now);
    })
}

fn with_session(
    session_id: u64,
    operation: &str,
    f: impl FnOnce(&mut FfiApp, Instant),
) -> CatalogSnapshot {
    let mut sessions = match SESSIONS.lock() {
        Ok(sessions) => sessions,
        Err(_) => {
            return CatalogSnapshot::failure(
                session_id,
                format!("{operation} failed: session table poisoned"),
            )
        }
    };
    let Some(app) = sessions.get_mut(&session_id) else {
        warn!("event={operation} module=ffi status=error reason=unknown_session session_id={session_id}");
        return CatalogSnapshot::failure(
            session_id,
            format!("{operation} failed: unknown session {session_id}"),
        );
    };

    f(app, Instant::now());
    CatalogSnapshot::capture(session_id, app, "")
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

fn to_option_items(options: &[pantheon_core::SelectOption]) -> Vec<OptionItem> {
    options
        .iter()
        .map(|option| OptionItem {
            value: option.value.clone(),
            label: option.label.clone(),
        })
        .collect()
}

fn to_detail_item(view: &DetailView) -> DetailItem {
    DetailItem {
        id: view.id.clone(),
        name: view.name.clone(),
        title: view.title.clone(),
        description: view.description.clone(),
        domain_line: view.domain_line.clone(),
        symbol_line: view.symbol_line.clone(),
        stars: view.stars.clone(),
        image: view.image.clone(),
        color: view.color.clone(),
    }
}
