//! Catalog controller over store, filters, pagination, favorites and detail.
//!
//! # Responsibility
//! - Hold the single application state (criteria, cursor, view mode, detail
//!   state) and the capabilities it writes to.
//! - Translate UI events into the ordered component calls described below.
//!
//! # Invariants
//! - `visible` is recomputed wholesale and the cursor reset before any batch
//!   of a new view is rendered.
//! - Load-more is visible exactly when the cursor is short of the visible
//!   length (all-records view only).
//! - While the detail state is poisoned, filtering, rendering, the favorites
//!   view and the route guard do nothing.
//!
//! # Event ordering
//! - startup: route guard (a redirect stops here), load, selectors,
//!   filter, reset, first batch, deep link.
//! - search input: store text, (re)start debounce; `tick` later filters.
//! - category/era/sort: update criteria, cancel debounce, filter.
//! - load more: next batch.

use crate::app::debounce::Debouncer;
use crate::config::CatalogConfig;
use crate::detail::{DetailController, DetailEffect, DetailState, OpenMode, NOT_FOUND_MESSAGE};
use crate::model::record::Record;
use crate::nav::history::{query_param, with_query_param, Navigator, CHARACTER_PARAM};
use crate::nav::route::{RouteDecision, RouteGuard};
use crate::repo::kv_repo::KvRepository;
use crate::search::filter::{CategoryFilter, EraFilter, FilterCriteria};
use crate::service::favorites_service::FavoritesLedger;
use crate::store::record_store::RecordStore;
use crate::store::source::{LoadError, RecordSource};
use crate::ui::events::{EventKind, EventTable, UiEvent};
use crate::ui::surface::{category_options, era_options, Surface};
use crate::view::card::CardView;
use crate::view::pagination::Paginator;
use crate::view::reveal::reveal_candidates;
use log::{error, info, warn};
use std::sync::Arc;
use std::time::Instant;

/// Which card list is on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Filtered, sorted and paginated records.
    #[default]
    All,
    /// Every favorited record in load order, unpaginated.
    Favorites,
}

/// Outcome of the last load attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    NotStarted,
    Loaded(usize),
    Failed,
    /// The route guard left the page before anything was loaded.
    Redirected,
}

/// Application controller.
pub struct CatalogApp<S: Surface, K: KvRepository, N: Navigator> {
    config: CatalogConfig,
    store: RecordStore,
    criteria: FilterCriteria,
    paginator: Paginator,
    favorites: FavoritesLedger<K>,
    detail: DetailController,
    debouncer: Debouncer,
    route_guard: RouteGuard,
    view_mode: ViewMode,
    load_state: LoadState,
    surface: S,
    navigator: N,
    events: Arc<EventTable<Self>>,
}

impl<S: Surface, K: KvRepository, N: Navigator> CatalogApp<S, K, N> {
    pub fn new(config: CatalogConfig, surface: S, storage: K, navigator: N) -> Self {
        Self {
            store: RecordStore::new(),
            criteria: FilterCriteria::default(),
            paginator: Paginator::new(config.batch_size),
            favorites: FavoritesLedger::new(storage, config.favorites_key.clone()),
            detail: DetailController::new(),
            debouncer: Debouncer::new(config.debounce),
            route_guard: RouteGuard::from_config(&config),
            view_mode: ViewMode::All,
            load_state: LoadState::NotStarted,
            surface,
            navigator,
            events: Arc::new(Self::default_event_table()),
            config,
        }
    }

    /// Table wiring every [`EventKind`] to its controller operation.
    fn default_event_table() -> EventTable<Self> {
        let mut table = EventTable::new();
        let handlers: [(EventKind, crate::ui::events::Handler<Self>); 15] = [
            (EventKind::SearchInput, Self::on_search_input),
            (EventKind::CategoryChanged, Self::on_category_changed),
            (EventKind::EraChanged, Self::on_era_changed),
            (EventKind::SortToggled, |app, _, _| app.toggle_sort()),
            (EventKind::LoadMore, |app, _, _| app.render_next_batch()),
            (EventKind::FavoriteClicked, Self::on_favorite_clicked),
            (EventKind::SeeMore, Self::on_see_more),
            (EventKind::CloseDetail, |app, _, _| app.close_detail()),
            (EventKind::ShowFavorites, |app, _, _| app.show_favorites()),
            (EventKind::ShowAll, |app, _, _| app.show_all()),
            (EventKind::Scroll, |app, _, _| app.reveal_on_scroll()),
            (EventKind::Resize, |app, _, _| app.reveal_on_scroll()),
            (EventKind::HashChanged, |app, _, _| {
                app.validate_route();
            }),
            (EventKind::HistoryNavigated, |app, _, _| app.sync_detail_with_url()),
            (EventKind::Tick, |app, _, now| app.tick(now)),
        ];
        for (kind, handler) in handlers {
            if let Err(err) = table.register(kind, handler) {
                error!("event=event_table module=app status=error error={err}");
            }
        }
        table
    }

    /// Boots the page: route guard, load, selectors, first batch, deep link.
    ///
    /// Returns the accepted record count. A route-guard redirect leaves the
    /// page before loading: nothing is fetched or rendered and the count is 0.
    ///
    /// # Errors
    /// Returns the [`LoadError`] after logging it. Nothing is rendered in
    /// that case and the surface keeps its pre-load state.
    pub fn start(&mut self, source: &dyn RecordSource) -> Result<usize, LoadError> {
        if let Some(RouteDecision::Redirect { .. }) = self.validate_route() {
            self.load_state = LoadState::Redirected;
            info!("event=app_start module=app status=redirect");
            return Ok(0);
        }

        let accepted = match self.store.load(source, self.config.max_records) {
            Ok(accepted) => accepted,
            Err(err) => {
                self.load_state = LoadState::Failed;
                error!("event=app_start module=app status=error error={err}");
                return Err(err);
            }
        };
        self.load_state = LoadState::Loaded(accepted);

        self.surface
            .set_category_options(category_options(&self.store.distinct_categories()));
        self.surface
            .set_era_options(era_options(&self.store.distinct_eras()));
        self.surface.set_sort_label(self.criteria.sort.label());

        self.apply_filters();
        self.open_from_url();
        info!(
            "event=app_start module=app status=ok accepted={} visible={}",
            accepted,
            self.store.visible().len()
        );
        Ok(accepted)
    }

    /// Routes `event` through the registration table.
    pub fn dispatch(&mut self, event: &UiEvent, now: Instant) -> bool {
        let events = Arc::clone(&self.events);
        events.dispatch(self, event, now)
    }

    /// Stores the search text and (re)starts the debounce timer.
    pub fn set_search_text(&mut self, text: &str, now: Instant) {
        self.criteria.search_text = text.to_string();
        self.debouncer.schedule(now);
    }

    /// Fires a due debounced recomputation.
    pub fn tick(&mut self, now: Instant) {
        if self.debouncer.fire_if_due(now) {
            self.apply_filters();
        }
    }

    /// Applies a category selector value immediately.
    pub fn set_category(&mut self, value: &str) {
        self.criteria.category = CategoryFilter::from_selector(value);
        self.debouncer.cancel();
        self.apply_filters();
    }

    /// Applies an era selector value immediately.
    pub fn set_era(&mut self, value: &str) {
        self.criteria.era = EraFilter::from_selector(value);
        self.debouncer.cancel();
        self.apply_filters();
    }

    pub fn toggle_sort(&mut self) {
        self.criteria.sort = self.criteria.sort.toggled();
        self.surface.set_sort_label(self.criteria.sort.label());
        self.debouncer.cancel();
        self.apply_filters();
    }

    /// Recomputes `visible`, resets pagination and renders the first batch.
    pub fn apply_filters(&mut self) {
        if self.detail.is_poisoned() {
            return;
        }
        self.view_mode = ViewMode::All;
        let visible = self.store.apply(&self.criteria).len();
        info!("event=filter_apply module=app status=ok visible={visible}");

        self.reset();
        self.surface.set_no_results_visible(visible == 0);
        self.render_next_batch();
    }

    /// Clears the card container, rewinds the cursor and shows load-more.
    pub fn reset(&mut self) {
        if self.detail.is_poisoned() {
            return;
        }
        self.surface.clear_cards();
        self.paginator.reset();
        self.surface.set_load_more_visible(true);
    }

    /// Appends the next batch of visible cards.
    pub fn render_next_batch(&mut self) {
        if self.detail.is_poisoned() || self.view_mode != ViewMode::All {
            return;
        }
        let len = self.store.visible().len();
        let range = self.paginator.next_batch(len);
        for position in range {
            let record = &self.store.visible()[position];
            let favorite = self.is_favorite(&record.id);
            self.surface
                .append_card(CardView::build(record, position, favorite));
        }
        self.reveal_on_scroll();
        self.surface
            .set_load_more_visible(!self.paginator.is_exhausted(len));
    }

    /// Replaces the cards with every favorite, unpaginated.
    pub fn show_favorites(&mut self) {
        if self.detail.is_poisoned() {
            return;
        }
        self.view_mode = ViewMode::Favorites;
        let ids = match self.favorites.list_favorites() {
            Ok(ids) => ids,
            Err(err) => {
                warn!("event=favorites_view module=app status=error error={err}");
                Default::default()
            }
        };

        self.surface.clear_cards();
        let cards = self
            .store
            .select(&ids)
            .enumerate()
            .map(|(position, record)| CardView::build(record, position, true))
            .collect::<Vec<_>>();
        let empty = cards.is_empty();
        for card in cards {
            self.surface.append_card(card);
        }
        self.surface.set_load_more_visible(false);
        self.surface.set_no_results_visible(empty);
        self.reveal_on_scroll();
    }

    /// Returns to the filtered, paginated view.
    pub fn show_all(&mut self) {
        self.apply_filters();
    }

    /// Flips a favorite for a known record and refreshes its icon.
    ///
    /// Returns the new membership, or `None` for unknown ids and storage
    /// failures (which are logged, never surfaced).
    pub fn toggle_favorite(&mut self, id: &str) -> Option<bool> {
        self.store.find(id)?;
        match self.favorites.toggle(id) {
            Ok(favorite) => {
                self.surface.set_favorite_state(id, favorite);
                if self.view_mode == ViewMode::Favorites {
                    self.show_favorites();
                }
                Some(favorite)
            }
            Err(err) => {
                error!("event=favorite_toggle module=app status=error error={err}");
                None
            }
        }
    }

    /// Favorite check used while rendering; storage failures read as `false`.
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.is_favorite(id).unwrap_or_else(|err| {
            warn!("event=favorite_check module=app status=error error={err}");
            false
        })
    }

    /// Opens the overlay from a card click and records a history entry.
    pub fn open_detail(&mut self, id: &str, color: &str) {
        let effects = self.detail.open(&self.store, id, color, OpenMode::Navigate);
        self.apply_detail_effects(effects);
    }

    pub fn close_detail(&mut self) {
        let effects = self.detail.close();
        self.apply_detail_effects(effects);
    }

    /// Replays the `character` parameter of the current URL.
    pub fn open_from_url(&mut self) {
        let param = query_param(&self.navigator.current_url(), CHARACTER_PARAM);
        let effects = self.detail.open_from_url(&self.store, param.as_deref());
        self.apply_detail_effects(effects);
    }

    /// Aligns the overlay with the URL after back/forward.
    pub fn sync_detail_with_url(&mut self) {
        let param = query_param(&self.navigator.current_url(), CHARACTER_PARAM);
        let effects = self.detail.sync_with_url(&self.store, param.as_deref());
        self.apply_detail_effects(effects);
    }

    /// Checks the fragment route; redirects when it is not allowed.
    ///
    /// Returns `None` without checking while poisoned.
    pub fn validate_route(&mut self) -> Option<RouteDecision> {
        if self.detail.is_poisoned() {
            return None;
        }
        let decision = self.route_guard.check(&self.navigator.current_url());
        if let RouteDecision::Redirect { route, destination } = &decision {
            warn!(
                "event=route_check module=app status=redirect route={} destination={}",
                crate::logging::sanitize_message(route, 64),
                destination
            );
            self.navigator.redirect(destination);
        }
        Some(decision)
    }

    /// Reveals every card whose top is within the viewport threshold.
    pub fn reveal_on_scroll(&mut self) {
        let tops = self.surface.card_tops();
        let viewport = self.surface.viewport_height();
        for index in reveal_candidates(&tops, viewport, self.config.reveal_ratio) {
            self.surface.reveal_card(index);
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn visible(&self) -> &[Record] {
        self.store.visible()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn favorites(&self) -> &FavoritesLedger<K> {
        &self.favorites
    }

    pub fn detail_state(&self) -> &DetailState {
        self.detail.state()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn is_search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    fn apply_detail_effects(&mut self, effects: Vec<DetailEffect>) {
        for effect in effects {
            match effect {
                DetailEffect::ShowOverlay(view) => self.surface.show_detail(view),
                DetailEffect::HideOverlay => self.surface.hide_detail(),
                DetailEffect::PushCharacter(id) => {
                    let next = with_query_param(
                        &self.navigator.current_url(),
                        CHARACTER_PARAM,
                        Some(&id),
                    );
                    self.navigator.push(next);
                }
                DetailEffect::PushWithoutCharacter => {
                    let next =
                        with_query_param(&self.navigator.current_url(), CHARACTER_PARAM, None);
                    self.navigator.push(next);
                }
                DetailEffect::ReplaceWithoutCharacter => {
                    let next =
                        with_query_param(&self.navigator.current_url(), CHARACTER_PARAM, None);
                    self.navigator.replace(next);
                }
                DetailEffect::LockRendering => {
                    self.surface.set_cards_visible(false);
                    self.surface.set_load_more_visible(false);
                    self.surface.show_not_found(NOT_FOUND_MESSAGE);
                }
            }
        }
    }

    fn on_search_input(&mut self, event: &UiEvent, now: Instant) {
        if let UiEvent::SearchInput(text) = event {
            self.set_search_text(text, now);
        }
    }

    fn on_category_changed(&mut self, event: &UiEvent, _now: Instant) {
        if let UiEvent::CategoryChanged(value) = event {
            self.set_category(value);
        }
    }

    fn on_era_changed(&mut self, event: &UiEvent, _now: Instant) {
        if let UiEvent::EraChanged(value) = event {
            self.set_era(value);
        }
    }

    fn on_favorite_clicked(&mut self, event: &UiEvent, _now: Instant) {
        if let UiEvent::FavoriteClicked(id) = event {
            self.toggle_favorite(id);
        }
    }

    fn on_see_more(&mut self, event: &UiEvent, _now: Instant) {
        if let UiEvent::SeeMore { id, color } = event {
            self.open_detail(id, color);
        }
    }
}
