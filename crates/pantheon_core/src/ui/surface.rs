//! Rendering surface capability and its in-memory implementation.
//!
//! # Responsibility
//! - Name every rendering target the controller writes to.
//! - Provide [`MemorySurface`], a headless surface with simple grid geometry
//!   used by the FFI snapshot, the CLI and tests.

use crate::detail::DetailView;
use crate::search::filter::{ALL_CATEGORIES, ALL_ERAS};
use crate::view::card::CardView;
use serde::Serialize;

/// One `<option>` of a selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Category selector options: the `all` sentinel followed by each category.
pub fn category_options(categories: &[String]) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new(ALL_CATEGORIES, "All categories"))
        .chain(
            categories
                .iter()
                .map(|category| SelectOption::new(category.as_str(), category.as_str())),
        )
        .collect()
}

/// Era selector options: the `allEras` sentinel followed by each era.
pub fn era_options(eras: &[String]) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new(ALL_ERAS, "All eras"))
        .chain(eras.iter().map(|era| SelectOption::new(era.as_str(), era.as_str())))
        .collect()
}

/// Rendering targets written by the catalog controller.
///
/// Implementations must never fail: every method is a best-effort
/// presentational side effect.
pub trait Surface {
    fn clear_cards(&mut self);
    fn append_card(&mut self, card: CardView);
    /// Updates the favorite icon of every rendered card carrying `id`.
    fn set_favorite_state(&mut self, id: &str, favorite: bool);
    fn set_cards_visible(&mut self, visible: bool);
    fn set_load_more_visible(&mut self, visible: bool);
    fn set_no_results_visible(&mut self, visible: bool);
    fn show_not_found(&mut self, message: &str);
    fn set_category_options(&mut self, options: Vec<SelectOption>);
    fn set_era_options(&mut self, options: Vec<SelectOption>);
    fn set_sort_label(&mut self, label: &str);
    fn show_detail(&mut self, view: DetailView);
    fn hide_detail(&mut self);
    fn viewport_height(&self) -> f64;
    /// Top edge of each rendered card in viewport coordinates, in card order.
    fn card_tops(&self) -> Vec<f64>;
    /// Marks a card revealed. Repeated calls are harmless.
    fn reveal_card(&mut self, index: usize);
}

/// A card as held by [`MemorySurface`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedCard {
    pub card: CardView,
    pub revealed: bool,
}

/// Headless surface laying cards out on a fixed grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemorySurface {
    pub cards: Vec<RenderedCard>,
    pub cards_visible: bool,
    pub load_more_visible: bool,
    pub no_results_visible: bool,
    pub not_found_message: Option<String>,
    pub category_options: Vec<SelectOption>,
    pub era_options: Vec<SelectOption>,
    pub sort_label: String,
    pub detail: Option<DetailView>,
    columns: usize,
    card_height: f64,
    viewport_height: f64,
    scroll_offset: f64,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::with_geometry(3, 420.0, 900.0)
    }
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface with `columns` cards per row, each row `card_height` tall.
    pub fn with_geometry(columns: usize, card_height: f64, viewport_height: f64) -> Self {
        Self {
            cards: Vec::new(),
            cards_visible: true,
            load_more_visible: true,
            no_results_visible: false,
            not_found_message: None,
            category_options: Vec::new(),
            era_options: Vec::new(),
            sort_label: String::new(),
            detail: None,
            columns: columns.max(1),
            card_height,
            viewport_height,
            scroll_offset: 0.0,
        }
    }

    pub fn scroll_to(&mut self, offset: f64) {
        self.scroll_offset = offset.max(0.0);
    }

    pub fn resize(&mut self, viewport_height: f64) {
        self.viewport_height = viewport_height;
    }

    pub fn card_ids(&self) -> Vec<&str> {
        self.cards.iter().map(|rendered| rendered.card.id.as_str()).collect()
    }

    pub fn revealed_count(&self) -> usize {
        self.cards.iter().filter(|rendered| rendered.revealed).count()
    }
}

impl Surface for MemorySurface {
    fn clear_cards(&mut self) {
        self.cards.clear();
    }

    fn append_card(&mut self, card: CardView) {
        self.cards.push(RenderedCard {
            card,
            revealed: false,
        });
    }

    fn set_favorite_state(&mut self, id: &str, favorite: bool) {
        self.cards
            .iter_mut()
            .filter(|rendered| rendered.card.id == id)
            .for_each(|rendered| rendered.card.favorite = favorite);
    }

    fn set_cards_visible(&mut self, visible: bool) {
        self.cards_visible = visible;
    }

    fn set_load_more_visible(&mut self, visible: bool) {
        self.load_more_visible = visible;
    }

    fn set_no_results_visible(&mut self, visible: bool) {
        self.no_results_visible = visible;
    }

    fn show_not_found(&mut self, message: &str) {
        self.not_found_message = Some(message.to_string());
    }

    fn set_category_options(&mut self, options: Vec<SelectOption>) {
        self.category_options = options;
    }

    fn set_era_options(&mut self, options: Vec<SelectOption>) {
        self.era_options = options;
    }

    fn set_sort_label(&mut self, label: &str) {
        self.sort_label = label.to_string();
    }

    fn show_detail(&mut self, view: DetailView) {
        self.detail = Some(view);
    }

    fn hide_detail(&mut self) {
        self.detail = None;
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn card_tops(&self) -> Vec<f64> {
        (0..self.cards.len())
            .map(|index| (index / self.columns) as f64 * self.card_height - self.scroll_offset)
            .collect()
    }

    fn reveal_card(&mut self, index: usize) {
        if let Some(rendered) = self.cards.get_mut(index) {
            rendered.revealed = true;
        }
    }
}
