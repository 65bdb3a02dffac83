//! Card projection for one record.
//!
//! # Invariants
//! - The palette class is a pure function of the card's absolute position,
//!   so cards keep their color as more batches are appended.
//! - A missing image renders as an empty reference.

use crate::model::record::{Record, RecordId};
use crate::view::stars::generate_stars;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Decorative card palette, rotated by position.
pub const PALETTE: [&str; 12] = [
    "card-tea",
    "card-forest",
    "card-peach",
    "card-blue",
    "card-bubble",
    "card-earth",
    "card-grape",
    "card-lilacs",
    "card-butter",
    "card-iced",
    "card-orange",
    "card-olive",
];

static BADGE_UNSAFE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9_-]+").expect("valid badge class regex"));

/// Palette class for the card at absolute `position`.
pub fn palette_class(position: usize) -> &'static str {
    PALETTE[position % PALETTE.len()]
}

/// Style class for a category badge: `badge-` plus the lower-cased tag with
/// anything outside `[a-z0-9_-]` collapsed to `-`.
pub fn badge_class(category: &str) -> String {
    let lowered = category.trim().to_lowercase();
    format!("badge-{}", BADGE_UNSAFE_RE.replace_all(&lowered, "-"))
}

/// One category badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: String,
    pub class_name: String,
}

/// Everything a surface needs to draw one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    /// Carried by the "see more" and favorite affordances.
    pub id: RecordId,
    pub name: String,
    pub title: String,
    pub image: String,
    pub badges: Vec<Badge>,
    pub stars: String,
    pub favorite: bool,
    pub palette_class: &'static str,
    pub position: usize,
}

impl CardView {
    pub fn build(record: &Record, position: usize, favorite: bool) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            title: record.title.clone(),
            image: record.image_or_empty().to_string(),
            badges: record
                .categories
                .iter()
                .map(|category| Badge {
                    label: category.clone(),
                    class_name: badge_class(category),
                })
                .collect(),
            stars: generate_stars(record.rank),
            favorite,
            palette_class: palette_class(position),
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{badge_class, palette_class, CardView, PALETTE};
    use crate::model::record::Record;

    #[test]
    fn palette_rotates_by_absolute_position() {
        assert_eq!(palette_class(0), "card-tea");
        assert_eq!(palette_class(11), "card-olive");
        assert_eq!(palette_class(12), "card-tea");
        assert_eq!(palette_class(13), palette_class(1));
        assert_eq!(PALETTE.len(), 12);
    }

    #[test]
    fn badge_class_lowercases_and_sanitizes() {
        assert_eq!(badge_class("Olympian"), "badge-olympian");
        assert_eq!(badge_class("Sea God"), "badge-sea-god");
        assert_eq!(badge_class("Under\"world"), "badge-under-world");
    }

    #[test]
    fn build_tolerates_missing_image_and_clamps_stars() {
        let record = Record {
            title: "Lord of the Underworld".to_string(),
            categories: vec!["Chthonic".to_string()],
            ..Record::new("hades-01", "Hades", 9)
        };
        let card = CardView::build(&record, 7, true);

        assert_eq!(card.image, "");
        assert_eq!(card.stars, "★★★★★");
        assert_eq!(card.palette_class, "card-lilacs");
        assert_eq!(card.badges[0].label, "Chthonic");
        assert_eq!(card.badges[0].class_name, "badge-chthonic");
        assert!(card.favorite);
        assert_eq!(card.id, "hades-01");
    }
}
