//! Filter and sort engine for the visible record view.
//!
//! # Responsibility
//! - Derive the visible sequence from the full set and the current criteria.
//!
//! # Invariants
//! - The result is a pure function of `(all, criteria)`; calling it twice
//!   yields identical sequences.
//! - Text, category and era predicates are ANDed; sorting happens after
//!   filtering and is stable.

use crate::model::record::Record;
use std::cmp::Ordering;

/// Selector value meaning "any category".
pub const ALL_CATEGORIES: &str = "all";
/// Selector value meaning "any era".
pub const ALL_ERAS: &str = "allEras";

/// Category selector state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact, case-sensitive tag membership.
    Only(String),
}

impl CategoryFilter {
    /// Parses a selector value; `"all"` maps to [`CategoryFilter::All`].
    pub fn from_selector(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    pub fn selector_value(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(category) => category,
        }
    }

    fn matches(&self, record: &Record) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => record.has_category(category),
        }
    }
}

/// Era selector state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EraFilter {
    #[default]
    AllEras,
    /// Substring of the record era.
    Containing(String),
}

impl EraFilter {
    /// Parses a selector value; `"allEras"` maps to [`EraFilter::AllEras`].
    pub fn from_selector(value: &str) -> Self {
        if value == ALL_ERAS {
            Self::AllEras
        } else {
            Self::Containing(value.to_string())
        }
    }

    pub fn selector_value(&self) -> &str {
        match self {
            Self::AllEras => ALL_ERAS,
            Self::Containing(era) => era,
        }
    }

    fn matches(&self, record: &Record) -> bool {
        match self {
            Self::AllEras => true,
            Self::Containing(era) => record.era.contains(era.as_str()),
        }
    }
}

/// Alphabetical sort direction by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Toggle label shown on the sort control.
    pub fn label(self) -> &'static str {
        match self {
            Self::Ascending => "A-Z",
            Self::Descending => "Z-A",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Complete filter/sort criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Raw search input; matched case-insensitively against name or title.
    pub search_text: String,
    pub category: CategoryFilter,
    pub era: EraFilter,
    pub sort: SortDirection,
}

impl FilterCriteria {
    /// Whether `record` passes all three predicates.
    pub fn matches(&self, record: &Record) -> bool {
        matches_text(record, &self.search_text.to_lowercase())
            && self.category.matches(record)
            && self.era.matches(record)
    }
}

/// Computes the visible sequence for `criteria`.
///
/// Filters `all` with the ANDed text/category/era predicates, then sorts the
/// survivors by case-insensitive name. Ties keep their load order in both
/// directions.
pub fn compute_visible(all: &[Record], criteria: &FilterCriteria) -> Vec<Record> {
    let mut keyed = all
        .iter()
        .filter(|record| criteria.matches(record))
        .map(|record| (record.name.to_lowercase(), record))
        .collect::<Vec<_>>();

    keyed.sort_by(|(left, _), (right, _)| criteria.sort.apply(left.cmp(right)));
    keyed.into_iter().map(|(_, record)| record.clone()).collect()
}

fn matches_text(record: &Record, needle: &str) -> bool {
    needle.is_empty()
        || record.name.to_lowercase().contains(needle)
        || record.title.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::{
        compute_visible, CategoryFilter, EraFilter, FilterCriteria, SortDirection, ALL_ERAS,
    };
    use crate::model::record::Record;

    fn record(id: &str, name: &str, title: &str, era: &str, categories: &[&str]) -> Record {
        Record {
            title: title.to_string(),
            era: era.to_string(),
            categories: categories.iter().map(|tag| tag.to_string()).collect(),
            ..Record::new(id, name, 3)
        }
    }

    fn pantheon() -> Vec<Record> {
        vec![
            record("zeus-01", "Zeus", "King of the Gods", "Olympian Age", &["Olympian"]),
            record("athena-01", "Athena", "Goddess of Wisdom", "Olympian Age", &["Olympian"]),
            record("cronus-01", "cronus", "Lord of Time", "Age of Titans", &["Titan"]),
            record("perseus-01", "Perseus", "Slayer of Medusa", "Heroic Age", &["Hero"]),
        ]
    }

    fn ids(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn empty_criteria_sorts_everything_case_insensitively() {
        let visible = compute_visible(&pantheon(), &FilterCriteria::default());
        assert_eq!(
            ids(&visible),
            vec!["athena-01", "cronus-01", "perseus-01", "zeus-01"]
        );
    }

    #[test]
    fn text_matches_name_or_title() {
        let criteria = FilterCriteria {
            search_text: "OF".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(
            ids(&compute_visible(&pantheon(), &criteria)),
            vec!["athena-01", "cronus-01", "perseus-01", "zeus-01"]
        );

        let criteria = FilterCriteria {
            search_text: "zeu".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&compute_visible(&pantheon(), &criteria)), vec!["zeus-01"]);
    }

    #[test]
    fn category_is_exact_and_era_is_substring() {
        let criteria = FilterCriteria {
            category: CategoryFilter::from_selector("olympian"),
            ..FilterCriteria::default()
        };
        assert!(compute_visible(&pantheon(), &criteria).is_empty());

        let criteria = FilterCriteria {
            category: CategoryFilter::from_selector("Olympian"),
            era: EraFilter::from_selector("Olympian"),
            ..FilterCriteria::default()
        };
        assert_eq!(
            ids(&compute_visible(&pantheon(), &criteria)),
            vec!["athena-01", "zeus-01"]
        );

        let criteria = FilterCriteria {
            era: EraFilter::from_selector("Age"),
            search_text: "s".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(compute_visible(&pantheon(), &criteria).len(), 4);
    }

    #[test]
    fn descending_reverses_distinct_names() {
        let ascending = compute_visible(&pantheon(), &FilterCriteria::default());
        let descending = compute_visible(
            &pantheon(),
            &FilterCriteria {
                sort: SortDirection::Descending,
                ..FilterCriteria::default()
            },
        );
        let mut reversed = ids(&ascending);
        reversed.reverse();
        assert_eq!(ids(&descending), reversed);
    }

    #[test]
    fn ties_keep_load_order_in_both_directions() {
        let all = vec![
            record("a", "Ares", "", "", &[]),
            record("b", "ares", "", "", &[]),
        ];
        for sort in [SortDirection::Ascending, SortDirection::Descending] {
            let criteria = FilterCriteria {
                sort,
                ..FilterCriteria::default()
            };
            assert_eq!(ids(&compute_visible(&all, &criteria)), vec!["a", "b"]);
        }
    }

    #[test]
    fn recomputation_is_idempotent() {
        let criteria = FilterCriteria {
            search_text: "o".to_string(),
            era: EraFilter::from_selector(ALL_ERAS),
            sort: SortDirection::Descending,
            ..FilterCriteria::default()
        };
        let first = compute_visible(&pantheon(), &criteria);
        let second = compute_visible(&pantheon(), &criteria);
        assert_eq!(first, second);
        assert!(criteria.matches(&first[0]));
    }

    #[test]
    fn selector_values_round_trip_sentinels() {
        assert_eq!(CategoryFilter::from_selector("all"), CategoryFilter::All);
        assert_eq!(EraFilter::from_selector("allEras"), EraFilter::AllEras);
        assert_eq!(CategoryFilter::All.selector_value(), "all");
        assert_eq!(SortDirection::Ascending.toggled(), SortDirection::Descending);
    }
}
