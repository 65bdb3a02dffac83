//! Character record model.
//!
//! # Responsibility
//! - Describe the JSON catalog document shape.
//! - Normalize loosely typed source fields into a strict [`Record`].
//!
//! # Invariants
//! - `name` is non-empty for every constructed record.
//! - `rank` keeps the source value truncated to an integer; it is clamped only
//!   when rendered as stars.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier carried by cards, favorites and the `character` URL parameter.
pub type RecordId = String;

/// Top-level catalog document: `{ "characters": [...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogDocument {
    pub characters: Vec<RawRecord>,
}

/// Source shape of one record before the acceptance gate.
///
/// Every field is an optional loose JSON value so that one oddly typed entry
/// is coerced or filtered instead of failing the whole document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub id: Option<Value>,
    pub name: Option<Value>,
    pub title: Option<Value>,
    pub description: Option<Value>,
    pub domain: Option<Value>,
    pub symbol: Option<Value>,
    pub era: Option<Value>,
    pub rank: Option<Value>,
    pub image: Option<Value>,
    pub categories: Option<Value>,
}

/// Immutable character record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub title: String,
    pub description: String,
    pub domain: String,
    pub symbol: String,
    pub era: String,
    /// Star rating source; may be outside `0..=5`.
    pub rank: i64,
    pub image: Option<String>,
    /// Category tags in source order. Filtering compares them verbatim.
    pub categories: Vec<String>,
}

impl Record {
    /// Creates a record with the identity fields set and everything else empty.
    #[cfg(test)]
    pub(crate) fn new(id: impl Into<RecordId>, name: impl Into<String>, rank: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            title: String::new(),
            description: String::new(),
            domain: String::new(),
            symbol: String::new(),
            era: String::new(),
            rank,
            image: None,
            categories: Vec::new(),
        }
    }

    /// Applies the load-time acceptance gate.
    ///
    /// Returns `None` when the name or the rank is falsy (`null`, `false`,
    /// `0`, `""`). Non-string scalars in text fields are kept as their JSON
    /// text; non-string category tags are dropped.
    pub fn from_raw(raw: RawRecord) -> Option<Self> {
        let name = raw.name.as_ref().filter(|name| is_truthy(name))?;
        let rank = raw.rank.as_ref().filter(|rank| is_truthy(rank))?;

        Some(Self {
            id: loose_text(raw.id.as_ref()),
            name: loose_text(Some(name)),
            title: loose_text(raw.title.as_ref()),
            description: loose_text(raw.description.as_ref()),
            domain: loose_text(raw.domain.as_ref()),
            symbol: loose_text(raw.symbol.as_ref()),
            era: loose_text(raw.era.as_ref()),
            rank: numeric_rank(rank),
            image: Some(loose_text(raw.image.as_ref())).filter(|image| !image.is_empty()),
            categories: match raw.categories {
                Some(Value::Array(tags)) => tags
                    .into_iter()
                    .filter_map(|tag| match tag {
                        Value::String(tag) => Some(tag),
                        _ => None,
                    })
                    .collect(),
                _ => Vec::new(),
            },
        })
    }

    /// Image reference, or an empty string when the record has none.
    pub fn image_or_empty(&self) -> &str {
        self.image.as_deref().unwrap_or("")
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|tag| tag == category)
    }
}

/// JavaScript-style truthiness of a loosely typed JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number
            .as_f64()
            .map_or(false, |float| float != 0.0 && !float.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Converts a loosely typed rank into an integer, falling back to 0.
///
/// Numbers are truncated toward zero, numeric strings are parsed, `true` is 1
/// and anything else is 0.
pub fn numeric_rank(value: &Value) -> i64 {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(truncate_finite))
            .unwrap_or(0),
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(truncate_finite)
            .unwrap_or(0),
        Value::Bool(true) => 1,
        _ => 0,
    }
}

fn truncate_finite(value: f64) -> Option<i64> {
    value.is_finite().then(|| value.trunc() as i64)
}

/// Text of a loosely typed field: strings verbatim, `null` or absent as empty,
/// anything else as its JSON rendering.
fn loose_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
