//! Filtering and sorting of the visible record view.
//!
//! # Responsibility
//! - Turn search text, category, era and sort direction into a visible
//!   sequence without touching any rendering surface.

pub mod filter;
