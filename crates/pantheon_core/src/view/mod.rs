//! Presentation models derived from records.
//!
//! # Responsibility
//! - Build card and star projections as plain data.
//! - Track the pagination cursor and reveal thresholds.
//!
//! # Invariants
//! - Nothing in this module touches a rendering surface.

pub mod card;
pub mod pagination;
pub mod reveal;
pub mod stars;
