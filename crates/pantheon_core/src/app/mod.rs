//! Catalog controller.
//!
//! # Responsibility
//! - Own the whole application state in one place.
//! - Sequence store, filter, pagination, favorites, detail and route guard in
//!   response to startup and UI events.
//!
//! # Invariants
//! - The poisoned deep-link state blocks every render and filter operation.

pub mod controller;
pub mod debounce;
