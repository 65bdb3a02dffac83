//! Record loading and ownership.
//!
//! # Responsibility
//! - Fetch and parse the catalog document through a [`source::RecordSource`].
//! - Own the immutable full record set and the derived visible subset.
//!
//! # Invariants
//! - A failed load leaves the store empty; there is no partial state.
//! - `visible` is always a filtered permutation of `all`.

pub mod record_store;
pub mod source;
