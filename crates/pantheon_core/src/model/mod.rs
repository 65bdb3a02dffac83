//! Catalog domain model.
//!
//! # Responsibility
//! - Define the immutable character record and its wire shape.
//! - Own the acceptance gate applied while loading.
//!
//! # Invariants
//! - Every accepted record has a non-empty name and a truthy rank.
//! - Records never change after load.

pub mod record;
