//! Navigation capability and route validation.
//!
//! # Responsibility
//! - Abstract browser-like history (push/replace/redirect) behind a trait.
//! - Read and rewrite the `character` deep-link query parameter.
//! - Validate the fragment route against the allow-list.

pub mod history;
pub mod route;
