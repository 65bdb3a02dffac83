//! UI adapter layer.
//!
//! # Responsibility
//! - Define the rendering surface capability and a headless implementation.
//! - Route shell events through an explicit registration table.
//!
//! # Invariants
//! - Core filter/pagination/favorites/detail logic never depends on this
//!   module; only the controller in `app` does.

pub mod events;
pub mod surface;
