//! Flutter-facing FFI crate for the Pantheon catalog core.

pub mod api;
