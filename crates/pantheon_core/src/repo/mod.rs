//! Durable storage abstractions and implementations.
//!
//! # Responsibility
//! - Define the key-value capability the favorites ledger persists through.
//! - Isolate SQLite query details from service orchestration.

pub mod kv_repo;
