//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the durable slot access contract.
//! - Isolate SQLite query details from service orchestration.

pub mod slot_repo;
