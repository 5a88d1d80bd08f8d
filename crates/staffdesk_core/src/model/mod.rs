//! Employee domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Own the field rules that gate every create/update.
//!
//! # Invariants
//! - Every persisted employee is identified by a unique `EmployeeId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod employee;
