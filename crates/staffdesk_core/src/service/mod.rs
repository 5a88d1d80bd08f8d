//! Core use-case services.
//!
//! # Responsibility
//! - Own the authoritative employee list and the theme context.
//! - Orchestrate form, filter and export flows for UI/CLI callers.
//!
//! # See also
//! - crate::repo::slot_repo

pub mod dashboard;
pub mod employee_store;
pub mod theme_service;
