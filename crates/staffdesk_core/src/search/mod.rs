//! In-memory query pipeline over the authoritative employee list.
//!
//! # Responsibility
//! - Combine free-text search, department filter and sort into one view.
//! - Keep view shaping pure so every caller gets the same result.

pub mod view;
