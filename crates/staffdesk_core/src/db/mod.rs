//! SQLite storage bootstrap for the durable slots.
//!
//! # Responsibility
//! - Open and configure SQLite connections.
//! - Ensure the slot table exists before any slot is read or written.
//!
//! # Invariants
//! - Core code must not touch slots before `ensure_layout` succeeds.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod layout;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedLayoutVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedLayoutVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "storage layout version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedLayoutVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
