//! Storage layout bootstrap.
//!
//! # Responsibility
//! - Create the key-value slot table on a fresh database.
//! - Refuse databases written by a newer layout.
//!
//! # Invariants
//! - Layout version is tracked via `PRAGMA user_version`.
//! - Slot values are opaque text; record shape is not versioned here.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

const LAYOUT_VERSION: u32 = 1;
const LAYOUT_SQL: &str = include_str!("layout.sql");

/// Returns the storage layout version known by this binary.
pub fn layout_version() -> u32 {
    LAYOUT_VERSION
}

/// Creates the slot table when missing and stamps the layout version.
pub fn ensure_layout(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;

    if current_version > LAYOUT_VERSION {
        return Err(DbError::UnsupportedLayoutVersion {
            db_version: current_version,
            latest_supported: LAYOUT_VERSION,
        });
    }

    if current_version == LAYOUT_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(LAYOUT_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {LAYOUT_VERSION};"))?;
    tx.commit()?;

    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
