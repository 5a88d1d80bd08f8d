use rusqlite::Connection;
use staffdesk_core::db::layout::layout_version;
use staffdesk_core::db::{open_db, open_db_in_memory, DbError};

#[test]
fn open_db_in_memory_creates_slot_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), layout_version());
    assert_table_exists(&conn, "kv_slots");
}

#[test]
fn reopening_file_database_keeps_slots() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("staffdesk.sqlite3");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO kv_slots (key, value) VALUES ('app-theme', 'dark-theme');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), layout_version());
    let value: String = conn_second
        .query_row(
            "SELECT value FROM kv_slots WHERE key = 'app-theme';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(value, "dark-theme");
}

#[test]
fn opening_database_with_newer_layout_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedLayoutVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, layout_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
