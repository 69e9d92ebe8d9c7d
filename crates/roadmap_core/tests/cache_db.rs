mod common;

use common::FakeRemote;
use roadmap_core::store::cache_db::schema_version;
use roadmap_core::{
    open_cache_db, open_cache_db_in_memory, CacheError, Document, DocumentCache, DocumentClient,
    SqliteDocumentCache, Subject,
};
use rusqlite::Connection;

#[test]
fn in_memory_cache_has_slot_table_at_current_version() {
    let conn = open_cache_db_in_memory().unwrap();

    assert_eq!(user_version(&conn), schema_version());
    assert_table_exists(&conn, "cache_slots");
}

#[test]
fn cached_document_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roadmap_cache.sqlite3");
    let document = Document::new(vec![Subject::new("Math")]);

    let conn_first = open_cache_db(&path).unwrap();
    SqliteDocumentCache::new(&conn_first, "roadmap-cache")
        .write(&document)
        .unwrap();
    drop(conn_first);

    let conn_second = open_cache_db(&path).unwrap();
    assert_eq!(user_version(&conn_second), schema_version());
    let cached = SqliteDocumentCache::new(&conn_second, "roadmap-cache")
        .read()
        .unwrap();
    assert_eq!(cached, Some(document));
}

#[test]
fn cache_file_from_newer_build_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_cache_db(&path).unwrap_err();
    match err {
        CacheError::Schema { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, schema_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn corrupt_slot_with_store_down_loads_empty_document() {
    let conn = open_cache_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO cache_slots (slot_key, payload) VALUES ('roadmap-cache', '{\"subjects\":');",
        [],
    )
    .unwrap();
    let cache = SqliteDocumentCache::new(&conn, "roadmap-cache");
    let remote = FakeRemote::default();
    remote.fail_fetch.set(true);
    let mut client = DocumentClient::new(&remote, &cache);

    let mut first_paint = false;
    let loaded = client.load(|_| first_paint = true);

    assert!(!first_paint);
    assert!(loaded.is_empty());
    assert!(matches!(cache.read(), Err(CacheError::Corrupt(_))));
}

#[test]
fn corrupt_slot_is_overwritten_by_next_fetch() {
    let conn = open_cache_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO cache_slots (slot_key, payload) VALUES ('roadmap-cache', 'garbage');",
        [],
    )
    .unwrap();
    let cache = SqliteDocumentCache::new(&conn, "roadmap-cache");
    let fresh = Document::new(vec![Subject::new("Fresh")]);
    let remote = FakeRemote::with_document(fresh.clone());

    let loaded = DocumentClient::new(&remote, &cache).load(|_| {});

    assert_eq!(loaded, fresh);
    assert_eq!(cache.read().unwrap(), Some(fresh));
}

fn user_version(conn: &Connection) -> u32 {
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
