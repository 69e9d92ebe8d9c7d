//! SQLite-backed single-slot document cache.
//!
//! # Invariants
//! - One row per slot key; writes overwrite the previous payload.
//! - Payload is the document JSON exactly as it would be sent remotely.

use super::{CacheError, CacheResult, DocumentCache};
use crate::model::document::Document;
use rusqlite::{params, Connection, OptionalExtension};

/// Document cache stored in the `cache_slots` table.
pub struct SqliteDocumentCache<'conn> {
    conn: &'conn Connection,
    key: String,
}

impl<'conn> SqliteDocumentCache<'conn> {
    /// Creates a cache bound to one slot key on a migrated connection.
    pub fn new(conn: &'conn Connection, key: impl Into<String>) -> Self {
        Self {
            conn,
            key: key.into(),
        }
    }

    /// Removes the slot. Missing slots are not an error.
    pub fn clear(&self) -> CacheResult<()> {
        self.conn.execute(
            "DELETE FROM cache_slots WHERE slot_key = ?1;",
            params![self.key.as_str()],
        )?;
        Ok(())
    }
}

impl DocumentCache for SqliteDocumentCache<'_> {
    fn read(&self) -> CacheResult<Option<Document>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM cache_slots WHERE slot_key = ?1;",
                params![self.key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        payload
            .map(|raw| serde_json::from_str::<Document>(&raw).map_err(CacheError::Corrupt))
            .transpose()
    }

    fn write(&self, document: &Document) -> CacheResult<()> {
        let payload = serde_json::to_string(document).map_err(CacheError::Corrupt)?;
        self.conn.execute(
            "INSERT INTO cache_slots (slot_key, payload, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(slot_key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![self.key.as_str(), payload],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteDocumentCache;
    use crate::store::cache_db::open_cache_db_in_memory;
    use crate::model::document::{Document, Subject};
    use crate::store::{CacheError, DocumentCache};

    #[test]
    fn empty_slot_reads_none() {
        let conn = open_cache_db_in_memory().unwrap();
        let cache = SqliteDocumentCache::new(&conn, "roadmap-cache");
        assert_eq!(cache.read().unwrap(), None);
    }

    #[test]
    fn write_overwrites_previous_payload() {
        let conn = open_cache_db_in_memory().unwrap();
        let cache = SqliteDocumentCache::new(&conn, "roadmap-cache");

        cache
            .write(&Document::new(vec![Subject::new("Math")]))
            .unwrap();
        let second = Document::new(vec![Subject::new("Physics")]);
        cache.write(&second).unwrap();

        assert_eq!(cache.read().unwrap(), Some(second));
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM cache_slots;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn slots_are_isolated_by_key() {
        let conn = open_cache_db_in_memory().unwrap();
        let first = SqliteDocumentCache::new(&conn, "a");
        let second = SqliteDocumentCache::new(&conn, "b");

        first
            .write(&Document::new(vec![Subject::new("Math")]))
            .unwrap();
        assert_eq!(second.read().unwrap(), None);

        first.clear().unwrap();
        assert_eq!(first.read().unwrap(), None);
    }

    #[test]
    fn corrupt_payload_is_reported() {
        let conn = open_cache_db_in_memory().unwrap();
        conn.execute(
            "INSERT INTO cache_slots (slot_key, payload) VALUES ('k', 'not json');",
            [],
        )
        .unwrap();
        let cache = SqliteDocumentCache::new(&conn, "k");
        assert!(matches!(cache.read(), Err(CacheError::Corrupt(_))));
    }
}
