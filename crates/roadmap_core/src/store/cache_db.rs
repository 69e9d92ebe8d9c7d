//! SQLite file backing the document cache.
//!
//! The file holds one table of keyed slots. Its layout is versioned with
//! `PRAGMA user_version`; a file written by a newer build is refused rather
//! than downgraded.

use super::{CacheError, CacheResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Ordered schema steps, index `i` upgrades the file to version `i + 1`.
const SCHEMA_STEPS: &[&str] = &["CREATE TABLE IF NOT EXISTS cache_slots (
        slot_key TEXT PRIMARY KEY NOT NULL,
        payload TEXT NOT NULL,
        updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000)
    );"];

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Schema version written by this build.
pub fn schema_version() -> u32 {
    SCHEMA_STEPS.len() as u32
}

/// Opens (or creates) the cache file at `path` with the slot table ready.
pub fn open_cache_db(path: impl AsRef<Path>) -> CacheResult<Connection> {
    open_with("file", || Connection::open(path))
}

/// Opens a cache that lives only as long as the connection.
pub fn open_cache_db_in_memory() -> CacheResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with(
    mode: &str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> CacheResult<Connection> {
    let started_at = Instant::now();
    let opened = connect()
        .map_err(CacheError::from)
        .and_then(|mut conn| prepare(&mut conn).map(|()| conn));

    match &opened {
        Ok(_) => info!(
            "event=cache_db_open module=store status=ok mode={mode} schema_version={} duration_ms={}",
            schema_version(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=cache_db_open module=store status=error mode={mode} duration_ms={} error_code={} error={}",
            started_at.elapsed().as_millis(),
            error_code(err),
            err
        ),
    }
    opened
}

fn prepare(conn: &mut Connection) -> CacheResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    upgrade_schema(conn)
}

/// Runs every step past the file's version inside one transaction.
fn upgrade_schema(conn: &mut Connection) -> CacheResult<()> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let supported = schema_version();
    if found > supported {
        return Err(CacheError::Schema { found, supported });
    }
    if found == supported {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in &SCHEMA_STEPS[found as usize..] {
        tx.execute_batch(step)?;
    }
    tx.execute_batch(&format!("PRAGMA user_version = {supported};"))?;
    tx.commit()?;
    Ok(())
}

fn error_code(err: &CacheError) -> &'static str {
    match err {
        CacheError::Sqlite(_) => "cache_db_unavailable",
        CacheError::Schema { .. } => "cache_schema_too_new",
        CacheError::Corrupt(_) => "cache_corrupt",
    }
}

#[cfg(test)]
mod tests {
    use super::{open_cache_db_in_memory, schema_version, upgrade_schema};
    use rusqlite::Connection;

    #[test]
    fn upgrade_is_idempotent() {
        let mut conn = open_cache_db_in_memory().unwrap();
        upgrade_schema(&mut conn).unwrap();
        let version: u32 = conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, schema_version());
    }

    #[test]
    fn upgrade_creates_slot_table_on_blank_file() {
        let mut conn = Connection::open_in_memory().unwrap();
        upgrade_schema(&mut conn).unwrap();
        conn.execute(
            "INSERT INTO cache_slots (slot_key, payload) VALUES ('k', '{}');",
            [],
        )
        .unwrap();
    }
}
