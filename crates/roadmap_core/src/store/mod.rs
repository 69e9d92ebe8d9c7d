//! Document Store Client.
//!
//! # Responsibility
//! - Define the remote whole-document store contract and the local cache
//!   slot contract.
//! - Provide the cache-first reader / whole-document writer on top of them.
//!
//! # Invariants
//! - Writes always send the full document; there are no partial writes.
//! - Last write wins. There is no version token or conflict detection.
//! - Every remote failure classifies as "store unavailable".

use crate::model::document::Document;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod cache;
pub mod cache_db;
pub mod client;
pub mod remote;

pub type StoreResult<T> = Result<T, StoreError>;

/// Remote store failures.
///
/// All variants mean the same thing to callers: the store is unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Connection, DNS, TLS or timeout failure.
    Transport(String),
    /// Non-success HTTP status.
    Status { code: u16, body: String },
    /// Response body is not a valid document envelope.
    Decode(String),
    /// Request body could not be produced.
    Encode(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "store unavailable: {message}"),
            Self::Status { code, .. } => write!(f, "store unavailable: http status {code}"),
            Self::Decode(message) => write!(f, "store unavailable: invalid response: {message}"),
            Self::Encode(message) => write!(f, "store unavailable: invalid request: {message}"),
        }
    }
}

impl Error for StoreError {}

/// Remote whole-document store.
pub trait RemoteStore {
    /// Fetches the latest stored document.
    fn fetch_latest(&self) -> StoreResult<Document>;
    /// Replaces the stored document and returns the stored record.
    fn replace(&self, document: &Document) -> StoreResult<Document>;
}

impl<T: RemoteStore + ?Sized> RemoteStore for &T {
    fn fetch_latest(&self) -> StoreResult<Document> {
        (**self).fetch_latest()
    }

    fn replace(&self, document: &Document) -> StoreResult<Document> {
        (**self).replace(document)
    }
}

pub type CacheResult<T> = Result<T, CacheError>;

/// Local cache failures.
#[derive(Debug)]
pub enum CacheError {
    Sqlite(rusqlite::Error),
    /// Cache file was written by a newer build.
    Schema { found: u32, supported: u32 },
    /// Slot holds text that is not a document.
    Corrupt(serde_json::Error),
}

impl Display for CacheError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "cache database error: {err}"),
            Self::Schema { found, supported } => write!(
                f,
                "cache schema version {found} is newer than supported {supported}"
            ),
            Self::Corrupt(err) => write!(f, "cached document is corrupt: {err}"),
        }
    }
}

impl Error for CacheError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Schema { .. } => None,
            Self::Corrupt(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for CacheError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Single-slot persistent cache of the last fetched document.
pub trait DocumentCache {
    fn read(&self) -> CacheResult<Option<Document>>;
    fn write(&self, document: &Document) -> CacheResult<()>;
}

impl<T: DocumentCache + ?Sized> DocumentCache for &T {
    fn read(&self) -> CacheResult<Option<Document>> {
        (**self).read()
    }

    fn write(&self, document: &Document) -> CacheResult<()> {
        (**self).write(document)
    }
}
