//! Cache-first document reader and whole-document writer.
//!
//! # Responsibility
//! - Serve the cached document for instant first paint, then the
//!   authoritative one.
//! - Persist full replacements and refresh the cache on success only.
//!
//! # Invariants
//! - `load` never fails; it degrades to cache-or-empty.
//! - A failed `replace` leaves cache and in-memory document untouched.

use super::{DocumentCache, RemoteStore, StoreResult};
use crate::model::document::Document;
use log::{info, warn};

/// Document store client combining a remote store with a local cache slot.
pub struct DocumentClient<R: RemoteStore, C: DocumentCache> {
    remote: R,
    cache: C,
    current: Document,
}

impl<R: RemoteStore, C: DocumentCache> DocumentClient<R, C> {
    /// Creates a client holding an empty in-memory document.
    pub fn new(remote: R, cache: C) -> Self {
        Self {
            remote,
            cache,
            current: Document::default(),
        }
    }

    /// Last document loaded or successfully replaced.
    pub fn document(&self) -> &Document {
        &self.current
    }

    /// Reads the cache slot without network I/O.
    ///
    /// Unreadable or corrupt slots read as `None`.
    pub fn cached(&self) -> Option<Document> {
        match self.cache.read() {
            Ok(cached) => cached,
            Err(err) => {
                warn!(
                    "event=cache_read module=store status=error error_code=cache_unreadable error={}",
                    err
                );
                None
            }
        }
    }

    /// Loads the document, cache first.
    ///
    /// `on_cached` runs with the cached document before the network fetch
    /// starts, and only when a cached document exists. The returned document
    /// is the fetched one, or cache-or-empty when the store is unavailable.
    pub fn load(&mut self, on_cached: impl FnOnce(&Document)) -> Document {
        let cached = self.cached();
        if let Some(document) = &cached {
            info!(
                "event=document_load module=store status=cache_hit subjects={}",
                document.subjects.len()
            );
            self.current = document.clone();
            on_cached(document);
        }

        match self.remote.fetch_latest() {
            Ok(fetched) => {
                self.write_cache(&fetched);
                info!(
                    "event=document_load module=store status=ok subjects={}",
                    fetched.subjects.len()
                );
                self.current = fetched.clone();
                fetched
            }
            Err(err) => {
                let fallback = cached.unwrap_or_default();
                warn!(
                    "event=document_load module=store status=fallback subjects={} error={}",
                    fallback.subjects.len(),
                    err
                );
                self.current = fallback.clone();
                fallback
            }
        }
    }

    /// Replaces the whole remote document.
    ///
    /// On success the cache and in-memory document become `document`; on
    /// failure nothing local changes and the error is returned.
    pub fn replace(&mut self, document: &Document) -> StoreResult<Document> {
        let stored = self.remote.replace(document)?;
        self.write_cache(document);
        self.current = document.clone();
        Ok(stored)
    }

    fn write_cache(&self, document: &Document) {
        if let Err(err) = self.cache.write(document) {
            warn!(
                "event=cache_write module=store status=error error_code=cache_write_failed error={}",
                err
            );
        }
    }
}
