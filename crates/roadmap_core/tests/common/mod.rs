#![allow(dead_code)]

use roadmap_core::{
    CacheError, CacheResult, DeleteGate, Document, DocumentCache, DocumentClient, RemoteStore, StoreError,
    StoreResult, Workspace,
};
use std::cell::{Cell, RefCell};

pub const SECRET: &str = "p";

/// In-memory remote store with switchable failures.
#[derive(Default)]
pub struct FakeRemote {
    stored: RefCell<Document>,
    pub fail_fetch: Cell<bool>,
    pub fail_replace: Cell<bool>,
    pub replace_calls: Cell<usize>,
}

impl FakeRemote {
    pub fn with_document(document: Document) -> Self {
        Self {
            stored: RefCell::new(document),
            ..Self::default()
        }
    }

    pub fn stored(&self) -> Document {
        self.stored.borrow().clone()
    }
}

impl RemoteStore for FakeRemote {
    fn fetch_latest(&self) -> StoreResult<Document> {
        if self.fail_fetch.get() {
            return Err(StoreError::Transport("connection refused".to_string()));
        }
        Ok(self.stored())
    }

    fn replace(&self, document: &Document) -> StoreResult<Document> {
        self.replace_calls.set(self.replace_calls.get() + 1);
        if self.fail_replace.get() {
            return Err(StoreError::Status {
                code: 503,
                body: "unavailable".to_string(),
            });
        }
        *self.stored.borrow_mut() = document.clone();
        Ok(document.clone())
    }
}

/// In-memory cache slot with switchable failures.
#[derive(Default)]
pub struct MemoryCache {
    slot: RefCell<Option<Document>>,
    pub fail_read: Cell<bool>,
    pub fail_write: Cell<bool>,
    pub writes: Cell<usize>,
}

impl MemoryCache {
    pub fn with_document(document: Document) -> Self {
        Self {
            slot: RefCell::new(Some(document)),
            ..Self::default()
        }
    }

    pub fn slot(&self) -> Option<Document> {
        self.slot.borrow().clone()
    }
}

impl DocumentCache for MemoryCache {
    fn read(&self) -> CacheResult<Option<Document>> {
        if self.fail_read.get() {
            let err = serde_json::from_str::<Document>("{\"subjects\":").unwrap_err();
            return Err(CacheError::Corrupt(err));
        }
        Ok(self.slot())
    }

    fn write(&self, document: &Document) -> CacheResult<()> {
        self.writes.set(self.writes.get() + 1);
        if self.fail_write.get() {
            return Err(CacheError::Sqlite(rusqlite::Error::InvalidQuery));
        }
        *self.slot.borrow_mut() = Some(document.clone());
        Ok(())
    }
}

/// Loaded workspace over borrowed fakes.
pub fn loaded_workspace<'a>(
    remote: &'a FakeRemote,
    cache: &'a MemoryCache,
) -> Workspace<&'a FakeRemote, &'a MemoryCache> {
    let mut workspace = Workspace::new(DocumentClient::new(remote, cache), DeleteGate::new(SECRET));
    workspace.load(|_| {});
    workspace
}
