//! Core domain logic for the Roadmap organizer.
//! This crate is the single source of truth for business invariants.

pub mod config;
pub mod logging;
pub mod markup;
pub mod model;
pub mod ordering;
pub mod search;
pub mod service;
pub mod store;

pub use config::{AppConfig, ConfigError, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use markup::decode::{decode, decode_topic_name, Inline, LinkTarget, MarkerResources};
pub use markup::edit::{MarkerEditError, RichTextDraft, Wrap, WrapAction, WrapEdit};
pub use markup::image::{image_data_url, validate_image_upload, ImageRejected, MAX_IMAGE_BYTES};
pub use markup::render::{plain_text, render_formatted_text, render_html};
pub use model::document::{
    new_entity_id, Document, EntityId, LinkRef, Priority, Section, Subject, Topic,
};
pub use ordering::{move_by_id, move_element};
pub use search::{filter_by_search, normalize_query, topic_search_text};
pub use service::delete_gate::DeleteGate;
pub use service::notice::Notice;
pub use service::sync_state::SyncState;
pub use service::workspace::Workspace;
pub use service::{parse_tags, TopicDetails, WorkspaceError, WorkspaceResult};
pub use store::cache::SqliteDocumentCache;
pub use store::cache_db::{open_cache_db, open_cache_db_in_memory};
pub use store::client::DocumentClient;
pub use store::remote::JsonBinStore;
pub use store::{CacheError, CacheResult, DocumentCache, RemoteStore, StoreError, StoreResult};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
