//! Roadmap domain model.
//!
//! # Responsibility
//! - Define the Subject → Section → Topic hierarchy persisted as one document.
//!
//! # Invariants
//! - Every entity is identified by an opaque `EntityId`.
//! - Deletion removes an entity from its parent list; there are no tombstones.

pub mod document;
