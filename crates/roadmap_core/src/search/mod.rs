//! List filtering for the search box.
//!
//! # Responsibility
//! - Narrow subject/section/topic lists by a free-text query.
//!
//! # Invariants
//! - Matching is a case-insensitive substring test.
//! - Filtering preserves the original list order.

mod filter;

pub use filter::{filter_by_search, normalize_query, topic_search_text};
