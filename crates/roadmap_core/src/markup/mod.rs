//! Inline marker codec for topic text.
//!
//! # Responsibility
//! - Decode `**bold**`, `*italic*`, `` `code` ``, `[img:N]` and `[link:N]`
//!   markers embedded in plain strings.
//! - Encode the same markers from caret/selection edits.
//!
//! # Invariants
//! - Decoding never fails; malformed markers render as literal text.
//! - Reference markers index the owning topic's `images` / `links`.

pub mod decode;
pub mod edit;
pub mod image;
pub mod render;
pub mod scan;
