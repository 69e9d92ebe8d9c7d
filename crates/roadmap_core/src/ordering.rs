//! Stable list reordering for drag-and-drop gestures.
//!
//! # Invariants
//! - A move never swaps: every other element keeps its relative order.
//! - Cancelled gestures and same-slot drops are no-ops (`None`), so callers
//!   can skip persistence.

use crate::model::document::{Section, Subject, Topic};

/// Entities addressable by id within a list.
pub trait Identified {
    fn entity_id(&self) -> &str;
}

impl Identified for Subject {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

impl Identified for Section {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

impl Identified for Topic {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

/// Moves the element at `source` to `target`.
///
/// Returns `None` when `target` is `None` (gesture cancelled), when both
/// indices are equal, or when either index is out of bounds.
pub fn move_element<T: Clone>(items: &[T], source: usize, target: Option<usize>) -> Option<Vec<T>> {
    let target = target?;
    if source == target || source >= items.len() || target >= items.len() {
        return None;
    }

    let mut moved = items.to_vec();
    let item = moved.remove(source);
    moved.insert(target, item);
    Some(moved)
}

/// Moves the element with id `active_id` to the slot of `over_id`.
///
/// Mirrors a drag-end event: `over_id` is `None` when the item was dropped
/// outside the list.
pub fn move_by_id<T: Clone + Identified>(
    items: &[T],
    active_id: &str,
    over_id: Option<&str>,
) -> Option<Vec<T>> {
    let over_id = over_id?;
    if active_id == over_id {
        return None;
    }
    let source = position_of(items, active_id)?;
    let target = position_of(items, over_id);
    move_element(items, source, target)
}

fn position_of<T: Identified>(items: &[T], id: &str) -> Option<usize> {
    items.iter().position(|item| item.entity_id() == id)
}
