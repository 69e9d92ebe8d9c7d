use crate::markup::decode::decode_topic_name;
use crate::markup::render::plain_text;
use crate::model::document::Topic;

/// Lowercases and trims raw search box input.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Returns items whose text contains `query`, ignoring case.
///
/// An empty query keeps every item.
pub fn filter_by_search<'a, T>(
    items: &'a [T],
    query: &str,
    text_of: impl Fn(&T) -> String,
) -> Vec<&'a T> {
    let query = normalize_query(query);
    if query.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| text_of(*item).to_lowercase().contains(&query))
        .collect()
}

/// Visible text of a topic name, with markers decoded.
pub fn topic_search_text(topic: &Topic) -> String {
    plain_text(&decode_topic_name(topic))
}
