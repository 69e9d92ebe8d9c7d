//! Recursive marker decoder.
//!
//! # Responsibility
//! - Turn marker text into an inline tree, resolving `[img:N]` / `[link:N]`
//!   against a topic's out-of-band resources.
//!
//! # Invariants
//! - Decoding is total: every input produces a tree, nothing is raised.
//! - Bold/italic contents are decoded recursively; code content is literal.
//! - Out-of-range references decode to their literal token text.
//! - Adjacent text nodes are merged, so plain input yields one `Text` node.

use crate::markup::scan::{scan, TokenKind};
use crate::model::document::{LinkRef, Topic};

/// Resolved link destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// In-app navigation path (starts with `/`).
    Internal(String),
    /// Anything else; opened outside the app.
    External(String),
}

impl LinkTarget {
    pub fn of(link: &LinkRef) -> Self {
        if link.is_internal() {
            Self::Internal(link.url.clone())
        } else {
            Self::External(link.url.clone())
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Internal(url) | Self::External(url) => url,
        }
    }
}

/// Decoded inline node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Bold(Vec<Inline>),
    Italic(Vec<Inline>),
    /// Literal, whitespace-preserving content.
    Code(String),
    Image { index: usize, src: String },
    Link {
        index: usize,
        text: String,
        target: LinkTarget,
    },
}

/// Out-of-band resources that reference markers point into.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerResources<'a> {
    pub images: &'a [String],
    pub links: &'a [LinkRef],
}

impl<'a> MarkerResources<'a> {
    pub fn new(images: &'a [String], links: &'a [LinkRef]) -> Self {
        Self { images, links }
    }

    /// No images or links; every reference marker stays literal.
    pub fn none() -> Self {
        Self::default()
    }
}

impl<'a> From<&'a Topic> for MarkerResources<'a> {
    fn from(topic: &'a Topic) -> Self {
        Self::new(&topic.images, &topic.links)
    }
}

/// Decodes marker text into an inline tree.
pub fn decode(text: &str, resources: &MarkerResources<'_>) -> Vec<Inline> {
    let mut nodes = Vec::new();
    for token in scan(text) {
        let literal = &text[token.span.clone()];
        let node = match token.kind {
            TokenKind::Plain => Inline::Text(literal.to_string()),
            TokenKind::ImageRef { index } => resolve_image(index, literal, resources),
            TokenKind::LinkRef { index } => resolve_link(index, literal, resources),
            TokenKind::Bold { inner } => Inline::Bold(decode(&text[inner], resources)),
            TokenKind::Italic { inner } => Inline::Italic(decode(&text[inner], resources)),
            TokenKind::Code { inner } => Inline::Code(text[inner].to_string()),
        };
        push_coalesced(&mut nodes, node);
    }
    nodes
}

/// Decodes a topic name against the topic's own images and links.
pub fn decode_topic_name(topic: &Topic) -> Vec<Inline> {
    decode(&topic.name, &MarkerResources::from(topic))
}

fn resolve_image(index: Option<usize>, literal: &str, resources: &MarkerResources<'_>) -> Inline {
    match index.and_then(|index| resources.images.get(index).map(|src| (index, src))) {
        Some((index, src)) => Inline::Image {
            index,
            src: src.clone(),
        },
        None => Inline::Text(literal.to_string()),
    }
}

fn resolve_link(index: Option<usize>, literal: &str, resources: &MarkerResources<'_>) -> Inline {
    match index.and_then(|index| resources.links.get(index).map(|link| (index, link))) {
        Some((index, link)) => Inline::Link {
            index,
            text: link.text.clone(),
            target: LinkTarget::of(link),
        },
        None => Inline::Text(literal.to_string()),
    }
}

fn push_coalesced(nodes: &mut Vec<Inline>, node: Inline) {
    if let (Some(Inline::Text(previous)), Inline::Text(next)) = (nodes.last_mut(), &node) {
        previous.push_str(next);
        return;
    }
    nodes.push(node);
}

#[cfg(test)]
mod tests {
    use super::{decode, Inline, LinkTarget, MarkerResources};
    use crate::model::document::LinkRef;

    #[test]
    fn dangling_reference_merges_into_surrounding_text() {
        let nodes = decode("see [img:3] here", &MarkerResources::none());
        assert_eq!(nodes, vec![Inline::Text("see [img:3] here".to_string())]);
    }

    #[test]
    fn link_target_kind_follows_leading_slash() {
        let links = vec![
            LinkRef::new("docs", "https://example.com"),
            LinkRef::new("section", "/subject/a/section/b"),
        ];
        let resources = MarkerResources::new(&[], &links);
        let nodes = decode("[link:0][link:1]", &resources);
        assert_eq!(
            nodes,
            vec![
                Inline::Link {
                    index: 0,
                    text: "docs".to_string(),
                    target: LinkTarget::External("https://example.com".to_string()),
                },
                Inline::Link {
                    index: 1,
                    text: "section".to_string(),
                    target: LinkTarget::Internal("/subject/a/section/b".to_string()),
                },
            ]
        );
    }

    #[test]
    fn code_content_is_not_decoded() {
        let nodes = decode("`**x** [img:0]`", &MarkerResources::none());
        assert_eq!(nodes, vec![Inline::Code("**x** [img:0]".to_string())]);
    }
}
