//! Render passes over decoded inline trees.

use crate::markup::decode::{decode, Inline, LinkTarget, MarkerResources};

/// Renders inline nodes as an HTML fragment.
///
/// Text is escaped. Line breaks are kept as-is; the container is expected
/// to use `white-space: pre-line`.
pub fn render_html(nodes: &[Inline]) -> String {
    let mut out = String::new();
    write_html(&mut out, nodes);
    out
}

/// Decodes `text` and wraps the rendered fragment in the formatted-text span.
pub fn render_formatted_text(text: &str, resources: &MarkerResources<'_>) -> String {
    format!(
        "<span class=\"formatted-text\" style=\"white-space: pre-line\">{}</span>",
        render_html(&decode(text, resources))
    )
}

/// Returns the visible text of inline nodes.
///
/// Links contribute their display text, images contribute nothing.
pub fn plain_text(nodes: &[Inline]) -> String {
    let mut out = String::new();
    write_plain(&mut out, nodes);
    out
}

fn write_html(out: &mut String, nodes: &[Inline]) {
    for node in nodes {
        match node {
            Inline::Text(text) => push_escaped(out, text),
            Inline::Bold(children) => {
                out.push_str("<strong>");
                write_html(out, children);
                out.push_str("</strong>");
            }
            Inline::Italic(children) => {
                out.push_str("<em>");
                write_html(out, children);
                out.push_str("</em>");
            }
            Inline::Code(code) => {
                out.push_str("<code style=\"white-space: pre-wrap\">");
                push_escaped(out, code);
                out.push_str("</code>");
            }
            Inline::Image { index, src } => {
                out.push_str("<img class=\"inline-image\" src=\"");
                push_escaped(out, src);
                out.push_str(&format!("\" alt=\"Image {}\">", index + 1));
            }
            Inline::Link { text, target, .. } => {
                match target {
                    LinkTarget::Internal(url) => {
                        out.push_str("<a class=\"formatted-link internal-link\" href=\"");
                        push_escaped(out, url);
                        out.push_str("\">");
                    }
                    LinkTarget::External(url) => {
                        out.push_str("<a class=\"formatted-link external-link\" href=\"");
                        push_escaped(out, url);
                        out.push_str("\" target=\"_blank\" rel=\"noopener noreferrer\">");
                    }
                }
                push_escaped(out, text);
                out.push_str("</a>");
            }
        }
    }
}

fn write_plain(out: &mut String, nodes: &[Inline]) {
    for node in nodes {
        match node {
            Inline::Text(text) | Inline::Code(text) => out.push_str(text),
            Inline::Bold(children) | Inline::Italic(children) => write_plain(out, children),
            Inline::Link { text, .. } => out.push_str(text),
            Inline::Image { .. } => {}
        }
    }
}

fn push_escaped(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
}
