//! Marker insertion and removal.
//!
//! # Responsibility
//! - Insert image/link references and toggle bold/italic/code wraps at byte
//!   offsets of a marker-encoded string.
//! - Remove images/links and re-index the remaining reference markers.
//!
//! # Invariants
//! - Offsets are UTF-8 byte offsets and must fall on char boundaries.
//! - Insertion appends to `images`/`links`; existing markers are untouched.
//! - After a removal every marker with index greater than the removed one is
//!   shifted down by exactly one.

use crate::model::document::{LinkRef, Topic};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::Range;

static IMAGE_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[img:([0-9]+)\]").expect("valid image marker regex"));
static LINK_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[link:([0-9]+)\]").expect("valid link marker regex"));
static HTTP_SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://").expect("valid scheme regex"));

/// Inline wrap kinds that can be toggled over a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrap {
    Bold,
    Italic,
    Code,
}

impl Wrap {
    pub fn delimiter(self) -> &'static str {
        match self {
            Self::Bold => "**",
            Self::Italic => "*",
            Self::Code => "`",
        }
    }
}

/// Direction taken by `toggle_wrap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapAction {
    Wrapped,
    Unwrapped,
}

/// Result of a wrap toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapEdit {
    pub text: String,
    pub action: WrapAction,
    /// Byte range of the (possibly trimmed) selected content in `text`.
    pub selection: Range<usize>,
    /// Caret position after the edit.
    pub cursor: usize,
}

/// Errors from marker edit operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerEditError {
    /// Offset is past the end or not on a char boundary.
    InvalidOffset { offset: usize, len: usize },
    /// Range start is after its end.
    InvalidRange { start: usize, end: usize },
    /// Operation requires a non-empty selection.
    EmptySelection,
    /// External link URL is blank after trim.
    EmptyUrl,
    /// No image at this index.
    ImageIndexOutOfRange { index: usize, len: usize },
    /// No link at this index.
    LinkIndexOutOfRange { index: usize, len: usize },
}

impl Display for MarkerEditError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidOffset { offset, len } => {
                write!(f, "offset {offset} is not a char boundary of text with length {len}")
            }
            Self::InvalidRange { start, end } => {
                write!(f, "selection start {start} is after end {end}")
            }
            Self::EmptySelection => write!(f, "selection must not be empty"),
            Self::EmptyUrl => write!(f, "link url must not be blank"),
            Self::ImageIndexOutOfRange { index, len } => {
                write!(f, "image index {index} out of range ({len} images)")
            }
            Self::LinkIndexOutOfRange { index, len } => {
                write!(f, "link index {index} out of range ({len} links)")
            }
        }
    }
}

impl Error for MarkerEditError {}

pub type MarkerEditResult<T> = Result<T, MarkerEditError>;

/// Editable marker text together with the resources its markers index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichTextDraft {
    pub text: String,
    pub images: Vec<String>,
    pub links: Vec<LinkRef>,
}

impl RichTextDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            images: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Copies the name, images and links of a topic.
    pub fn from_topic(topic: &Topic) -> Self {
        Self {
            text: topic.name.clone(),
            images: topic.images.clone(),
            links: topic.links.clone(),
        }
    }

    /// Appends `resource` to `images` and inserts `[img:N]` at `cursor`
    /// (end of text when `None`).
    ///
    /// Returns the new caret position, right after the inserted marker.
    pub fn insert_image(
        &mut self,
        cursor: Option<usize>,
        resource: impl Into<String>,
    ) -> MarkerEditResult<usize> {
        let at = cursor.unwrap_or(self.text.len());
        check_offset(&self.text, at)?;

        self.images.push(resource.into());
        let marker = image_marker(self.images.len() - 1);
        self.text.insert_str(at, &marker);
        Ok(at + marker.len())
    }

    /// Replaces the selection with `[link:N]`, storing the selected text and
    /// `url` as link `N`.
    ///
    /// Returns the new caret position, right after the inserted marker.
    pub fn insert_link(
        &mut self,
        selection: Range<usize>,
        url: impl Into<String>,
    ) -> MarkerEditResult<usize> {
        check_range(&self.text, &selection)?;
        if selection.is_empty() {
            return Err(MarkerEditError::EmptySelection);
        }

        let selected = self.text[selection.clone()].to_string();
        self.links.push(LinkRef::new(selected, url));
        let marker = link_marker(self.links.len() - 1);
        self.text.replace_range(selection.clone(), &marker);
        Ok(selection.start + marker.len())
    }

    /// Toggles `wrap` over the selection in place.
    pub fn toggle_wrap(
        &mut self,
        selection: Range<usize>,
        wrap: Wrap,
    ) -> MarkerEditResult<WrapEdit> {
        let edit = toggle_wrap(&self.text, selection, wrap)?;
        self.text = edit.text.clone();
        Ok(edit)
    }

    /// Removes image `index`, drops its first marker and re-indexes the rest.
    pub fn remove_image(&mut self, index: usize) -> MarkerEditResult<String> {
        if index >= self.images.len() {
            return Err(MarkerEditError::ImageIndexOutOfRange {
                index,
                len: self.images.len(),
            });
        }

        let removed = self.images.remove(index);
        let without = self.text.replacen(&image_marker(index), "", 1);
        self.text = shift_markers_down(&IMAGE_MARKER_RE, &without, index, image_marker);
        Ok(removed)
    }

    /// Removes link `index`, replaces its first marker with the link's display
    /// text and re-indexes the rest.
    pub fn remove_link(&mut self, index: usize) -> MarkerEditResult<LinkRef> {
        if index >= self.links.len() {
            return Err(MarkerEditError::LinkIndexOutOfRange {
                index,
                len: self.links.len(),
            });
        }

        let removed = self.links.remove(index);
        let without = self.text.replacen(&link_marker(index), &removed.text, 1);
        self.text = shift_markers_down(&LINK_MARKER_RE, &without, index, link_marker);
        Ok(removed)
    }
}

/// Toggles `wrap` over `selection` of `text`.
///
/// When the delimiter sits immediately outside the selection on both sides
/// it is stripped, otherwise the selection is wrapped. Code wraps trim
/// surrounding whitespace from the selection first, unless that empties it.
pub fn toggle_wrap(text: &str, selection: Range<usize>, wrap: Wrap) -> MarkerEditResult<WrapEdit> {
    check_range(text, &selection)?;
    if selection.is_empty() {
        return Err(MarkerEditError::EmptySelection);
    }

    let delimiter = wrap.delimiter();
    let width = delimiter.len();
    let selected = &text[selection.clone()];

    let before = selection
        .start
        .checked_sub(width)
        .and_then(|start| text.get(start..selection.start));
    let after = text.get(selection.end..selection.end + width);

    if before == Some(delimiter) && after == Some(delimiter) {
        let start = selection.start - width;
        let mut out = String::with_capacity(text.len() - 2 * width);
        out.push_str(&text[..start]);
        out.push_str(selected);
        out.push_str(&text[selection.end + width..]);
        let end = start + selected.len();
        return Ok(WrapEdit {
            text: out,
            action: WrapAction::Unwrapped,
            selection: start..end,
            cursor: end,
        });
    }

    let content = match wrap {
        Wrap::Code => match selected.trim() {
            "" => selected,
            trimmed => trimmed,
        },
        Wrap::Bold | Wrap::Italic => selected,
    };

    let mut out = String::with_capacity(text.len() + 2 * width);
    out.push_str(&text[..selection.start]);
    out.push_str(delimiter);
    out.push_str(content);
    out.push_str(delimiter);
    out.push_str(&text[selection.end..]);

    let inner_start = selection.start + width;
    let inner_end = inner_start + content.len();
    Ok(WrapEdit {
        text: out,
        action: WrapAction::Wrapped,
        selection: inner_start..inner_end,
        cursor: inner_end + width,
    })
}

/// Prepends `https://` to URLs without an http(s) scheme.
pub fn normalize_external_url(raw: &str) -> MarkerEditResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(MarkerEditError::EmptyUrl);
    }
    if HTTP_SCHEME_RE.is_match(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("https://{trimmed}"))
    }
}

pub fn image_marker(index: usize) -> String {
    format!("[img:{index}]")
}

pub fn link_marker(index: usize) -> String {
    format!("[link:{index}]")
}

fn shift_markers_down(
    pattern: &Regex,
    text: &str,
    removed: usize,
    marker: fn(usize) -> String,
) -> String {
    pattern
        .replace_all(text, |caps: &Captures<'_>| {
            match caps[1].parse::<usize>() {
                Ok(index) if index > removed => marker(index - 1),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn check_offset(text: &str, offset: usize) -> MarkerEditResult<()> {
    if text.is_char_boundary(offset) {
        Ok(())
    } else {
        Err(MarkerEditError::InvalidOffset {
            offset,
            len: text.len(),
        })
    }
}

fn check_range(text: &str, range: &Range<usize>) -> MarkerEditResult<()> {
    if range.start > range.end {
        return Err(MarkerEditError::InvalidRange {
            start: range.start,
            end: range.end,
        });
    }
    check_offset(text, range.start)?;
    check_offset(text, range.end)
}
