//! Flat marker scanner.
//!
//! # Responsibility
//! - Split one nesting level of marker text into a left-to-right token stream.
//!
//! # Invariants
//! - Token spans are contiguous and cover the whole input.
//! - At each position alternatives are tried in the order
//!   `[img:N]`, `[link:N]`, `**bold**`, `*italic*`, `` `code` ``.
//! - Delimited spans need at least one content char, close at the first
//!   matching delimiter and never cross a line terminator.
//! - Unterminated delimiters stay inside `Plain` tokens.

use std::ops::Range;

/// Kind of a scanned token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Text with no marker.
    Plain,
    /// `[img:N]`. `index` is `None` when the digits overflow `usize`.
    ImageRef { index: Option<usize> },
    /// `[link:N]`. `index` is `None` when the digits overflow `usize`.
    LinkRef { index: Option<usize> },
    /// `**…**`; `inner` is the byte range of the content.
    Bold { inner: Range<usize> },
    /// `*…*`
    Italic { inner: Range<usize> },
    /// `` `…` ``
    Code { inner: Range<usize> },
}

/// One scanned token with its byte span in the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

const IMAGE_OPEN: &str = "[img:";
const LINK_OPEN: &str = "[link:";

/// Scans `text` into tokens. Never fails.
pub fn scan(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut plain_start = 0;
    let mut cursor = 0;

    while cursor < text.len() {
        match match_at(text, cursor) {
            Some(token) => {
                if plain_start < token.span.start {
                    tokens.push(Token {
                        kind: TokenKind::Plain,
                        span: plain_start..token.span.start,
                    });
                }
                cursor = token.span.end;
                plain_start = cursor;
                tokens.push(token);
            }
            None => cursor += char_len_at(text, cursor),
        }
    }

    if plain_start < text.len() {
        tokens.push(Token {
            kind: TokenKind::Plain,
            span: plain_start..text.len(),
        });
    }
    tokens
}

fn match_at(text: &str, at: usize) -> Option<Token> {
    match *text[at..].as_bytes().first()? {
        b'[' => match_reference(text, at, IMAGE_OPEN)
            .map(|(span, index)| Token {
                kind: TokenKind::ImageRef { index },
                span,
            })
            .or_else(|| {
                match_reference(text, at, LINK_OPEN).map(|(span, index)| Token {
                    kind: TokenKind::LinkRef { index },
                    span,
                })
            }),
        b'*' => match_delimited(text, at, "**")
            .map(|(span, inner)| Token {
                kind: TokenKind::Bold { inner },
                span,
            })
            .or_else(|| {
                match_delimited(text, at, "*").map(|(span, inner)| Token {
                    kind: TokenKind::Italic { inner },
                    span,
                })
            }),
        b'`' => match_delimited(text, at, "`").map(|(span, inner)| Token {
            kind: TokenKind::Code { inner },
            span,
        }),
        _ => None,
    }
}

/// Matches `<open><ascii digits>]` at `at`.
fn match_reference(text: &str, at: usize, open: &str) -> Option<(Range<usize>, Option<usize>)> {
    let rest = text[at..].strip_prefix(open)?;
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || rest.as_bytes().get(digits) != Some(&b']') {
        return None;
    }
    let index = rest[..digits].parse::<usize>().ok();
    let end = at + open.len() + digits + 1;
    Some((at..end, index))
}

/// Matches `<delim>content<delim>` lazily at `at`.
///
/// Returns the full span and the content range.
fn match_delimited(
    text: &str,
    at: usize,
    delim: &str,
) -> Option<(Range<usize>, Range<usize>)> {
    if !text[at..].starts_with(delim) {
        return None;
    }
    let content_start = at + delim.len();
    let mut chars = text[content_start..].char_indices();

    let (_, first) = chars.next()?;
    if is_line_terminator(first) {
        return None;
    }

    let mut position = content_start + first.len_utf8();
    loop {
        if text[position..].starts_with(delim) {
            return Some((at..position + delim.len(), content_start..position));
        }
        let (_, next) = chars.next()?;
        if is_line_terminator(next) {
            return None;
        }
        position += next.len_utf8();
    }
}

fn is_line_terminator(value: char) -> bool {
    matches!(value, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn char_len_at(text: &str, at: usize) -> usize {
    text[at..].chars().next().map_or(1, char::len_utf8)
}

#[cfg(test)]
mod tests {
    use super::{scan, Token, TokenKind};

    fn kinds(text: &str) -> Vec<TokenKind> {
        scan(text).into_iter().map(|token| token.kind).collect()
    }

    #[test]
    fn plain_text_is_one_token() {
        assert_eq!(
            scan("hello world"),
            vec![Token {
                kind: TokenKind::Plain,
                span: 0..11
            }]
        );
    }

    #[test]
    fn empty_text_has_no_tokens() {
        assert!(scan("").is_empty());
    }

    #[test]
    fn double_star_prefers_bold_over_italic() {
        assert_eq!(kinds("**b**"), vec![TokenKind::Bold { inner: 2..3 }]);
    }

    #[test]
    fn italic_closes_at_first_star() {
        assert_eq!(
            kinds("*a* and *b*"),
            vec![
                TokenKind::Italic { inner: 1..2 },
                TokenKind::Plain,
                TokenKind::Italic { inner: 9..10 },
            ]
        );
    }

    #[test]
    fn delimiters_do_not_cross_line_breaks() {
        assert_eq!(kinds("*a\nb*"), vec![TokenKind::Plain]);
        assert_eq!(kinds("`x\r\ny`"), vec![TokenKind::Plain]);
    }

    #[test]
    fn empty_delimited_content_does_not_match() {
        assert_eq!(kinds("``"), vec![TokenKind::Plain]);
        assert_eq!(
            kinds("****"),
            vec![TokenKind::Italic { inner: 1..2 }, TokenKind::Plain]
        );
    }

    #[test]
    fn references_need_digits_and_closing_bracket() {
        assert_eq!(kinds("[img:]"), vec![TokenKind::Plain]);
        assert_eq!(kinds("[img:1"), vec![TokenKind::Plain]);
        assert_eq!(kinds("[img:x]"), vec![TokenKind::Plain]);
        assert_eq!(
            kinds("[img:12]"),
            vec![TokenKind::ImageRef { index: Some(12) }]
        );
        assert_eq!(kinds("[link:0]"), vec![TokenKind::LinkRef { index: Some(0) }]);
    }

    #[test]
    fn overflowing_index_is_kept_as_unresolved_reference() {
        assert_eq!(
            kinds("[img:99999999999999999999999]"),
            vec![TokenKind::ImageRef { index: None }]
        );
    }

    #[test]
    fn multibyte_text_keeps_char_boundaries() {
        let text = "привет *мир* ✓";
        let tokens = scan(text);
        assert_eq!(tokens.len(), 3);
        for token in tokens {
            assert!(text.is_char_boundary(token.span.start));
            assert!(text.is_char_boundary(token.span.end));
        }
    }
}
