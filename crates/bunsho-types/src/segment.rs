//! Indexed content segments produced by the markdown encoder.
//!
//! A segment covers `[start_index, end_index)` in the index space the content
//! will occupy once inserted. Segments for one encode pass are contiguous:
//! each segment starts exactly where the previous one ended.

use serde::{Deserialize, Serialize};
use strum::EnumString;

/// Length of a string in UTF-16 code units.
///
/// The remote index space counts UTF-16 code units, not bytes and not chars.
/// An astral-plane character (emoji) occupies two indices.
pub fn utf16_len(s: &str) -> u32 {
    s.encode_utf16().count() as u32
}

/// What a segment carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum SegmentKind {
    /// Unstyled literal text.
    #[strum(serialize = "plain_text", serialize = "plain")]
    PlainText,
    /// Text carrying an explicit style (bold/italic/font size).
    #[strum(serialize = "styled_text", serialize = "styled")]
    StyledText,
    /// A line terminator occupying one index; `text` is empty.
    #[strum(serialize = "paragraph_break", serialize = "break")]
    ParagraphBreak,
}

impl SegmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentKind::PlainText => "plain_text",
            SegmentKind::StyledText => "styled_text",
            SegmentKind::ParagraphBreak => "paragraph_break",
        }
    }
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Character style attached to a [`SegmentKind::StyledText`] segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    /// Font size in points, set for header tiers (H1=18, H2=16, H3=14).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size_pt: Option<u16>,
}

impl TextStyle {
    /// Bold with no size override (inline `**...**`).
    pub fn bold() -> Self {
        Self { bold: true, ..Self::default() }
    }

    /// Italic with no size override (inline `*...*`).
    pub fn italic() -> Self {
        Self { italic: true, ..Self::default() }
    }

    /// Bold at a header-tier size.
    pub fn header(font_size_pt: u16) -> Self {
        Self {
            bold: true,
            italic: false,
            font_size_pt: Some(font_size_pt),
        }
    }
}

/// One contiguous unit of encoded content.
///
/// Invariants for a sequence produced by one encode pass:
/// - `start_index >= 1`, `end_index >= start_index`
/// - `segment[i].end_index == segment[i + 1].start_index`
/// - a heading segment spans `utf16_len(text) + 1`: its paragraph terminator
///   belongs to the heading's span
/// - any other text-bearing segment spans exactly `utf16_len(text)`; only
///   degenerate styled segments from empty marker pairs are zero-length
/// - a `ParagraphBreak` has empty text and length exactly 1
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedSegment {
    /// Inclusive start in the eventual index space.
    pub start_index: u32,
    /// Exclusive end.
    pub end_index: u32,
    pub kind: SegmentKind,
    /// Literal content; empty for paragraph breaks.
    pub text: String,
    /// Style, present only for styled segments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<TextStyle>,
}

impl IndexedSegment {
    /// Plain literal text starting at `start_index`.
    pub fn plain(start_index: u32, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            start_index,
            end_index: start_index + utf16_len(&text),
            kind: SegmentKind::PlainText,
            text,
            style: None,
        }
    }

    /// Styled text starting at `start_index`.
    pub fn styled(start_index: u32, text: impl Into<String>, style: TextStyle) -> Self {
        let text = text.into();
        Self {
            start_index,
            end_index: start_index + utf16_len(&text),
            kind: SegmentKind::StyledText,
            text,
            style: Some(style),
        }
    }

    /// A heading line starting at `start_index`, bold at the given size.
    ///
    /// Spans one index past its text: the remote model closes a heading
    /// paragraph immediately, and that terminator counts against the
    /// heading's span.
    pub fn heading(start_index: u32, text: impl Into<String>, font_size_pt: u16) -> Self {
        let text = text.into();
        Self {
            start_index,
            end_index: start_index + utf16_len(&text) + 1,
            kind: SegmentKind::StyledText,
            text,
            style: Some(TextStyle::header(font_size_pt)),
        }
    }

    /// A one-index paragraph break at `start_index`.
    pub fn paragraph_break(start_index: u32) -> Self {
        Self {
            start_index,
            end_index: start_index + 1,
            kind: SegmentKind::ParagraphBreak,
            text: String::new(),
            style: None,
        }
    }

    /// Number of indices this segment occupies.
    pub fn len(&self) -> u32 {
        self.end_index - self.start_index
    }

    /// True for zero-length degenerate segments.
    pub fn is_empty(&self) -> bool {
        self.end_index == self.start_index
    }

    /// The text this segment contributes to the document, breaks included.
    pub fn rendered_text(&self) -> &str {
        match self.kind {
            SegmentKind::ParagraphBreak => "\n",
            _ => &self.text,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf16_len_counts_code_units() {
        assert_eq!(utf16_len(""), 0);
        assert_eq!(utf16_len("abc"), 3);
        assert_eq!(utf16_len("café"), 4);
        // Astral-plane: two UTF-16 code units.
        assert_eq!(utf16_len("🦀"), 2);
    }

    #[test]
    fn test_plain_segment_span() {
        let seg = IndexedSegment::plain(1, "hello");
        assert_eq!(seg.start_index, 1);
        assert_eq!(seg.end_index, 6);
        assert_eq!(seg.len(), 5);
        assert_eq!(seg.kind, SegmentKind::PlainText);
        assert!(seg.style.is_none());
    }

    #[test]
    fn test_break_is_one_index_wide() {
        let seg = IndexedSegment::paragraph_break(7);
        assert_eq!(seg.len(), 1);
        assert!(seg.text.is_empty());
        assert_eq!(seg.rendered_text(), "\n");
    }

    #[test]
    fn test_heading_spans_text_plus_terminator() {
        let seg = IndexedSegment::heading(1, "Title", 18);
        assert_eq!(seg.start_index, 1);
        assert_eq!(seg.end_index, 7);
        assert_eq!(seg.len(), 6);
        let style = seg.style.unwrap();
        assert!(style.bold);
        assert_eq!(style.font_size_pt, Some(18));
    }

    #[test]
    fn test_kind_parsing() {
        use std::str::FromStr;
        assert_eq!(SegmentKind::from_str("plain_text").ok(), Some(SegmentKind::PlainText));
        assert_eq!(SegmentKind::from_str("BREAK").ok(), Some(SegmentKind::ParagraphBreak));
        assert!(SegmentKind::from_str("bogus").is_err());
    }
}
