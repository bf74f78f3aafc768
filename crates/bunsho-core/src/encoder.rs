//! Markdown-to-segment content encoder.
//!
//! A pure, single-pass function: ordered input lines in, an ordered run of
//! [`IndexedSegment`]s out. The cursor starts at the caller's insertion
//! origin and advances by exactly each segment's span, so the produced
//! sequence reproduces the index layout the content will occupy once
//! inserted — no adjustment needed downstream.
//!
//! Supported constructs: `#`/`##`/`###` headers (bold, tier-sized), inline
//! `**bold**` and `*italic*` runs, and blank-line paragraph breaks. Nothing
//! else is modeled; anything unrecognized is literal text.

use std::sync::LazyLock;

use regex::Regex;

use bunsho_types::{IndexedSegment, TextStyle};

/// Header font sizes by tier, in points.
const H1_PT: u16 = 18;
const H2_PT: u16 = 16;
const H3_PT: u16 = 14;

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold marker regex"));
static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("italic marker regex"));

/// Encode markdown lines into contiguous indexed segments.
///
/// The first segment starts exactly at `origin_index` (1 for a brand-new
/// document body). A heading's span includes the paragraph terminator that
/// closes it; body lines emit no trailing breaks of their own — paragraph
/// separation between body lines is carried by blank input lines only.
pub fn encode<S: AsRef<str>>(lines: &[S], origin_index: u32) -> Vec<IndexedSegment> {
    let mut segments = Vec::new();
    let mut cursor = origin_index;

    for line in lines {
        let line = line.as_ref();

        if line.trim().is_empty() {
            let seg = IndexedSegment::paragraph_break(cursor);
            cursor = seg.end_index;
            segments.push(seg);
            continue;
        }

        if let Some((prefix_len, font_size_pt)) = header_tier(line) {
            let text = line[prefix_len..].trim();
            // Heading spans cover text plus their own paragraph terminator.
            let seg = IndexedSegment::heading(cursor, text, font_size_pt);
            cursor = seg.end_index;
            segments.push(seg);
            continue;
        }

        encode_paragraph(line, &mut cursor, &mut segments);
    }

    segments
}

/// Encode a whole markdown string, splitting on newlines.
pub fn encode_markdown(markdown: &str, origin_index: u32) -> Vec<IndexedSegment> {
    let lines: Vec<&str> = markdown.split('\n').collect();
    encode(&lines, origin_index)
}

/// Match a header prefix, longest first so `###` is not misread as `#`.
fn header_tier(line: &str) -> Option<(usize, u16)> {
    if line.starts_with("### ") {
        Some((4, H3_PT))
    } else if line.starts_with("## ") {
        Some((3, H2_PT))
    } else if line.starts_with("# ") {
        Some((2, H1_PT))
    } else {
        None
    }
}

/// Scan one body line left to right for bold/italic runs.
///
/// The earliest-starting marker wins; on an equal start offset bold wins
/// (two asterisks are consumed greedily before single-asterisk italic is
/// considered). An unterminated marker never matches and stays literal.
/// Empty marker pairs (`****`, `**`) produce zero-length styled segments
/// that consume their markers without advancing the cursor.
fn encode_paragraph<'a>(line: &'a str, cursor: &mut u32, out: &mut Vec<IndexedSegment>) {
    let mut rest: &'a str = line;

    loop {
        let bold = BOLD_RE.captures(rest);
        let italic = ITALIC_RE.captures(rest);

        let (caps, style) = match (bold, italic) {
            (None, None) => {
                if !rest.is_empty() {
                    let seg = IndexedSegment::plain(*cursor, rest);
                    *cursor = seg.end_index;
                    out.push(seg);
                }
                return;
            }
            (Some(b), None) => (b, TextStyle::bold()),
            (None, Some(i)) => (i, TextStyle::italic()),
            (Some(b), Some(i)) => {
                if match_start(&i) < match_start(&b) {
                    (i, TextStyle::italic())
                } else {
                    (b, TextStyle::bold())
                }
            }
        };

        let (whole_start, whole_end) = match caps.get(0) {
            Some(whole) => (whole.start(), whole.end()),
            None => return,
        };
        let inner = caps.get(1).map(|g| g.as_str()).unwrap_or("");

        let before = &rest[..whole_start];
        if !before.is_empty() {
            let seg = IndexedSegment::plain(*cursor, before);
            *cursor = seg.end_index;
            out.push(seg);
        }

        // Zero-length when the marker pair is empty: emitted, cursor unmoved.
        let seg = IndexedSegment::styled(*cursor, inner, style);
        *cursor = seg.end_index;
        out.push(seg);

        rest = &rest[whole_end..];
    }
}

fn match_start(caps: &regex::Captures<'_>) -> usize {
    caps.get(0).map_or(usize::MAX, |g| g.start())
}

// ============================================================================
// Tests
// ============================================================================
