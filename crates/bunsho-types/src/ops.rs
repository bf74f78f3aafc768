//! Primitive mutation operations and their replies.
//!
//! A [`PrimitiveOp`] is one atomic remote-API mutation unit. Higher-level
//! editing intents are compiled into an ordered batch of these; the batch is
//! submitted whole, in order, and the service answers with one [`OpReply`]
//! per operation.

use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::range::{DocumentRange, EndOfSegmentLocation};
use crate::segment::IndexedSegment;

/// Header/footer placement kind.
///
/// The remote API accepts exactly two values. Legacy aliases that older
/// clients still send are folded into `Default` by [`HeaderFooterType::normalize`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum HeaderFooterType {
    #[default]
    #[strum(
        serialize = "DEFAULT",
        serialize = "DEFAULT_HEADER",
        serialize = "DEFAULT_FOOTER"
    )]
    Default,
    #[strum(
        serialize = "FIRST_PAGE",
        serialize = "FIRST_PAGE_HEADER",
        serialize = "FIRST_PAGE_FOOTER"
    )]
    FirstPage,
}

impl HeaderFooterType {
    /// Map any caller-supplied string onto a valid API value.
    ///
    /// Unrecognized strings (including `HEADER_FOOTER_TYPE_UNSPECIFIED`)
    /// fall back to `Default` rather than erroring.
    pub fn normalize(s: &str) -> Self {
        <Self as std::str::FromStr>::from_str(s.trim()).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderFooterType::Default => "DEFAULT",
            HeaderFooterType::FirstPage => "FIRST_PAGE",
        }
    }
}

impl std::fmt::Display for HeaderFooterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where an insertion lands: a clamped absolute index or end-of-stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertPoint {
    /// A validated absolute index (optionally inside a header/footer stream).
    At {
        index: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        segment_id: Option<String>,
    },
    /// Resolved by the service to the end of the stream.
    EndOfSegment(EndOfSegmentLocation),
}

impl InsertPoint {
    pub fn at(index: u32) -> Self {
        Self::At { index, segment_id: None }
    }
}

/// Image dimensions in points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectSize {
    pub width_pt: f64,
    pub height_pt: f64,
}

/// One atomic remote mutation unit.
///
/// Index fields are already validated/clamped by the time an op exists; the
/// exceptions are `DeleteContentRange` (trusted caller range by contract) and
/// `Opaque` (explicit passthrough, see below).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PrimitiveOp {
    /// Create a new document, optionally seeded with encoded body segments.
    CreateDocument {
        title: String,
        segments: Vec<IndexedSegment>,
    },
    /// Insert literal text at a validated point.
    InsertText { point: InsertPoint, text: String },
    /// Insert a `rows` x `columns` table.
    InsertTable {
        point: InsertPoint,
        rows: u32,
        columns: u32,
    },
    /// Insert a footnote reference.
    CreateFootnote { point: InsertPoint },
    /// Insert a page break.
    InsertPageBreak { point: InsertPoint },
    /// Insert an inline image fetched from a public URI.
    InsertInlineImage {
        point: InsertPoint,
        uri: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        size: Option<ObjectSize>,
    },
    /// Create a header of the given kind. Non-idempotent remotely.
    CreateHeader { kind: HeaderFooterType },
    /// Create a footer of the given kind. Non-idempotent remotely.
    CreateFooter { kind: HeaderFooterType },
    /// Name a validated range for later reference.
    CreateNamedRange { name: String, range: DocumentRange },
    /// Apply bullet formatting to paragraphs covered by the range.
    CreateParagraphBullets {
        range: DocumentRange,
        #[serde(skip_serializing_if = "Option::is_none")]
        preset: Option<String>,
    },
    /// Remove bullet formatting from paragraphs covered by the range.
    DeleteParagraphBullets { range: DocumentRange },
    /// Delete content in a caller-supplied range (trusted, not clamped).
    DeleteContentRange { range: DocumentRange },
    /// Delete a header by id.
    DeleteHeader { header_id: String },
    /// Delete a footer by id.
    DeleteFooter { footer_id: String },
    /// Delete a named range by id or by name.
    DeleteNamedRange {
        #[serde(skip_serializing_if = "Option::is_none")]
        named_range_id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    /// Replace every occurrence of `find` with `replace`.
    ReplaceAllText {
        find: String,
        replace: String,
        match_case: bool,
    },
    /// Raw remote-API request object, forwarded untouched.
    ///
    /// The single sanctioned loophole in an otherwise closed op set: some
    /// table surgery has no typed intent and is passed through as-is.
    Opaque(serde_json::Value),
}

impl PrimitiveOp {
    /// True if this op may only appear as the sole member of a create batch.
    pub fn is_create_document(&self) -> bool {
        matches!(self, PrimitiveOp::CreateDocument { .. })
    }
}

/// Per-operation reply from a submitted batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reply", rename_all = "snake_case")]
pub enum OpReply {
    /// The operation produced no payload.
    None,
    DocumentCreated {
        document_id: String,
        title: String,
        revision_id: String,
    },
    HeaderCreated { header_id: String },
    FooterCreated { footer_id: String },
    FootnoteCreated { footnote_id: String },
    NamedRangeCreated { named_range_id: String },
    TextReplaced { occurrences_changed: u64 },
}

/// A named range as reported by the service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRangeInfo {
    pub named_range_id: String,
    pub name: String,
    pub range: DocumentRange,
}

/// Structure snapshot of a remote document.
///
/// `body_length` is derived from the end index of the last content element;
/// an empty body reports 1 (just the terminator).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentView {
    pub document_id: String,
    pub title: String,
    pub revision_id: String,
    pub body: String,
    pub body_length: u32,
    pub header_ids: Vec<String>,
    pub footer_ids: Vec<String>,
    pub named_ranges: Vec<NamedRangeInfo>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_footer_normalize() {
        assert_eq!(HeaderFooterType::normalize("DEFAULT"), HeaderFooterType::Default);
        assert_eq!(HeaderFooterType::normalize("FIRST_PAGE"), HeaderFooterType::FirstPage);
        // Legacy aliases.
        assert_eq!(HeaderFooterType::normalize("DEFAULT_HEADER"), HeaderFooterType::Default);
        assert_eq!(HeaderFooterType::normalize("FIRST_PAGE_FOOTER"), HeaderFooterType::FirstPage);
        // Unknown and unspecified fall back to DEFAULT.
        assert_eq!(
            HeaderFooterType::normalize("HEADER_FOOTER_TYPE_UNSPECIFIED"),
            HeaderFooterType::Default
        );
        assert_eq!(HeaderFooterType::normalize("whatever"), HeaderFooterType::Default);
    }

    #[test]
    fn test_op_serialization_tag() {
        let op = PrimitiveOp::InsertText {
            point: InsertPoint::at(5),
            text: "hi".into(),
        };
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["op"], "insert_text");
    }

    #[test]
    fn test_create_document_is_flagged() {
        let op = PrimitiveOp::CreateDocument { title: "t".into(), segments: vec![] };
        assert!(op.is_create_document());
        assert!(!PrimitiveOp::DeleteHeader { header_id: "h".into() }.is_create_document());
    }
}
