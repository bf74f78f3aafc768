//! Higher-level editing intents.
//!
//! A closed set of typed variants — the caller's abstract request before any
//! index validation has happened. Raw caller indices are `i64`/`Option<i64>`
//! on purpose: validation is the builder's job, not the deserializer's. The
//! one deliberately open-ended variant is [`MutationIntent::ApplyRaw`],
//! which forwards raw remote-API request objects without interpretation.

use serde::{Deserialize, Serialize};

use bunsho_types::{EndOfSegmentLocation, HeaderFooterType, Location, ObjectSize};

/// The caller's abstract editing request.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum MutationIntent {
    /// New document, optionally seeded with plain body text.
    CreateDocument { title: String, text: String },
    /// New document whose body is encoded from markdown.
    CreateDocumentFromMarkdown { title: String, markdown: String },
    /// Insert literal text at an index (clamped; absent = before terminator).
    InsertText {
        document_id: String,
        index: Option<i64>,
        text: String,
    },
    /// Insert a table at an index or at the end of a stream.
    InsertTable {
        document_id: String,
        rows: u32,
        columns: u32,
        index: Option<i64>,
        at_end_of_segment: bool,
        segment_id: Option<String>,
    },
    /// Insert a footnote reference; `location` takes precedence over
    /// `end_of_segment` when both are supplied.
    CreateFootnote {
        document_id: String,
        location: Option<Location>,
        end_of_segment: Option<EndOfSegmentLocation>,
    },
    /// Insert a page break at a location or at the end of a stream.
    InsertPageBreak {
        document_id: String,
        location: Option<Location>,
        end_of_segment: Option<EndOfSegmentLocation>,
    },
    /// Insert an inline image from a public URI.
    InsertInlineImage {
        document_id: String,
        index: Option<i64>,
        uri: String,
        size: Option<ObjectSize>,
    },
    CreateHeader {
        document_id: String,
        kind: HeaderFooterType,
    },
    CreateFooter {
        document_id: String,
        kind: HeaderFooterType,
    },
    /// Name a span of the document (range clamped, collapse reported).
    CreateNamedRange {
        document_id: String,
        name: String,
        start: i64,
        end: i64,
        segment_id: Option<String>,
    },
    /// Bullet paragraphs covered by the range.
    CreateBullets {
        document_id: String,
        start: i64,
        end: i64,
        segment_id: Option<String>,
        preset: Option<String>,
    },
    /// Strip bullets from paragraphs covered by the range.
    DeleteBullets {
        document_id: String,
        start: i64,
        end: i64,
        segment_id: Option<String>,
    },
    /// Delete a caller-supplied range verbatim (trusted, not clamped).
    DeleteRange {
        document_id: String,
        start: u32,
        end: u32,
        segment_id: Option<String>,
    },
    DeleteHeader {
        document_id: String,
        header_id: String,
    },
    DeleteFooter {
        document_id: String,
        footer_id: String,
    },
    DeleteNamedRange {
        document_id: String,
        named_range_id: Option<String>,
        name: Option<String>,
    },
    /// Replace the entire body: delete `[1, len-1)` then insert at 1.
    ReplaceWholeBody { document_id: String, text: String },
    /// Replace every occurrence of `find` across the document.
    ReplaceAllText {
        document_id: String,
        find: String,
        replace: String,
        match_case: bool,
    },
    /// Forward raw remote-API request objects untouched.
    ApplyRaw {
        document_id: String,
        ops: Vec<serde_json::Value>,
    },
}

impl MutationIntent {
    /// The document this intent addresses; `None` for document creation.
    pub fn document_id(&self) -> Option<&str> {
        use MutationIntent::*;
        match self {
            CreateDocument { .. } | CreateDocumentFromMarkdown { .. } => None,
            InsertText { document_id, .. }
            | InsertTable { document_id, .. }
            | CreateFootnote { document_id, .. }
            | InsertPageBreak { document_id, .. }
            | InsertInlineImage { document_id, .. }
            | CreateHeader { document_id, .. }
            | CreateFooter { document_id, .. }
            | CreateNamedRange { document_id, .. }
            | CreateBullets { document_id, .. }
            | DeleteBullets { document_id, .. }
            | DeleteRange { document_id, .. }
            | DeleteHeader { document_id, .. }
            | DeleteFooter { document_id, .. }
            | DeleteNamedRange { document_id, .. }
            | ReplaceWholeBody { document_id, .. }
            | ReplaceAllText { document_id, .. }
            | ApplyRaw { document_id, .. } => Some(document_id),
        }
    }

    /// Short name used in failure message prefixes.
    pub fn verb(&self) -> &'static str {
        use MutationIntent::*;
        match self {
            CreateDocument { .. } => "create document",
            CreateDocumentFromMarkdown { .. } => "create markdown document",
            InsertText { .. } => "insert text",
            InsertTable { .. } => "insert table",
            CreateFootnote { .. } => "create footnote",
            InsertPageBreak { .. } => "insert page break",
            InsertInlineImage { .. } => "insert inline image",
            CreateHeader { .. } => "create header",
            CreateFooter { .. } => "create footer",
            CreateNamedRange { .. } => "create named range",
            CreateBullets { .. } => "create paragraph bullets",
            DeleteBullets { .. } => "delete paragraph bullets",
            DeleteRange { .. } => "delete content range",
            DeleteHeader { .. } => "delete header",
            DeleteFooter { .. } => "delete footer",
            DeleteNamedRange { .. } => "delete named range",
            ReplaceWholeBody { .. } => "update document with markdown",
            ReplaceAllText { .. } => "replace text",
            ApplyRaw { .. } => "update existing document",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id() {
        let create = MutationIntent::CreateDocument { title: "t".into(), text: String::new() };
        assert!(create.document_id().is_none());

        let insert = MutationIntent::InsertText {
            document_id: "doc-1".into(),
            index: Some(5),
            text: "hi".into(),
        };
        assert_eq!(insert.document_id(), Some("doc-1"));
    }

    #[test]
    fn test_intent_serde_tag() {
        let intent = MutationIntent::DeleteRange {
            document_id: "d".into(),
            start: 1,
            end: 2,
            segment_id: None,
        };
        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json["intent"], "delete_range");
    }
}
