//! MCP server exposing bunsho document editing.
//!
//! Every mutating tool compiles its request into a typed editing intent,
//! clamps any caller-supplied indices against the live document, and submits
//! one ordered batch. Tools answer with a uniform JSON envelope:
//! `{data, error, successful}` — never a protocol-level error for a bad
//! parameter.
//!
//! ## Module Structure
//!
//! - `models`: Request types for MCP tools
//! - `helpers`: Envelope and reply shaping

mod helpers;
mod models;

use std::sync::Arc;

use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde_json::json;

use bunsho_core::{BuildError, CreateOutcome, DocumentAccessor, IntentReply, MutationIntent, execute};
use bunsho_store::DocumentStore;
use bunsho_types::{HeaderFooterType, Location, OpReply};

use helpers::*;
pub use models::*;

/// MCP server over a document store.
#[derive(Clone)]
pub struct BunshoMcp {
    store: Arc<DocumentStore>,
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for BunshoMcp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BunshoMcp")
            .field("documents", &self.store.document_count())
            .finish()
    }
}

impl Default for BunshoMcp {
    fn default() -> Self {
        Self::new()
    }
}

impl BunshoMcp {
    /// Create a new MCP server over the given store.
    pub fn with_store(store: Arc<DocumentStore>) -> Self {
        Self {
            store,
            tool_router: Self::tool_router(),
        }
    }

    /// Create a new MCP server with an empty in-memory store.
    pub fn new() -> Self {
        Self::with_store(Arc::new(DocumentStore::new()))
    }

    fn run(&self, intent: MutationIntent) -> Result<IntentReply, BuildError> {
        execute(self.store.as_ref(), &intent)
    }
}

/// Generic success envelope for a mutation: document id plus any non-empty
/// per-operation replies.
fn mutation_ok(reply: IntentReply) -> String {
    let payloads = reply_payloads(&reply.replies);
    let mut data = json!({ "document_id": reply.document_id });
    if !payloads.is_empty() {
        data["replies"] = json!(payloads);
    }
    ok(data)
}

#[tool_router]
impl BunshoMcp {
    // ========================================================================
    // Document Tools
    // ========================================================================

    #[tool(description = "Create a new document with an optional plain-text body. Returns the new document's ID and revision.")]
    fn doc_create(&self, Parameters(req): Parameters<DocCreateRequest>) -> String {
        let intent = MutationIntent::CreateDocument { title: req.title, text: req.text };
        let verb = intent.verb();
        match self.run(intent) {
            Ok(reply) => match reply.replies.first() {
                Some(OpReply::DocumentCreated { document_id, title, revision_id }) => ok(json!({
                    "document_id": document_id,
                    "title": title,
                    "revision_id": revision_id,
                })),
                _ => fail("document creation returned no reply"),
            },
            Err(e) => fail_for(verb, e),
        }
    }

    #[tool(description = "Create a new document from markdown. Supports #/##/### headings, **bold**, and *italic*; blank lines separate paragraphs.")]
    fn doc_create_markdown(&self, Parameters(req): Parameters<DocCreateMarkdownRequest>) -> String {
        let intent = MutationIntent::CreateDocumentFromMarkdown {
            title: req.title,
            markdown: req.markdown_text,
        };
        let verb = intent.verb();
        match self.run(intent) {
            Ok(reply) => match reply.replies.first() {
                Some(OpReply::DocumentCreated { document_id, title, revision_id }) => ok(json!({
                    "document_id": document_id,
                    "title": title,
                    "revision_id": revision_id,
                })),
                _ => fail("document creation returned no reply"),
            },
            Err(e) => fail_for(verb, e),
        }
    }

    #[tool(description = "Fetch a document's structure: title, revision, body text and length, header/footer IDs, and named ranges.")]
    fn doc_get(&self, Parameters(req): Parameters<DocGetRequest>) -> String {
        if req.document_id.trim().is_empty() {
            return fail(BuildError::missing(&["document_id"]));
        }
        match self.store.get_document(&req.document_id) {
            Ok(view) => match serde_json::to_value(&view) {
                Ok(data) => ok(data),
                Err(e) => fail(format!("Failed to get document: {e}")),
            },
            Err(e) => fail(format!("Failed to get document: {e}")),
        }
    }

    #[tool(description = "Replace the entire document body with new text. Deletes all existing content, then inserts the replacement, as one batch.")]
    fn doc_replace_markdown(&self, Parameters(req): Parameters<DocReplaceMarkdownRequest>) -> String {
        let intent = MutationIntent::ReplaceWholeBody {
            document_id: req.document_id,
            text: req.new_markdown_text,
        };
        let verb = intent.verb();
        match self.run(intent) {
            Ok(reply) => mutation_ok(reply),
            Err(e) => fail_for(verb, e),
        }
    }

    // ========================================================================
    // Text Tools
    // ========================================================================

    #[tool(description = "Insert text at a 1-based index in the document body. Omitted or out-of-range indices are clamped to a valid position.")]
    fn text_insert(&self, Parameters(req): Parameters<TextInsertRequest>) -> String {
        let intent = MutationIntent::InsertText {
            document_id: req.document_id,
            index: req.insert_index,
            text: req.text_to_insert,
        };
        let verb = intent.verb();
        match self.run(intent) {
            Ok(reply) => mutation_ok(reply),
            Err(e) => fail_for(verb, e),
        }
    }

    #[tool(description = "Replace every occurrence of a string in the document. Returns the number of occurrences changed.")]
    fn text_replace_all(&self, Parameters(req): Parameters<TextReplaceAllRequest>) -> String {
        let intent = MutationIntent::ReplaceAllText {
            document_id: req.document_id,
            find: req.find_text,
            replace: req.replace_text,
            match_case: req.match_case,
        };
        let verb = intent.verb();
        match self.run(intent) {
            Ok(reply) => {
                let changed = reply.replies.iter().find_map(|r| match r {
                    OpReply::TextReplaced { occurrences_changed } => Some(*occurrences_changed),
                    _ => None,
                });
                ok(json!({
                    "document_id": reply.document_id,
                    "occurrences_changed": changed.unwrap_or(0),
                }))
            }
            Err(e) => fail_for(verb, e),
        }
    }

    #[tool(description = "Delete a content range [start_index, end_index). The range is forwarded as given; the service rejects invalid bounds.")]
    fn range_delete(&self, Parameters(req): Parameters<RangeDeleteRequest>) -> String {
        let intent = MutationIntent::DeleteRange {
            document_id: req.document_id,
            start: req.start_index,
            end: req.end_index,
            segment_id: req.segment_id,
        };
        let verb = intent.verb();
        match self.run(intent) {
            Ok(reply) => mutation_ok(reply),
            Err(e) => fail_for(verb, e),
        }
    }

    // ========================================================================
    // Structure Tools
    // ========================================================================

    #[tool(description = "Insert a table with the given row and column counts, at an index or at the end of a segment.")]
    fn table_insert(&self, Parameters(req): Parameters<TableInsertRequest>) -> String {
        let intent = MutationIntent::InsertTable {
            document_id: req.document_id,
            rows: req.rows,
            columns: req.columns,
            index: req.index,
            at_end_of_segment: req.end_of_segment,
            segment_id: req.segment_id,
        };
        let verb = intent.verb();
        match self.run(intent) {
            Ok(reply) => mutation_ok(reply),
            Err(e) => fail_for(verb, e),
        }
    }

    #[tool(description = "Create a footnote with its reference at the given location. Without a location the reference lands just before the end of the body.")]
    fn footnote_create(&self, Parameters(req): Parameters<FootnoteCreateRequest>) -> String {
        let (location, end_of_segment) = split_location(
            req.location_index,
            req.segment_id,
            req.end_of_segment,
        );
        let intent = MutationIntent::CreateFootnote {
            document_id: req.document_id,
            location,
            end_of_segment,
        };
        let verb = intent.verb();
        match self.run(intent) {
            Ok(reply) => {
                let footnote_id = reply.replies.iter().find_map(|r| match r {
                    OpReply::FootnoteCreated { footnote_id } => Some(footnote_id.clone()),
                    _ => None,
                });
                ok(json!({
                    "document_id": reply.document_id,
                    "footnote_id": footnote_id,
                }))
            }
            Err(e) => fail_for(verb, e),
        }
    }

    #[tool(description = "Insert a page break at the given location. Without a location the break lands just before the end of the body.")]
    fn page_break_insert(&self, Parameters(req): Parameters<PageBreakInsertRequest>) -> String {
        let (location, end_of_segment) = split_location(
            req.location_index,
            req.segment_id,
            req.end_of_segment,
        );
        let intent = MutationIntent::InsertPageBreak {
            document_id: req.document_id,
            location,
            end_of_segment,
        };
        let verb = intent.verb();
        match self.run(intent) {
            Ok(reply) => mutation_ok(reply),
            Err(e) => fail_for(verb, e),
        }
    }

    #[tool(description = "Insert an inline image from a publicly accessible URI, with optional dimensions in points.")]
    fn image_insert(&self, Parameters(req): Parameters<ImageInsertRequest>) -> String {
        let size = match object_size(req.width_pt, req.height_pt) {
            Ok(s) => s,
            Err(msg) => return fail(msg),
        };
        let intent = MutationIntent::InsertInlineImage {
            document_id: req.document_id,
            index: req.index,
            uri: req.uri,
            size,
        };
        let verb = intent.verb();
        match self.run(intent) {
            Ok(reply) => mutation_ok(reply),
            Err(e) => fail_for(verb, e),
        }
    }

    // ========================================================================
    // Header / Footer Tools
    // ========================================================================

    #[tool(description = "Create a header of type DEFAULT or FIRST_PAGE. If a header already exists, returns the existing header's ID as success.")]
    fn header_create(&self, Parameters(req): Parameters<HeaderCreateRequest>) -> String {
        let kind = HeaderFooterType::normalize(req.header_type.as_deref().unwrap_or_default());
        let intent = MutationIntent::CreateHeader { document_id: req.document_id, kind };
        let verb = intent.verb();
        match self.run(intent) {
            Ok(reply) => created_envelope(reply, "header_id"),
            Err(e) => fail_for(verb, e),
        }
    }

    #[tool(description = "Create a footer of type DEFAULT or FIRST_PAGE. If a footer already exists, returns the existing footer's ID as success.")]
    fn footer_create(&self, Parameters(req): Parameters<FooterCreateRequest>) -> String {
        let kind = HeaderFooterType::normalize(req.footer_type.as_deref().unwrap_or_default());
        let intent = MutationIntent::CreateFooter { document_id: req.document_id, kind };
        let verb = intent.verb();
        match self.run(intent) {
            Ok(reply) => created_envelope(reply, "footer_id"),
            Err(e) => fail_for(verb, e),
        }
    }

    #[tool(description = "Delete a header by its ID.")]
    fn header_delete(&self, Parameters(req): Parameters<HeaderDeleteRequest>) -> String {
        let intent = MutationIntent::DeleteHeader {
            document_id: req.document_id,
            header_id: req.header_id,
        };
        let verb = intent.verb();
        match self.run(intent) {
            Ok(reply) => mutation_ok(reply),
            Err(e) => fail_for(verb, e),
        }
    }

    #[tool(description = "Delete a footer by its ID.")]
    fn footer_delete(&self, Parameters(req): Parameters<FooterDeleteRequest>) -> String {
        let intent = MutationIntent::DeleteFooter {
            document_id: req.document_id,
            footer_id: req.footer_id,
        };
        let verb = intent.verb();
        match self.run(intent) {
            Ok(reply) => mutation_ok(reply),
            Err(e) => fail_for(verb, e),
        }
    }

    // ========================================================================
    // Named Range / Bullet Tools
    // ========================================================================

    #[tool(description = "Name a range of the document for later reference. Indices are clamped to the document's bounds.")]
    fn named_range_create(&self, Parameters(req): Parameters<NamedRangeCreateRequest>) -> String {
        let intent = MutationIntent::CreateNamedRange {
            document_id: req.document_id,
            name: req.name,
            start: req.start_index,
            end: req.end_index,
            segment_id: req.segment_id,
        };
        let verb = intent.verb();
        match self.run(intent) {
            Ok(reply) => {
                let named_range_id = reply.replies.iter().find_map(|r| match r {
                    OpReply::NamedRangeCreated { named_range_id } => Some(named_range_id.clone()),
                    _ => None,
                });
                ok(json!({
                    "document_id": reply.document_id,
                    "named_range_id": named_range_id,
                }))
            }
            Err(e) => fail_for(verb, e),
        }
    }

    #[tool(description = "Delete a named range by its ID, or by name when the ID is unknown.")]
    fn named_range_delete(&self, Parameters(req): Parameters<NamedRangeDeleteRequest>) -> String {
        let intent = MutationIntent::DeleteNamedRange {
            document_id: req.document_id,
            named_range_id: req.named_range_id,
            name: req.name,
        };
        let verb = intent.verb();
        match self.run(intent) {
            Ok(reply) => mutation_ok(reply),
            Err(e) => fail_for(verb, e),
        }
    }

    #[tool(description = "Apply bullet formatting to the paragraphs covered by a range. Indices are clamped to the document's bounds.")]
    fn bullets_create(&self, Parameters(req): Parameters<BulletsCreateRequest>) -> String {
        let intent = MutationIntent::CreateBullets {
            document_id: req.document_id,
            start: req.start_index,
            end: req.end_index,
            segment_id: req.segment_id,
            preset: req.bullet_preset,
        };
        let verb = intent.verb();
        match self.run(intent) {
            Ok(reply) => mutation_ok(reply),
            Err(e) => fail_for(verb, e),
        }
    }

    #[tool(description = "Remove bullet formatting from the paragraphs covered by a range.")]
    fn bullets_delete(&self, Parameters(req): Parameters<BulletsDeleteRequest>) -> String {
        let intent = MutationIntent::DeleteBullets {
            document_id: req.document_id,
            start: req.start_index,
            end: req.end_index,
            segment_id: req.segment_id,
        };
        let verb = intent.verb();
        match self.run(intent) {
            Ok(reply) => mutation_ok(reply),
            Err(e) => fail_for(verb, e),
        }
    }

    // ========================================================================
    // Escape Hatch
    // ========================================================================

    #[tool(description = "Apply raw request objects verbatim as a single ordered batch. Escape hatch for operations without a dedicated tool.")]
    fn batch_apply(&self, Parameters(req): Parameters<BatchApplyRequest>) -> String {
        let count = req.requests.len();
        let intent = MutationIntent::ApplyRaw {
            document_id: req.document_id,
            ops: req.requests,
        };
        let verb = intent.verb();
        match self.run(intent) {
            Ok(reply) => ok(json!({
                "document_id": reply.document_id,
                "requests_applied": count,
            })),
            Err(e) => fail_for(verb, e),
        }
    }
}

/// Split tool-level location fields into the intent's location/end-of-segment
/// pair. An explicit end-of-segment flag wins over an index.
fn split_location(
    index: Option<i64>,
    segment_id: Option<String>,
    end_of_segment: bool,
) -> (
    Option<Location>,
    Option<bunsho_types::EndOfSegmentLocation>,
) {
    if end_of_segment {
        (None, Some(bunsho_types::EndOfSegmentLocation { segment_id }))
    } else if index.is_some() || segment_id.is_some() {
        (Some(Location { index, segment_id }), None)
    } else {
        (None, None)
    }
}

/// Failure envelope for an intent, prefixed with its verb:
/// `Failed to {verb}: {error}`. Missing-parameter errors keep their bare
/// message; that shape is part of the tool contract.
fn fail_for(verb: &str, err: BuildError) -> String {
    match err {
        BuildError::MissingParameter(_) => fail(err),
        other => fail(format!("Failed to {verb}: {other}")),
    }
}

/// Envelope for header/footer creation, reporting whether the id is new.
fn created_envelope(reply: IntentReply, id_field: &str) -> String {
    match reply.outcome {
        Some(CreateOutcome::Created(id)) => ok(json!({
            "document_id": reply.document_id,
            id_field: id,
            "already_existed": false,
        })),
        Some(CreateOutcome::AlreadyExists(id)) => ok(json!({
            "document_id": reply.document_id,
            id_field: id,
            "already_existed": true,
        })),
        None => fail("creation returned no id"),
    }
}

#[tool_handler]
impl ServerHandler for BunshoMcp {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.instructions = Some(
            "Bunsho document editing MCP server. Provides tools for creating and editing rich-text documents: markdown-aware creation, text insertion and replacement, tables, footnotes, headers/footers, named ranges, and bullets. Indices are 1-based UTF-16 code-unit positions.".into()
        );
        info.capabilities = ServerCapabilities::builder()
            .enable_tools()
            .build();
        info
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn parse(s: &str) -> Value {
        serde_json::from_str(s).unwrap()
    }

    fn create_doc(mcp: &BunshoMcp, text: &str) -> String {
        let result = mcp.doc_create(Parameters(DocCreateRequest {
            title: "test".to_string(),
            text: text.to_string(),
        }));
        let parsed = parse(&result);
        assert_eq!(parsed["successful"], true, "create failed: {result}");
        parsed["data"]["document_id"].as_str().unwrap().to_string()
    }

    #[test]
    fn test_doc_create_and_get() {
        let mcp = BunshoMcp::new();
        let id = create_doc(&mcp, "hello");

        let result = mcp.doc_get(Parameters(DocGetRequest { document_id: id.clone() }));
        let parsed = parse(&result);
        assert_eq!(parsed["successful"], true);
        assert_eq!(parsed["data"]["body"], "hello");
        assert_eq!(parsed["data"]["body_length"], 7);
        assert_eq!(parsed["data"]["document_id"], id.as_str());
    }

    #[test]
    fn test_doc_create_markdown_renders_headings_and_paragraphs() {
        let mcp = BunshoMcp::new();
        let result = mcp.doc_create_markdown(Parameters(DocCreateMarkdownRequest {
            title: "md".to_string(),
            markdown_text: "# Title\n\nplain **bold**".to_string(),
        }));
        let parsed = parse(&result);
        assert_eq!(parsed["successful"], true);
        let id = parsed["data"]["document_id"].as_str().unwrap().to_string();

        let view = parse(&mcp.doc_get(Parameters(DocGetRequest { document_id: id })));
        // Heading terminator, paragraph break from the blank line, markers
        // stripped.
        assert_eq!(view["data"]["body"], "Title\n\nplain bold");
    }

    #[test]
    fn test_missing_parameter_envelope() {
        let mcp = BunshoMcp::new();
        let result = mcp.text_insert(Parameters(TextInsertRequest {
            document_id: String::new(),
            insert_index: None,
            text_to_insert: String::new(),
        }));
        let parsed = parse(&result);
        assert_eq!(parsed["successful"], false);
        assert_eq!(
            parsed["error"],
            "Missing required parameter(s): document_id, text_to_insert"
        );
    }

    #[test]
    fn test_remote_failure_carries_intent_verb_prefix() {
        let mcp = BunshoMcp::new();

        let result = mcp.text_insert(Parameters(TextInsertRequest {
            document_id: "missing-doc".to_string(),
            insert_index: None,
            text_to_insert: "X".to_string(),
        }));
        let parsed = parse(&result);
        assert_eq!(parsed["successful"], false);
        assert_eq!(
            parsed["error"],
            "Failed to insert text: document not found: document missing-doc"
        );

        let result = mcp.doc_replace_markdown(Parameters(DocReplaceMarkdownRequest {
            document_id: "missing-doc".to_string(),
            new_markdown_text: "x".to_string(),
        }));
        let parsed = parse(&result);
        assert_eq!(parsed["successful"], false);
        assert_eq!(
            parsed["error"],
            "Failed to update document with markdown: document not found: document missing-doc"
        );
    }

    #[test]
    fn test_text_insert_with_clamped_index() {
        let mcp = BunshoMcp::new();
        let id = create_doc(&mcp, "ab");

        // Index far past the end clamps to the last valid position.
        let result = mcp.text_insert(Parameters(TextInsertRequest {
            document_id: id.clone(),
            insert_index: Some(99),
            text_to_insert: "X".to_string(),
        }));
        assert_eq!(parse(&result)["successful"], true);

        let view = parse(&mcp.doc_get(Parameters(DocGetRequest { document_id: id })));
        assert_eq!(view["data"]["body"], "abX");
    }

    #[test]
    fn test_doc_replace_markdown_resets_body() {
        let mcp = BunshoMcp::new();
        let id = create_doc(&mcp, "old content here");

        let result = mcp.doc_replace_markdown(Parameters(DocReplaceMarkdownRequest {
            document_id: id.clone(),
            new_markdown_text: "fresh".to_string(),
        }));
        assert_eq!(parse(&result)["successful"], true);

        let view = parse(&mcp.doc_get(Parameters(DocGetRequest { document_id: id })));
        assert_eq!(view["data"]["body"], "fresh");
    }

    #[test]
    fn test_text_replace_all_reports_count() {
        let mcp = BunshoMcp::new();
        let id = create_doc(&mcp, "cat Cat CAT");

        let result = mcp.text_replace_all(Parameters(TextReplaceAllRequest {
            document_id: id,
            find_text: "cat".to_string(),
            replace_text: "dog".to_string(),
            match_case: false,
        }));
        let parsed = parse(&result);
        assert_eq!(parsed["successful"], true);
        assert_eq!(parsed["data"]["occurrences_changed"], 3);
    }

    #[test]
    fn test_range_delete() {
        let mcp = BunshoMcp::new();
        let id = create_doc(&mcp, "0123456789");

        let result = mcp.range_delete(Parameters(RangeDeleteRequest {
            document_id: id.clone(),
            start_index: 3,
            end_index: 7,
            segment_id: None,
        }));
        assert_eq!(parse(&result)["successful"], true);

        let view = parse(&mcp.doc_get(Parameters(DocGetRequest { document_id: id })));
        assert_eq!(view["data"]["body"], "016789");
    }

    #[test]
    fn test_header_create_is_idempotent_at_tool_level() {
        let mcp = BunshoMcp::new();
        let id = create_doc(&mcp, "content");

        let first = parse(&mcp.header_create(Parameters(HeaderCreateRequest {
            document_id: id.clone(),
            header_type: None,
        })));
        assert_eq!(first["successful"], true);
        assert_eq!(first["data"]["already_existed"], false);
        let header_id = first["data"]["header_id"].as_str().unwrap().to_string();

        let second = parse(&mcp.header_create(Parameters(HeaderCreateRequest {
            document_id: id,
            header_type: Some("DEFAULT_HEADER".to_string()),
        })));
        assert_eq!(second["successful"], true);
        assert_eq!(second["data"]["already_existed"], true);
        assert_eq!(second["data"]["header_id"], header_id.as_str());
    }

    #[test]
    fn test_footnote_create_returns_id() {
        let mcp = BunshoMcp::new();
        let id = create_doc(&mcp, "body text");

        let result = mcp.footnote_create(Parameters(FootnoteCreateRequest {
            document_id: id,
            location_index: Some(4),
            end_of_segment: false,
            segment_id: None,
        }));
        let parsed = parse(&result);
        assert_eq!(parsed["successful"], true);
        assert!(parsed["data"]["footnote_id"].as_str().unwrap().starts_with("fn."));
    }

    #[test]
    fn test_named_range_lifecycle() {
        let mcp = BunshoMcp::new();
        let id = create_doc(&mcp, "0123456789");

        let created = parse(&mcp.named_range_create(Parameters(NamedRangeCreateRequest {
            document_id: id.clone(),
            name: "mark".to_string(),
            start_index: 2,
            end_index: 5,
            segment_id: None,
        })));
        assert_eq!(created["successful"], true);
        let nr_id = created["data"]["named_range_id"].as_str().unwrap().to_string();

        let deleted = parse(&mcp.named_range_delete(Parameters(NamedRangeDeleteRequest {
            document_id: id.clone(),
            named_range_id: Some(nr_id),
            name: None,
        })));
        assert_eq!(deleted["successful"], true);

        let view = parse(&mcp.doc_get(Parameters(DocGetRequest { document_id: id })));
        assert!(view["data"]["named_ranges"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_image_requires_paired_dimensions() {
        let mcp = BunshoMcp::new();
        let id = create_doc(&mcp, "x");

        let result = mcp.image_insert(Parameters(ImageInsertRequest {
            document_id: id,
            uri: "https://example.com/a.png".to_string(),
            index: None,
            width_pt: Some(100.0),
            height_pt: None,
        }));
        let parsed = parse(&result);
        assert_eq!(parsed["successful"], false);
        assert!(parsed["error"].as_str().unwrap().contains("together"));
    }

    #[test]
    fn test_batch_apply_is_rejected_by_local_store() {
        let mcp = BunshoMcp::new();
        let id = create_doc(&mcp, "x");

        let result = mcp.batch_apply(Parameters(BatchApplyRequest {
            document_id: id,
            requests: vec![serde_json::json!({"insertText": {}})],
        }));
        let parsed = parse(&result);
        assert_eq!(parsed["successful"], false);
        assert!(parsed["error"].as_str().unwrap().contains("not supported"));
    }

    #[test]
    fn test_bullets_create_with_unspecified_preset() {
        let mcp = BunshoMcp::new();
        let id = create_doc(&mcp, "item one");

        let result = mcp.bullets_create(Parameters(BulletsCreateRequest {
            document_id: id,
            start_index: 1,
            end_index: 5,
            bullet_preset: Some("BULLET_GLYPH_PRESET_UNSPECIFIED".to_string()),
            segment_id: None,
        }));
        assert_eq!(parse(&result)["successful"], true);
    }
}
