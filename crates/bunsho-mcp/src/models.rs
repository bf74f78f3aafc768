//! MCP request types.
//!
//! One struct per tool; field names are the tool's wire parameter names.

use rmcp::schemars;
use serde::Deserialize;

// ============================================================================
// Document Tools
// ============================================================================

/// Create a new document, optionally seeded with plain text.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DocCreateRequest {
    /// Document title
    #[schemars(description = "Title of the new document")]
    pub title: String,
    /// Initial body text (plain, no markdown interpretation)
    #[schemars(description = "Initial plain-text body content (optional)")]
    #[serde(default)]
    pub text: String,
}

/// Create a new document from markdown text.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DocCreateMarkdownRequest {
    /// Document title
    #[schemars(description = "Title of the new document")]
    pub title: String,
    /// Markdown body: # ## ### headings, **bold**, *italic*
    #[schemars(description = "Markdown body. Supports #/##/### headings, **bold**, and *italic*")]
    pub markdown_text: String,
}

/// Fetch a document's structure snapshot.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DocGetRequest {
    #[schemars(description = "Document ID to fetch")]
    pub document_id: String,
}

/// Replace the entire document body with new markdown.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DocReplaceMarkdownRequest {
    #[schemars(description = "Document ID to rewrite")]
    pub document_id: String,
    /// Replacement body text
    #[schemars(description = "New body text that replaces all existing content")]
    pub new_markdown_text: String,
}

// ============================================================================
// Text Tools
// ============================================================================

/// Insert text at an index in the body.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TextInsertRequest {
    #[schemars(description = "Document ID to edit")]
    pub document_id: String,
    /// 1-based UTF-16 index; omit to append near the end
    #[schemars(description = "1-based insertion index; omitted or out-of-range values are clamped")]
    pub insert_index: Option<i64>,
    #[schemars(description = "Text to insert")]
    pub text_to_insert: String,
}

/// Replace every occurrence of a string.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TextReplaceAllRequest {
    #[schemars(description = "Document ID to edit")]
    pub document_id: String,
    #[schemars(description = "Text to find")]
    pub find_text: String,
    #[schemars(description = "Replacement text")]
    pub replace_text: String,
    /// Case-sensitive matching (default false)
    #[schemars(description = "Match case exactly (default false)")]
    #[serde(default)]
    pub match_case: bool,
}

/// Delete a content range.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RangeDeleteRequest {
    #[schemars(description = "Document ID to edit")]
    pub document_id: String,
    /// Inclusive start of the deletion, 1-based
    #[schemars(description = "1-based start index (inclusive)")]
    pub start_index: u32,
    /// Exclusive end of the deletion
    #[schemars(description = "End index (exclusive)")]
    pub end_index: u32,
    #[schemars(description = "Header/footer segment ID; omit for the body")]
    pub segment_id: Option<String>,
}

// ============================================================================
// Structure Tools
// ============================================================================

/// Insert a table.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TableInsertRequest {
    #[schemars(description = "Document ID to edit")]
    pub document_id: String,
    #[schemars(description = "Number of table rows")]
    pub rows: u32,
    #[schemars(description = "Number of table columns")]
    pub columns: u32,
    #[schemars(description = "1-based insertion index; omitted or out-of-range values are clamped")]
    pub index: Option<i64>,
    /// Insert at the end of a segment instead of at an index
    #[schemars(description = "Insert at the end of the segment instead of at an index")]
    #[serde(default)]
    pub end_of_segment: bool,
    #[schemars(description = "Segment ID for end-of-segment insertion; omit for the body")]
    pub segment_id: Option<String>,
}

/// Create a footnote.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FootnoteCreateRequest {
    #[schemars(description = "Document ID to edit")]
    pub document_id: String,
    #[schemars(description = "1-based index for the footnote reference; defaults near the end")]
    pub location_index: Option<i64>,
    #[schemars(description = "Insert at the end of the segment instead of at an index")]
    #[serde(default)]
    pub end_of_segment: bool,
    #[schemars(description = "Header/footer segment ID; omit for the body")]
    pub segment_id: Option<String>,
}

/// Insert a page break.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PageBreakInsertRequest {
    #[schemars(description = "Document ID to edit")]
    pub document_id: String,
    #[schemars(description = "1-based insertion index; defaults near the end")]
    pub location_index: Option<i64>,
    #[schemars(description = "Insert at the end of the segment instead of at an index")]
    #[serde(default)]
    pub end_of_segment: bool,
    #[schemars(description = "Header/footer segment ID; omit for the body")]
    pub segment_id: Option<String>,
}

/// Insert an inline image from a public URI.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ImageInsertRequest {
    #[schemars(description = "Document ID to edit")]
    pub document_id: String,
    #[schemars(description = "Publicly accessible image URI")]
    pub uri: String,
    #[schemars(description = "1-based insertion index; omitted or out-of-range values are clamped")]
    pub index: Option<i64>,
    #[schemars(description = "Image width in points (optional)")]
    pub width_pt: Option<f64>,
    #[schemars(description = "Image height in points (optional)")]
    pub height_pt: Option<f64>,
}

// ============================================================================
// Header / Footer Tools
// ============================================================================

/// Create a header.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct HeaderCreateRequest {
    #[schemars(description = "Document ID to edit")]
    pub document_id: String,
    /// DEFAULT or FIRST_PAGE; unknown values fall back to DEFAULT
    #[schemars(description = "Header type: DEFAULT or FIRST_PAGE (default DEFAULT)")]
    #[serde(default)]
    pub header_type: Option<String>,
}

/// Create a footer.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FooterCreateRequest {
    #[schemars(description = "Document ID to edit")]
    pub document_id: String,
    #[schemars(description = "Footer type: DEFAULT or FIRST_PAGE (default DEFAULT)")]
    #[serde(default)]
    pub footer_type: Option<String>,
}

/// Delete a header by id.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct HeaderDeleteRequest {
    #[schemars(description = "Document ID to edit")]
    pub document_id: String,
    #[schemars(description = "Header ID to delete")]
    pub header_id: String,
}

/// Delete a footer by id.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FooterDeleteRequest {
    #[schemars(description = "Document ID to edit")]
    pub document_id: String,
    #[schemars(description = "Footer ID to delete")]
    pub footer_id: String,
}

// ============================================================================
// Named Range / Bullet Tools
// ============================================================================

/// Name a range for later reference.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NamedRangeCreateRequest {
    #[schemars(description = "Document ID to edit")]
    pub document_id: String,
    #[schemars(description = "Name for the range")]
    pub name: String,
    #[schemars(description = "1-based start index (inclusive); clamped")]
    pub start_index: i64,
    #[schemars(description = "End index (exclusive); clamped")]
    pub end_index: i64,
    #[schemars(description = "Header/footer segment ID; omit for the body")]
    pub segment_id: Option<String>,
}

/// Delete a named range by id or name.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NamedRangeDeleteRequest {
    #[schemars(description = "Document ID to edit")]
    pub document_id: String,
    #[schemars(description = "Named range ID to delete")]
    pub named_range_id: Option<String>,
    #[schemars(description = "Name to delete by, when the ID is unknown")]
    pub name: Option<String>,
}

/// Apply bullet formatting to a paragraph range.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BulletsCreateRequest {
    #[schemars(description = "Document ID to edit")]
    pub document_id: String,
    #[schemars(description = "1-based start index (inclusive); clamped")]
    pub start_index: i64,
    #[schemars(description = "End index (exclusive); clamped")]
    pub end_index: i64,
    /// e.g. BULLET_DISC_CIRCLE_SQUARE; UNSPECIFIED is dropped
    #[schemars(description = "Bullet glyph preset (optional; service default when omitted)")]
    pub bullet_preset: Option<String>,
    #[schemars(description = "Header/footer segment ID; omit for the body")]
    pub segment_id: Option<String>,
}

/// Remove bullet formatting from a paragraph range.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BulletsDeleteRequest {
    #[schemars(description = "Document ID to edit")]
    pub document_id: String,
    #[schemars(description = "1-based start index (inclusive); clamped")]
    pub start_index: i64,
    #[schemars(description = "End index (exclusive); clamped")]
    pub end_index: i64,
    #[schemars(description = "Header/footer segment ID; omit for the body")]
    pub segment_id: Option<String>,
}

// ============================================================================
// Escape Hatch
// ============================================================================

/// Forward raw request objects untouched.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BatchApplyRequest {
    #[schemars(description = "Document ID to edit")]
    pub document_id: String,
    /// Raw request objects, applied in order as one batch
    #[schemars(description = "Raw request objects, applied in order as a single batch")]
    pub requests: Vec<serde_json::Value>,
}
