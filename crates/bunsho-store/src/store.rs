//! The store proper: document entries, stream buffers, batch application.

use std::collections::HashMap;

use dashmap::DashMap;
use regex::RegexBuilder;
use tracing::debug;
use uuid::Uuid;

use bunsho_core::DocumentAccessor;
use bunsho_types::{
    DocumentRange, DocumentView, HeaderFooterType, InsertPoint, NamedRangeInfo, OpReply,
    PrimitiveOp, RemoteError,
};

/// Code unit standing in for a structural object (footnote marker, image).
const OBJECT_MARKER: u16 = 0xFFFC;
/// Code unit standing in for a page break.
const PAGE_BREAK: u16 = 0x000C;
const NEWLINE: u16 = 0x000A;

/// One stored document.
///
/// `body` and each entry in `streams` are UTF-16 code-unit buffers that
/// always end with one real terminator unit. The terminator occupies the
/// stream's final index, so content is exactly `[1, length - 1)`.
struct DocEntry {
    title: String,
    body: Vec<u16>,
    revision: u64,
    headers: Vec<(String, HeaderFooterType)>,
    footers: Vec<(String, HeaderFooterType)>,
    /// Header/footer content streams, keyed by segment id.
    streams: HashMap<String, Vec<u16>>,
    named_ranges: Vec<NamedRangeInfo>,
    bullet_ranges: Vec<DocumentRange>,
    footnote_seq: u64,
}

impl DocEntry {
    fn new(title: String) -> Self {
        Self {
            title,
            body: vec![NEWLINE],
            revision: 1,
            headers: Vec::new(),
            footers: Vec::new(),
            streams: HashMap::new(),
            named_ranges: Vec::new(),
            bullet_ranges: Vec::new(),
            footnote_seq: 0,
        }
    }

    fn revision_id(&self) -> String {
        format!("rev-{}", self.revision)
    }

    fn stream_mut(&mut self, segment_id: Option<&str>) -> Result<&mut Vec<u16>, RemoteError> {
        match segment_id {
            None => Ok(&mut self.body),
            Some(id) => self
                .streams
                .get_mut(id)
                .ok_or_else(|| RemoteError::NotFound(format!("segment {id}"))),
        }
    }

    fn stream(&self, segment_id: Option<&str>) -> Result<&Vec<u16>, RemoteError> {
        match segment_id {
            None => Ok(&self.body),
            Some(id) => self
                .streams
                .get(id)
                .ok_or_else(|| RemoteError::NotFound(format!("segment {id}"))),
        }
    }
}

fn utf16_units(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

/// Reported stream length: the exclusive end index past the terminator, so
/// `buf.len() + 1`. A stream holding only its terminator reports 1.
fn stream_length(buf: &[u16]) -> u32 {
    if buf.len() <= 1 { 1 } else { buf.len() as u32 + 1 }
}

/// Insert `units` at a 1-based code-unit index. Content may land anywhere up
/// to and including the terminator's position, which keeps the terminator
/// as the final unit.
fn insert_units(buf: &mut Vec<u16>, index: u32, units: &[u16]) -> Result<(), RemoteError> {
    let pos = index.saturating_sub(1) as usize;
    if index < 1 || pos >= buf.len() {
        return Err(RemoteError::OutOfRange {
            detail: format!("insert index {index} exceeds segment length {}", stream_length(buf)),
        });
    }
    buf.splice(pos..pos, units.iter().copied());
    Ok(())
}

/// Delete a half-open range of content units. The terminator is not
/// deletable, so `end_index` may reach at most the terminator's index.
fn delete_units(buf: &mut Vec<u16>, range: &DocumentRange) -> Result<(), RemoteError> {
    if range.start_index < 1
        || range.end_index as usize > buf.len()
        || range.start_index >= range.end_index
    {
        return Err(RemoteError::OutOfRange {
            detail: format!(
                "cannot delete {range} from a segment of length {}",
                stream_length(buf)
            ),
        });
    }
    let start = (range.start_index - 1) as usize;
    let end = (range.end_index - 1) as usize;
    buf.drain(start..end);
    Ok(())
}

fn short_id(prefix: &str) -> String {
    let raw = Uuid::new_v4().simple().to_string();
    format!("{prefix}.{}", &raw[..12])
}

/// Thread-safe in-memory store.
#[derive(Default)]
pub struct DocumentStore {
    docs: DashMap<String, DocEntry>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document_count(&self) -> usize {
        self.docs.len()
    }

    fn create_document(
        &self,
        title: &str,
        segments: &[bunsho_types::IndexedSegment],
    ) -> Result<OpReply, RemoteError> {
        let mut entry = DocEntry::new(title.to_string());
        // Segments arrive contiguous from index 1; rendering in order is
        // equivalent to honoring each start index. A heading's span exceeds
        // its text by one paragraph terminator, rendered here as a newline.
        let mut content: Vec<u16> = Vec::new();
        for seg in segments {
            let rendered = utf16_units(seg.rendered_text());
            let pad = (seg.len() as usize).saturating_sub(rendered.len());
            content.extend(rendered);
            content.extend(std::iter::repeat(NEWLINE).take(pad));
        }
        content.push(NEWLINE);
        entry.body = content;
        let document_id = short_id("doc");
        let reply = OpReply::DocumentCreated {
            document_id: document_id.clone(),
            title: entry.title.clone(),
            revision_id: entry.revision_id(),
        };
        debug!(doc = %document_id, body_units = entry.body.len(), "created document");
        self.docs.insert(document_id, entry);
        Ok(reply)
    }

    fn apply(&self, entry: &mut DocEntry, op: &PrimitiveOp) -> Result<OpReply, RemoteError> {
        match op {
            PrimitiveOp::CreateDocument { .. } => Err(RemoteError::Api(
                "create_document may only appear alone, without a document id".into(),
            )),

            PrimitiveOp::InsertText { point, text } => {
                let units = utf16_units(text);
                insert_at_point(entry, point, &units)?;
                Ok(OpReply::None)
            }

            PrimitiveOp::InsertTable { point, rows, columns } => {
                // A table occupies one newline plus one unit per cell.
                let units = vec![NEWLINE; (rows * columns + 1) as usize];
                insert_at_point(entry, point, &units)?;
                Ok(OpReply::None)
            }

            PrimitiveOp::CreateFootnote { point } => {
                insert_at_point(entry, point, &[OBJECT_MARKER])?;
                entry.footnote_seq += 1;
                Ok(OpReply::FootnoteCreated {
                    footnote_id: format!("fn.{}", entry.footnote_seq),
                })
            }

            PrimitiveOp::InsertPageBreak { point } => {
                insert_at_point(entry, point, &[PAGE_BREAK])?;
                Ok(OpReply::None)
            }

            PrimitiveOp::InsertInlineImage { point, .. } => {
                insert_at_point(entry, point, &[OBJECT_MARKER])?;
                Ok(OpReply::None)
            }

            PrimitiveOp::CreateHeader { kind } => {
                if entry.headers.iter().any(|(_, k)| k == kind) {
                    return Err(RemoteError::AlreadyExists { what: "header".into() });
                }
                let id = short_id("hdr");
                entry.headers.push((id.clone(), *kind));
                entry.streams.insert(id.clone(), vec![NEWLINE]);
                Ok(OpReply::HeaderCreated { header_id: id })
            }

            PrimitiveOp::CreateFooter { kind } => {
                if entry.footers.iter().any(|(_, k)| k == kind) {
                    return Err(RemoteError::AlreadyExists { what: "footer".into() });
                }
                let id = short_id("ftr");
                entry.footers.push((id.clone(), *kind));
                entry.streams.insert(id.clone(), vec![NEWLINE]);
                Ok(OpReply::FooterCreated { footer_id: id })
            }

            PrimitiveOp::CreateNamedRange { name, range } => {
                let len = stream_length(entry.stream(range.segment_id.as_deref())?);
                if range.end_index > len {
                    return Err(RemoteError::OutOfRange {
                        detail: format!("named range {range} exceeds segment length {len}"),
                    });
                }
                let id = short_id("nr");
                entry.named_ranges.push(NamedRangeInfo {
                    named_range_id: id.clone(),
                    name: name.clone(),
                    range: range.clone(),
                });
                Ok(OpReply::NamedRangeCreated { named_range_id: id })
            }

            PrimitiveOp::CreateParagraphBullets { range, .. } => {
                let len = stream_length(entry.stream(range.segment_id.as_deref())?);
                if range.end_index > len {
                    return Err(RemoteError::OutOfRange {
                        detail: format!("bullet range {range} exceeds segment length {len}"),
                    });
                }
                entry.bullet_ranges.push(range.clone());
                Ok(OpReply::None)
            }

            PrimitiveOp::DeleteParagraphBullets { range } => {
                entry.bullet_ranges.retain(|r| {
                    r.segment_id != range.segment_id
                        || r.end_index <= range.start_index
                        || r.start_index >= range.end_index
                });
                Ok(OpReply::None)
            }

            PrimitiveOp::DeleteContentRange { range } => {
                let buf = entry.stream_mut(range.segment_id.as_deref())?;
                delete_units(buf, range)?;
                Ok(OpReply::None)
            }

            PrimitiveOp::DeleteHeader { header_id } => {
                let before = entry.headers.len();
                entry.headers.retain(|(id, _)| id != header_id);
                if entry.headers.len() == before {
                    return Err(RemoteError::NotFound(format!("header {header_id}")));
                }
                entry.streams.remove(header_id);
                Ok(OpReply::None)
            }

            PrimitiveOp::DeleteFooter { footer_id } => {
                let before = entry.footers.len();
                entry.footers.retain(|(id, _)| id != footer_id);
                if entry.footers.len() == before {
                    return Err(RemoteError::NotFound(format!("footer {footer_id}")));
                }
                entry.streams.remove(footer_id);
                Ok(OpReply::None)
            }

            PrimitiveOp::DeleteNamedRange { named_range_id, name } => {
                let before = entry.named_ranges.len();
                entry.named_ranges.retain(|nr| {
                    let by_id = named_range_id.as_deref().is_some_and(|id| nr.named_range_id == id);
                    let by_name = name.as_deref().is_some_and(|n| nr.name == n);
                    !(by_id || by_name)
                });
                if entry.named_ranges.len() == before {
                    return Err(RemoteError::NotFound("named range".into()));
                }
                Ok(OpReply::None)
            }

            PrimitiveOp::ReplaceAllText { find, replace, match_case } => {
                // Match against content only; the terminator stays put.
                let body = String::from_utf16_lossy(&entry.body[..entry.body.len() - 1]);
                let re = RegexBuilder::new(&regex::escape(find))
                    .case_insensitive(!match_case)
                    .build()
                    .map_err(|e| RemoteError::Api(e.to_string()))?;
                let occurrences = re.find_iter(&body).count() as u64;
                if occurrences > 0 {
                    let replaced = re.replace_all(&body, replace.as_str());
                    entry.body = utf16_units(&replaced);
                    entry.body.push(NEWLINE);
                }
                Ok(OpReply::TextReplaced { occurrences_changed: occurrences })
            }

            PrimitiveOp::Opaque(_) => Err(RemoteError::Unsupported(
                "raw request passthrough is not supported by the in-memory store".into(),
            )),
        }
    }
}

fn insert_at_point(
    entry: &mut DocEntry,
    point: &InsertPoint,
    units: &[u16],
) -> Result<(), RemoteError> {
    match point {
        InsertPoint::At { index, segment_id } => {
            let buf = entry.stream_mut(segment_id.as_deref())?;
            insert_units(buf, *index, units)
        }
        InsertPoint::EndOfSegment(loc) => {
            let buf = entry.stream_mut(loc.segment_id.as_deref())?;
            // Content lands just before the terminator.
            let pos = buf.len() - 1;
            buf.splice(pos..pos, units.iter().copied());
            Ok(())
        }
    }
}

impl DocumentAccessor for DocumentStore {
    fn get_document_length(
        &self,
        document_id: &str,
        segment_id: Option<&str>,
    ) -> Result<u32, RemoteError> {
        let entry = self
            .docs
            .get(document_id)
            .ok_or_else(|| RemoteError::NotFound(format!("document {document_id}")))?;
        Ok(stream_length(entry.stream(segment_id)?))
    }

    fn get_document(&self, document_id: &str) -> Result<DocumentView, RemoteError> {
        let entry = self
            .docs
            .get(document_id)
            .ok_or_else(|| RemoteError::NotFound(format!("document {document_id}")))?;
        Ok(DocumentView {
            document_id: document_id.to_string(),
            title: entry.title.clone(),
            revision_id: entry.revision_id(),
            body: String::from_utf16_lossy(&entry.body[..entry.body.len() - 1]),
            body_length: stream_length(&entry.body),
            header_ids: entry.headers.iter().map(|(id, _)| id.clone()).collect(),
            footer_ids: entry.footers.iter().map(|(id, _)| id.clone()).collect(),
            named_ranges: entry.named_ranges.clone(),
        })
    }

    /// Apply a batch in order against one document.
    ///
    /// A batch containing `CreateDocument` must contain only that op and must
    /// carry no document id. Application is sequential and not transactional:
    /// an error aborts the batch but earlier ops in it stay applied.
    fn submit_batch(
        &self,
        document_id: Option<&str>,
        ops: &[PrimitiveOp],
    ) -> Result<Vec<OpReply>, RemoteError> {
        if let [op] = ops {
            if let PrimitiveOp::CreateDocument { title, segments } = op {
                if document_id.is_some() {
                    return Err(RemoteError::Api(
                        "create_document may only appear alone, without a document id".into(),
                    ));
                }
                return Ok(vec![self.create_document(title, segments)?]);
            }
        }
        if ops.iter().any(PrimitiveOp::is_create_document) {
            return Err(RemoteError::Api(
                "create_document may only appear alone, without a document id".into(),
            ));
        }

        let doc_id = document_id
            .ok_or_else(|| RemoteError::Api("batch submitted without a document id".into()))?;
        let mut entry = self
            .docs
            .get_mut(doc_id)
            .ok_or_else(|| RemoteError::NotFound(format!("document {doc_id}")))?;

        let mut replies = Vec::with_capacity(ops.len());
        for op in ops {
            replies.push(self.apply(&mut entry, op)?);
        }
        entry.revision += 1;
        Ok(replies)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bunsho_types::IndexedSegment;

    fn create(store: &DocumentStore, text: &str) -> String {
        let segments = if text.is_empty() {
            vec![]
        } else {
            vec![IndexedSegment::plain(1, text.to_string())]
        };
        let replies = store
            .submit_batch(None, &[PrimitiveOp::CreateDocument { title: "t".into(), segments }])
            .unwrap();
        match &replies[0] {
            OpReply::DocumentCreated { document_id, .. } => document_id.clone(),
            other => panic!("unexpected reply {other:?}"),
        }
    }

    #[test]
    fn test_empty_document_has_length_one() {
        let store = DocumentStore::new();
        let id = create(&store, "");
        assert_eq!(store.get_document_length(&id, None).unwrap(), 1);
    }

    #[test]
    fn test_length_counts_utf16_units() {
        let store = DocumentStore::new();
        // 3 content units, terminator at index 4, length 5.
        let id = create(&store, "a🦀");
        assert_eq!(store.get_document_length(&id, None).unwrap(), 5);
    }

    #[test]
    fn test_delete_to_length_minus_one_clears_all_content() {
        let store = DocumentStore::new();
        let id = create(&store, "old content here");
        let len = store.get_document_length(&id, None).unwrap();

        store
            .submit_batch(
                Some(&id),
                &[PrimitiveOp::DeleteContentRange { range: DocumentRange::new(1, len - 1) }],
            )
            .unwrap();
        assert_eq!(store.get_document(&id).unwrap().body, "");
        assert_eq!(store.get_document_length(&id, None).unwrap(), 1);
    }

    #[test]
    fn test_insert_and_delete_round_trip() {
        let store = DocumentStore::new();
        let id = create(&store, "hello");
        store
            .submit_batch(
                Some(&id),
                &[PrimitiveOp::InsertText {
                    point: InsertPoint::at(6),
                    text: " world".into(),
                }],
            )
            .unwrap();
        assert_eq!(store.get_document(&id).unwrap().body, "hello world");

        store
            .submit_batch(
                Some(&id),
                &[PrimitiveOp::DeleteContentRange { range: DocumentRange::new(6, 12) }],
            )
            .unwrap();
        assert_eq!(store.get_document(&id).unwrap().body, "hello");
    }

    #[test]
    fn test_insert_past_terminator_is_out_of_range() {
        let store = DocumentStore::new();
        let id = create(&store, "ab");
        let err = store
            .submit_batch(
                Some(&id),
                &[PrimitiveOp::InsertText { point: InsertPoint::at(10), text: "x".into() }],
            )
            .unwrap_err();
        assert!(matches!(err, RemoteError::OutOfRange { .. }));
    }

    #[test]
    fn test_second_header_of_same_kind_conflicts() {
        let store = DocumentStore::new();
        let id = create(&store, "body");
        let op = PrimitiveOp::CreateHeader { kind: HeaderFooterType::Default };
        store.submit_batch(Some(&id), std::slice::from_ref(&op)).unwrap();
        let err = store.submit_batch(Some(&id), &[op]).unwrap_err();
        assert!(err.is_already_exists());

        // A different kind is still fine.
        store
            .submit_batch(
                Some(&id),
                &[PrimitiveOp::CreateHeader { kind: HeaderFooterType::FirstPage }],
            )
            .unwrap();
        assert_eq!(store.get_document(&id).unwrap().header_ids.len(), 2);
    }

    #[test]
    fn test_header_stream_has_independent_length() {
        let store = DocumentStore::new();
        let id = create(&store, "body text");
        let replies = store
            .submit_batch(
                Some(&id),
                &[PrimitiveOp::CreateHeader { kind: HeaderFooterType::Default }],
            )
            .unwrap();
        let OpReply::HeaderCreated { header_id } = &replies[0] else {
            panic!("expected header reply");
        };
        assert_eq!(store.get_document_length(&id, Some(header_id)).unwrap(), 1);

        store
            .submit_batch(
                Some(&id),
                &[PrimitiveOp::InsertText {
                    point: InsertPoint::At { index: 1, segment_id: Some(header_id.clone()) },
                    text: "hdr".into(),
                }],
            )
            .unwrap();
        assert_eq!(store.get_document_length(&id, Some(header_id)).unwrap(), 5);
        // Body unchanged.
        assert_eq!(store.get_document_length(&id, None).unwrap(), 11);
    }

    #[test]
    fn test_replace_all_counts_occurrences() {
        let store = DocumentStore::new();
        let id = create(&store, "Cat cat CAT dog");
        let replies = store
            .submit_batch(
                Some(&id),
                &[PrimitiveOp::ReplaceAllText {
                    find: "cat".into(),
                    replace: "bird".into(),
                    match_case: false,
                }],
            )
            .unwrap();
        assert_eq!(replies[0], OpReply::TextReplaced { occurrences_changed: 3 });
        assert_eq!(store.get_document(&id).unwrap().body, "bird bird bird dog");
    }

    #[test]
    fn test_replace_all_match_case() {
        let store = DocumentStore::new();
        let id = create(&store, "Cat cat");
        let replies = store
            .submit_batch(
                Some(&id),
                &[PrimitiveOp::ReplaceAllText {
                    find: "cat".into(),
                    replace: "dog".into(),
                    match_case: true,
                }],
            )
            .unwrap();
        assert_eq!(replies[0], OpReply::TextReplaced { occurrences_changed: 1 });
        assert_eq!(store.get_document(&id).unwrap().body, "Cat dog");
    }

    #[test]
    fn test_named_range_create_and_delete_by_name() {
        let store = DocumentStore::new();
        let id = create(&store, "0123456789");
        store
            .submit_batch(
                Some(&id),
                &[PrimitiveOp::CreateNamedRange {
                    name: "mark".into(),
                    range: DocumentRange::new(2, 5),
                }],
            )
            .unwrap();
        assert_eq!(store.get_document(&id).unwrap().named_ranges.len(), 1);

        store
            .submit_batch(
                Some(&id),
                &[PrimitiveOp::DeleteNamedRange {
                    named_range_id: None,
                    name: Some("mark".into()),
                }],
            )
            .unwrap();
        assert!(store.get_document(&id).unwrap().named_ranges.is_empty());
    }

    #[test]
    fn test_delete_missing_named_range_is_not_found() {
        let store = DocumentStore::new();
        let id = create(&store, "text");
        let err = store
            .submit_batch(
                Some(&id),
                &[PrimitiveOp::DeleteNamedRange {
                    named_range_id: Some("nr.nope".into()),
                    name: None,
                }],
            )
            .unwrap_err();
        assert!(matches!(err, RemoteError::NotFound(_)));
    }

    #[test]
    fn test_table_occupies_one_plus_cells() {
        let store = DocumentStore::new();
        let id = create(&store, "x");
        store
            .submit_batch(
                Some(&id),
                &[PrimitiveOp::InsertTable { point: InsertPoint::at(2), rows: 2, columns: 3 }],
            )
            .unwrap();
        // 1 body unit + (1 + 2*3) table units + terminator, length one past.
        assert_eq!(store.get_document_length(&id, None).unwrap(), 10);
    }

    #[test]
    fn test_opaque_op_is_unsupported() {
        let store = DocumentStore::new();
        let id = create(&store, "x");
        let err = store
            .submit_batch(Some(&id), &[PrimitiveOp::Opaque(serde_json::json!({"k": 1}))])
            .unwrap_err();
        assert!(matches!(err, RemoteError::Unsupported(_)));
    }

    #[test]
    fn test_create_document_must_be_sole_op() {
        let store = DocumentStore::new();
        let err = store
            .submit_batch(
                None,
                &[
                    PrimitiveOp::CreateDocument { title: "t".into(), segments: vec![] },
                    PrimitiveOp::InsertText { point: InsertPoint::at(1), text: "x".into() },
                ],
            )
            .unwrap_err();
        assert!(matches!(err, RemoteError::Api(_)));
    }

    #[test]
    fn test_revision_advances_per_batch() {
        let store = DocumentStore::new();
        let id = create(&store, "x");
        let r1 = store.get_document(&id).unwrap().revision_id;
        store
            .submit_batch(
                Some(&id),
                &[PrimitiveOp::InsertText { point: InsertPoint::at(1), text: "y".into() }],
            )
            .unwrap();
        let r2 = store.get_document(&id).unwrap().revision_id;
        assert_ne!(r1, r2);
    }
}
