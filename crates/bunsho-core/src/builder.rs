//! Mutation request builder.
//!
//! Compiles one [`MutationIntent`] into one ordered batch of
//! [`PrimitiveOp`]s. Required parameters are checked before any remote call;
//! intents that clamp perform exactly one length read, immediately before
//! clamping; and an intent is never split across two batches.

use tracing::debug;

use bunsho_types::{
    DocumentRange, EndOfSegmentLocation, IndexedSegment, InsertPoint, OpReply, PrimitiveOp,
    RemoteError,
};

use crate::accessor::DocumentAccessor;
use crate::clamp::{clamp_point, clamp_range};
use crate::encoder::encode_markdown;
use crate::error::BuildError;
use crate::intent::MutationIntent;

/// Bullet preset value the remote API rejects; dropped so it picks a default.
const UNSPECIFIED_BULLET_PRESET: &str = "BULLET_GLYPH_PRESET_UNSPECIFIED";

/// A compiled batch, ready to submit whole.
#[derive(Debug, Clone)]
pub struct BuiltRequest {
    /// Target document; `None` for a create batch.
    pub document_id: Option<String>,
    /// Ordered primitive operations.
    pub ops: Vec<PrimitiveOp>,
}

/// Outcome of a header/footer creation.
///
/// The remote create is not idempotent; instead of exception-shaped control
/// flow the executor reports which arm actually happened and lets the caller
/// decide what success means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Freshly created, with the new id.
    Created(String),
    /// A previous create got there first; carries the existing id.
    AlreadyExists(String),
}

impl CreateOutcome {
    /// The id either way.
    pub fn id(&self) -> &str {
        match self {
            CreateOutcome::Created(id) | CreateOutcome::AlreadyExists(id) => id,
        }
    }
}

/// Result of executing one intent end to end.
#[derive(Debug, Clone)]
pub struct IntentReply {
    /// The document the batch ran against (`None` before creation).
    pub document_id: Option<String>,
    /// Per-operation replies, in batch order.
    pub replies: Vec<OpReply>,
    /// Set for header/footer creation intents only.
    pub outcome: Option<CreateOutcome>,
}

impl IntentReply {
    /// Document id reported by a create reply, if the batch created one.
    pub fn created_document_id(&self) -> Option<&str> {
        self.replies.iter().find_map(|r| match r {
            OpReply::DocumentCreated { document_id, .. } => Some(document_id.as_str()),
            _ => None,
        })
    }
}

/// Compiles intents into primitive batches against a live document.
pub struct RequestBuilder<'a> {
    accessor: &'a dyn DocumentAccessor,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(accessor: &'a dyn DocumentAccessor) -> Self {
        Self { accessor }
    }

    /// Build the ordered batch for one intent.
    ///
    /// Fails fast with [`BuildError::MissingParameter`] before touching the
    /// accessor; otherwise performs at most one length read. The length is
    /// read immediately before clamping — a concurrent writer can still move
    /// the document under us between read and submit, which is accepted.
    pub fn build(&self, intent: &MutationIntent) -> Result<BuiltRequest, BuildError> {
        check_required(intent)?;

        let ops = match intent {
            MutationIntent::CreateDocument { title, text } => {
                let segments = if text.trim().is_empty() {
                    Vec::new()
                } else {
                    vec![IndexedSegment::plain(1, text.clone())]
                };
                vec![PrimitiveOp::CreateDocument { title: title.clone(), segments }]
            }

            MutationIntent::CreateDocumentFromMarkdown { title, markdown } => {
                vec![PrimitiveOp::CreateDocument {
                    title: title.clone(),
                    segments: encode_markdown(markdown, 1),
                }]
            }

            MutationIntent::InsertText { document_id, index, text } => {
                let len = self.length(document_id, None)?;
                vec![PrimitiveOp::InsertText {
                    point: InsertPoint::at(clamp_point(*index, len)),
                    text: text.clone(),
                }]
            }

            MutationIntent::InsertTable {
                document_id,
                rows,
                columns,
                index,
                at_end_of_segment,
                segment_id,
            } => {
                let point = if *at_end_of_segment {
                    InsertPoint::EndOfSegment(EndOfSegmentLocation {
                        segment_id: segment_id.clone(),
                    })
                } else {
                    let len = self.length(document_id, None)?;
                    InsertPoint::at(clamp_point(*index, len))
                };
                vec![PrimitiveOp::InsertTable { point, rows: *rows, columns: *columns }]
            }

            MutationIntent::CreateFootnote { document_id, location, end_of_segment } => {
                let point = self.resolve_point(
                    document_id,
                    location.as_ref().map(|l| (l.index, l.segment_id.as_deref())),
                    end_of_segment.as_ref(),
                )?;
                vec![PrimitiveOp::CreateFootnote { point }]
            }

            MutationIntent::InsertPageBreak { document_id, location, end_of_segment } => {
                let point = self.resolve_point(
                    document_id,
                    location.as_ref().map(|l| (l.index, l.segment_id.as_deref())),
                    end_of_segment.as_ref(),
                )?;
                vec![PrimitiveOp::InsertPageBreak { point }]
            }

            MutationIntent::InsertInlineImage { document_id, index, uri, size } => {
                let len = self.length(document_id, None)?;
                vec![PrimitiveOp::InsertInlineImage {
                    point: InsertPoint::at(clamp_point(*index, len)),
                    uri: uri.clone(),
                    size: *size,
                }]
            }

            MutationIntent::CreateHeader { kind, .. } => {
                vec![PrimitiveOp::CreateHeader { kind: *kind }]
            }

            MutationIntent::CreateFooter { kind, .. } => {
                vec![PrimitiveOp::CreateFooter { kind: *kind }]
            }

            MutationIntent::CreateNamedRange { document_id, name, start, end, segment_id } => {
                let range = self.clamped_range(document_id, *start, *end, segment_id)?;
                vec![PrimitiveOp::CreateNamedRange { name: name.clone(), range }]
            }

            MutationIntent::CreateBullets { document_id, start, end, segment_id, preset } => {
                let range = self.clamped_range(document_id, *start, *end, segment_id)?;
                let preset = preset
                    .as_deref()
                    .map(str::trim)
                    .filter(|p| !p.is_empty() && *p != UNSPECIFIED_BULLET_PRESET)
                    .map(String::from);
                vec![PrimitiveOp::CreateParagraphBullets { range, preset }]
            }

            MutationIntent::DeleteBullets { document_id, start, end, segment_id } => {
                let range = self.clamped_range(document_id, *start, *end, segment_id)?;
                vec![PrimitiveOp::DeleteParagraphBullets { range }]
            }

            MutationIntent::DeleteRange { start, end, segment_id, .. } => {
                // Trusted caller range by contract: forwarded verbatim.
                vec![PrimitiveOp::DeleteContentRange {
                    range: DocumentRange {
                        start_index: *start,
                        end_index: *end,
                        segment_id: segment_id.clone(),
                    },
                }]
            }

            MutationIntent::DeleteHeader { header_id, .. } => {
                vec![PrimitiveOp::DeleteHeader { header_id: header_id.clone() }]
            }

            MutationIntent::DeleteFooter { footer_id, .. } => {
                vec![PrimitiveOp::DeleteFooter { footer_id: footer_id.clone() }]
            }

            MutationIntent::DeleteNamedRange { named_range_id, name, .. } => {
                vec![PrimitiveOp::DeleteNamedRange {
                    named_range_id: named_range_id.clone(),
                    name: name.clone(),
                }]
            }

            MutationIntent::ReplaceWholeBody { document_id, text } => {
                let len = self.length(document_id, None)?;
                let mut ops = Vec::with_capacity(2);
                // Delete must precede insert within the same batch. An empty
                // body (length <= 1) has nothing to delete.
                if len > 1 {
                    ops.push(PrimitiveOp::DeleteContentRange {
                        range: DocumentRange::new(1, len - 1),
                    });
                }
                ops.push(PrimitiveOp::InsertText {
                    point: InsertPoint::at(1),
                    text: text.clone(),
                });
                ops
            }

            MutationIntent::ReplaceAllText { find, replace, match_case, .. } => {
                vec![PrimitiveOp::ReplaceAllText {
                    find: find.clone(),
                    replace: replace.clone(),
                    match_case: *match_case,
                }]
            }

            MutationIntent::ApplyRaw { ops, .. } => {
                ops.iter().cloned().map(PrimitiveOp::Opaque).collect()
            }
        };

        Ok(BuiltRequest {
            document_id: intent.document_id().map(String::from),
            ops,
        })
    }

    fn length(&self, document_id: &str, segment_id: Option<&str>) -> Result<u32, BuildError> {
        Ok(self.accessor.get_document_length(document_id, segment_id)?)
    }

    fn clamped_range(
        &self,
        document_id: &str,
        start: i64,
        end: i64,
        segment_id: &Option<String>,
    ) -> Result<DocumentRange, BuildError> {
        let len = self.length(document_id, segment_id.as_deref())?;
        let mut range = clamp_range(start, end, len)?;
        range.segment_id = segment_id.clone();
        Ok(range)
    }

    /// Resolve a `location` / `end_of_segment` pair to an insert point.
    ///
    /// `location` takes precedence. An explicit index inside it is clamped
    /// against the addressed stream's length; no location at all defaults to
    /// one position before the body terminator.
    fn resolve_point(
        &self,
        document_id: &str,
        location: Option<(Option<i64>, Option<&str>)>,
        end_of_segment: Option<&EndOfSegmentLocation>,
    ) -> Result<InsertPoint, BuildError> {
        match (location, end_of_segment) {
            (Some((index, segment_id)), _) => {
                let len = self.length(document_id, segment_id)?;
                Ok(InsertPoint::At {
                    index: clamp_point(index, len),
                    segment_id: segment_id.map(String::from),
                })
            }
            (None, Some(eos)) => Ok(InsertPoint::EndOfSegment(eos.clone())),
            (None, None) => {
                let len = self.length(document_id, None)?;
                Ok(InsertPoint::at(clamp_point(None, len)))
            }
        }
    }
}

/// Execute one intent end to end: build, submit as a single batch, and — for
/// header/footer creation only — recover an `already exists` conflict by
/// re-reading the document and adopting the existing id.
pub fn execute(
    accessor: &dyn DocumentAccessor,
    intent: &MutationIntent,
) -> Result<IntentReply, BuildError> {
    let built = RequestBuilder::new(accessor).build(intent)?;
    debug!(intent = intent.verb(), ops = built.ops.len(), "submitting batch");

    match accessor.submit_batch(built.document_id.as_deref(), &built.ops) {
        Ok(replies) => {
            let outcome = replies.iter().find_map(|r| match r {
                OpReply::HeaderCreated { header_id } => {
                    Some(CreateOutcome::Created(header_id.clone()))
                }
                OpReply::FooterCreated { footer_id } => {
                    Some(CreateOutcome::Created(footer_id.clone()))
                }
                _ => None,
            });
            Ok(IntentReply { document_id: built.document_id, replies, outcome })
        }
        Err(err) if err.is_already_exists() => {
            recover_existing(accessor, intent, built.document_id, err)
        }
        Err(err) => Err(err.into()),
    }
}

/// Read-then-report fallback masking the non-idempotent create.
fn recover_existing(
    accessor: &dyn DocumentAccessor,
    intent: &MutationIntent,
    document_id: Option<String>,
    err: RemoteError,
) -> Result<IntentReply, BuildError> {
    let doc_id = match &document_id {
        Some(id) => id.clone(),
        None => return Err(err.into()),
    };

    let (reply, outcome) = match intent {
        MutationIntent::CreateHeader { .. } => {
            let view = accessor.get_document(&doc_id)?;
            let Some(id) = view.header_ids.first().cloned() else {
                return Err(err.into());
            };
            (
                OpReply::HeaderCreated { header_id: id.clone() },
                CreateOutcome::AlreadyExists(id),
            )
        }
        MutationIntent::CreateFooter { .. } => {
            let view = accessor.get_document(&doc_id)?;
            let Some(id) = view.footer_ids.first().cloned() else {
                return Err(err.into());
            };
            (
                OpReply::FooterCreated { footer_id: id.clone() },
                CreateOutcome::AlreadyExists(id),
            )
        }
        // Other intents do not get the recovery; the conflict propagates.
        _ => return Err(err.into()),
    };

    debug!(doc = %doc_id, id = outcome.id(), "masked already-exists create");
    Ok(IntentReply {
        document_id,
        replies: vec![reply],
        outcome: Some(outcome),
    })
}

// ============================================================================
// Required-parameter checks
// ============================================================================

/// Fail fast when required fields are absent, blank, or empty collections.
/// Runs before any remote call.
fn check_required(intent: &MutationIntent) -> Result<(), BuildError> {
    let mut missing: Vec<&str> = Vec::new();
    let mut need = |name: &'static str, ok: bool| {
        if !ok {
            missing.push(name);
        }
    };

    use MutationIntent::*;
    match intent {
        CreateDocument { title, .. } => {
            need("title", !title.trim().is_empty());
        }
        CreateDocumentFromMarkdown { title, markdown } => {
            need("title", !title.trim().is_empty());
            need("markdown_text", !markdown.trim().is_empty());
        }
        InsertText { document_id, text, .. } => {
            need("document_id", !document_id.trim().is_empty());
            need("text_to_insert", !text.trim().is_empty());
        }
        InsertTable { document_id, rows, columns, .. } => {
            need("document_id", !document_id.trim().is_empty());
            need("rows", *rows > 0);
            need("columns", *columns > 0);
        }
        CreateFootnote { document_id, .. }
        | InsertPageBreak { document_id, .. }
        | CreateHeader { document_id, .. }
        | CreateFooter { document_id, .. }
        | CreateBullets { document_id, .. }
        | DeleteBullets { document_id, .. }
        | DeleteRange { document_id, .. } => {
            need("document_id", !document_id.trim().is_empty());
        }
        InsertInlineImage { document_id, uri, .. } => {
            need("document_id", !document_id.trim().is_empty());
            need("uri", !uri.trim().is_empty());
        }
        CreateNamedRange { document_id, name, .. } => {
            need("document_id", !document_id.trim().is_empty());
            need("name", !name.trim().is_empty());
        }
        DeleteHeader { document_id, header_id } => {
            need("document_id", !document_id.trim().is_empty());
            need("header_id", !header_id.trim().is_empty());
        }
        DeleteFooter { document_id, footer_id } => {
            need("document_id", !document_id.trim().is_empty());
            need("footer_id", !footer_id.trim().is_empty());
        }
        DeleteNamedRange { document_id, named_range_id, name } => {
            need("document_id", !document_id.trim().is_empty());
            let has_target = named_range_id.as_deref().is_some_and(|s| !s.trim().is_empty())
                || name.as_deref().is_some_and(|s| !s.trim().is_empty());
            need("named_range_id", has_target);
        }
        ReplaceWholeBody { document_id, text } => {
            need("document_id", !document_id.trim().is_empty());
            need("new_markdown_text", !text.trim().is_empty());
        }
        ReplaceAllText { document_id, find, replace, .. } => {
            need("document_id", !document_id.trim().is_empty());
            need("find_text", !find.trim().is_empty());
            need("replace_text", !replace.trim().is_empty());
        }
        ApplyRaw { document_id, ops } => {
            need("document_id", !document_id.trim().is_empty());
            need("requests", !ops.is_empty());
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(BuildError::missing(&missing))
    }
}

// ============================================================================
// Tests
// ============================================================================
