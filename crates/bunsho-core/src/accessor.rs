//! The remote document service, as the core sees it.
//!
//! Transport and auth live elsewhere; the core only needs three blocking
//! calls. There is no retry or backoff here — a failed round trip propagates
//! immediately, and whatever retry policy exists belongs to the
//! implementation behind the trait.

use bunsho_types::{DocumentView, OpReply, PrimitiveOp, RemoteError};

/// Capability object for talking to the document service.
///
/// Constructed once at startup and threaded through every call — no ambient
/// singleton, no lazily built global client.
///
/// Each intent performs at most one length read immediately before clamping.
/// Because nothing is locked between that read and the batch submit, a
/// concurrent external writer can invalidate a clamped index in the window;
/// this is a known, accepted gap of the read-then-act model.
pub trait DocumentAccessor: Send + Sync {
    /// Current length of a document stream in UTF-16 code units.
    ///
    /// Derived from the end index of the last content element; an empty body
    /// reports 1 (terminator only). `segment_id` selects a header/footer
    /// stream, which tracks its own length; `None` is the main body.
    fn get_document_length(
        &self,
        document_id: &str,
        segment_id: Option<&str>,
    ) -> Result<u32, RemoteError>;

    /// Structure snapshot: title, revision, body text, header/footer ids,
    /// named ranges.
    fn get_document(&self, document_id: &str) -> Result<DocumentView, RemoteError>;

    /// Execute an ordered batch of primitive operations, replying per
    /// operation.
    ///
    /// `document_id` is `None` only for a batch whose sole member is a
    /// [`PrimitiveOp::CreateDocument`]; every other batch addresses an
    /// existing document.
    fn submit_batch(
        &self,
        document_id: Option<&str>,
        ops: &[PrimitiveOp],
    ) -> Result<Vec<OpReply>, RemoteError>;
}
