//! Index and range validation against the live document length.
//!
//! The remote document's length changes between a caller forming a request
//! and the request executing, so absolute indices are never trusted
//! verbatim: callers re-fetch the current length immediately before clamping
//! (a point read-then-act, not a transaction — the residual race with
//! concurrent external writers is a documented gap, not corrected here).
//!
//! `document_length` is the end index of the last content element; an empty
//! body reports 1, meaning the document holds only its trailing terminator
//! and admits no range at all.

use tracing::debug;

use bunsho_types::DocumentRange;

use crate::error::BuildError;

/// Clamp a point index into the insertable interval `[1, document_length)`.
///
/// The remote model forbids inserting at or after the terminator index, so
/// overshoot (and an absent index) is pulled back to one position before the
/// terminator; undershoot is pulled up to 1.
pub fn clamp_point(requested: Option<i64>, document_length: u32) -> u32 {
    let last_insertable = document_length.saturating_sub(1).max(1);
    let clamped = match requested {
        Some(index) if index < 1 => 1,
        Some(index) if (index as u64) < document_length as u64 => index as u32,
        _ => last_insertable,
    };
    if requested != Some(clamped as i64) {
        debug!(?requested, document_length, clamped, "clamped point index");
    }
    clamped
}

/// Clamp a half-open range into `[1, document_length]`.
///
/// `start` rises to at least 1, `end` drops to at most the document length.
/// If that collapses the range (`start' >= end'`), the request fails with
/// [`BuildError::InvalidRange`] carrying the clamped values — the caller is
/// told, never silently served a different span. A document of length <= 1
/// has an empty body and admits no valid range.
pub fn clamp_range(start: i64, end: i64, document_length: u32) -> Result<DocumentRange, BuildError> {
    let start_c = start.max(1);
    let end_c = end.min(document_length as i64);
    if start_c >= end_c {
        return Err(BuildError::InvalidRange { start: start_c, end: end_c });
    }
    if start_c != start || end_c != end {
        debug!(start, end, document_length, start_c, end_c, "clamped range");
    }
    Ok(DocumentRange::new(start_c as u32, end_c as u32))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_point_in_bounds_is_identity() {
        assert_eq!(clamp_point(Some(5), 10), 5);
        assert_eq!(clamp_point(Some(1), 10), 1);
        assert_eq!(clamp_point(Some(9), 10), 9);
    }

    #[test]
    fn test_clamp_point_absent_goes_before_terminator() {
        assert_eq!(clamp_point(None, 10), 9);
        assert_eq!(clamp_point(None, 2), 1);
    }

    #[test]
    fn test_clamp_point_overshoot_pulled_back() {
        assert_eq!(clamp_point(Some(50), 10), 9);
        assert_eq!(clamp_point(Some(10), 10), 9);
    }

    #[test]
    fn test_clamp_point_undershoot_pulled_up() {
        assert_eq!(clamp_point(Some(0), 10), 1);
        assert_eq!(clamp_point(Some(-3), 10), 1);
    }

    #[test]
    fn test_clamp_point_empty_document() {
        // Length 1 = terminator only. Index 1 is still the only answer.
        assert_eq!(clamp_point(None, 1), 1);
        assert_eq!(clamp_point(Some(4), 1), 1);
    }

    #[test]
    fn test_clamp_range_in_bounds() {
        let r = clamp_range(2, 8, 10).unwrap();
        assert_eq!((r.start_index, r.end_index), (2, 8));
    }

    #[test]
    fn test_clamp_range_trims_to_length() {
        let r = clamp_range(1, 20, 10).unwrap();
        assert_eq!((r.start_index, r.end_index), (1, 10));

        let r = clamp_range(-5, 4, 10).unwrap();
        assert_eq!((r.start_index, r.end_index), (1, 4));
    }

    #[test]
    fn test_clamp_range_collapse_is_reported() {
        match clamp_range(5, 3, 10) {
            Err(BuildError::InvalidRange { start, end }) => {
                assert_eq!((start, end), (5, 3));
            }
            other => panic!("expected InvalidRange, got {other:?}"),
        }
    }

    #[test]
    fn test_clamp_range_empty_document_has_no_range() {
        assert!(clamp_range(1, 2, 1).is_err());
    }
}
