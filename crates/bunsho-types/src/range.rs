//! Ranges and locations in a document's current index space.

use serde::{Deserialize, Serialize};

/// A validated half-open `[start_index, end_index)` span.
///
/// After clamping, `1 <= start_index < end_index <= document_length` holds.
/// A missing `segment_id` addresses the main body; a present one addresses an
/// alternate stream (header or footer) with its own, independently tracked
/// length.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRange {
    pub start_index: u32,
    pub end_index: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_id: Option<String>,
}

impl DocumentRange {
    pub fn new(start_index: u32, end_index: u32) -> Self {
        Self { start_index, end_index, segment_id: None }
    }

    pub fn in_segment(start_index: u32, end_index: u32, segment_id: impl Into<String>) -> Self {
        Self {
            start_index,
            end_index,
            segment_id: Some(segment_id.into()),
        }
    }

    /// Number of indices covered.
    pub fn len(&self) -> u32 {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn is_empty(&self) -> bool {
        self.end_index <= self.start_index
    }
}

impl std::fmt::Display for DocumentRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.segment_id {
            Some(seg) => write!(f, "[{}, {}) in {}", self.start_index, self.end_index, seg),
            None => write!(f, "[{}, {})", self.start_index, self.end_index),
        }
    }
}

/// A caller-supplied insertion point, not yet validated.
///
/// `index` is signed on purpose: callers send whatever they like and the
/// clamper pulls it into bounds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_id: Option<String>,
}

impl Location {
    pub fn at(index: i64) -> Self {
        Self { index: Some(index), segment_id: None }
    }
}

/// "End of this stream" as an insertion point, resolved remotely.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndOfSegmentLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_id: Option<String>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_len() {
        assert_eq!(DocumentRange::new(1, 10).len(), 9);
        assert_eq!(DocumentRange::new(5, 5).len(), 0);
        assert!(DocumentRange::new(5, 5).is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(DocumentRange::new(1, 4).to_string(), "[1, 4)");
        assert_eq!(
            DocumentRange::in_segment(2, 3, "header-abc").to_string(),
            "[2, 3) in header-abc"
        );
    }

    #[test]
    fn test_segment_id_omitted_in_json() {
        let json = serde_json::to_value(DocumentRange::new(1, 4)).unwrap();
        assert!(json.get("segment_id").is_none());
    }
}
