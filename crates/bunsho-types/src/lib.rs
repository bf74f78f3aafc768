//! Shared index-space types for bunsho.
//!
//! The remote document model addresses all content through a single flat,
//! 1-based, UTF-16-code-unit index space. Every mutation is expressed as a
//! point index or a half-open `[start, end)` range over that space, and the
//! document always carries a trailing terminator at the final index.
//!
//! This crate is the leaf: segments, ranges, primitive operations, replies,
//! and the remote error type. It has **no internal bunsho dependencies**.
//!
//! # Key Types
//!
//! |--------------------|----------------------------------------------|
//! | Type               | Purpose                                      |
//! |--------------------|----------------------------------------------|
//! | [`IndexedSegment`] | One contiguous unit of encoded content       |
//! | [`DocumentRange`]  | A validated `[start, end)` span              |
//! | [`Location`]       | A caller-supplied insertion point            |
//! | [`PrimitiveOp`]    | One atomic remote mutation unit              |
//! | [`OpReply`]        | Per-operation reply from a batch             |
//! | [`DocumentView`]   | Structure snapshot of a remote document      |
//! | [`RemoteError`]    | Failure reported by the document service     |
//! |--------------------|----------------------------------------------|

pub mod error;
pub mod ops;
pub mod range;
pub mod segment;

pub use error::RemoteError;
pub use ops::{
    DocumentView, HeaderFooterType, InsertPoint, NamedRangeInfo, ObjectSize, OpReply, PrimitiveOp,
};
pub use range::{DocumentRange, EndOfSegmentLocation, Location};
pub use segment::{IndexedSegment, SegmentKind, TextStyle, utf16_len};
