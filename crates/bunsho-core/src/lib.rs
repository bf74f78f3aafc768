//! Index-model core for bunsho.
//!
//! Everything here exists to keep one model self-consistent: the remote
//! document's flat, 1-based, UTF-16-code-unit index space. Two pressure
//! points:
//!
//! - [`encoder`] turns markdown-like input into an ordered, contiguous run of
//!   [`bunsho_types::IndexedSegment`]s that exactly reproduces the index
//!   layout the content will have once inserted.
//! - [`clamp`] validates/clamps caller-supplied indices and ranges against
//!   the document's *current* length, so out-of-range mutations never reach
//!   the remote API.
//!
//! [`builder`] composes the two: it compiles a [`MutationIntent`] into an
//! ordered batch of primitive operations, reading the live length through a
//! [`DocumentAccessor`] right before clamping.

pub mod accessor;
pub mod builder;
pub mod clamp;
pub mod encoder;
pub mod error;
pub mod intent;

pub use accessor::DocumentAccessor;
pub use builder::{BuiltRequest, CreateOutcome, IntentReply, RequestBuilder, execute};
pub use clamp::{clamp_point, clamp_range};
pub use encoder::{encode, encode_markdown};
pub use error::BuildError;
pub use intent::MutationIntent;
