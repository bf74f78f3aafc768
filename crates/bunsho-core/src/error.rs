//! Build-time failures for mutation requests.

use thiserror::Error;

use bunsho_types::RemoteError;

/// Errors that can occur while building or executing a mutation request.
#[derive(Error, Debug)]
pub enum BuildError {
    /// One or more required fields were absent, blank, or empty collections.
    ///
    /// Detected before any remote call. The message shape is part of the
    /// tool contract.
    #[error("Missing required parameter(s): {}", .0.join(", "))]
    MissingParameter(Vec<String>),

    /// A clamped range collapsed (`start >= end`).
    ///
    /// Reported, never silently swapped or defaulted — the caller asked for
    /// a span that does not exist in the current document.
    #[error("Invalid range: start_index ({start}) must be < end_index ({end}).")]
    InvalidRange { start: i64, end: i64 },

    /// The accessor reported an API-level failure.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl BuildError {
    /// Shorthand used by the required-parameter checks.
    pub fn missing(fields: &[&str]) -> Self {
        BuildError::MissingParameter(fields.iter().map(|s| s.to_string()).collect())
    }
}
