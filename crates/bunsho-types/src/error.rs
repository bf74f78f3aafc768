//! Failures reported by the remote document service.

use thiserror::Error;

/// Errors surfaced by a document accessor.
///
/// These are terminal for the operation that hit them; the core performs no
/// retry. The single case recovered locally is `AlreadyExists` during
/// header/footer creation, where the caller re-reads the document and adopts
/// the existing id.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// No document with this id.
    #[error("document not found: {0}")]
    NotFound(String),

    /// A create was issued for something the document already has.
    ///
    /// The message intentionally contains "already exists"; the original API
    /// reports this conflict only as an error-string substring.
    #[error("{what} already exists")]
    AlreadyExists {
        /// What collided ("header" or "footer").
        what: String,
    },

    /// An index or range fell outside the document's current bounds.
    #[error("index out of range: {detail}")]
    OutOfRange { detail: String },

    /// The service cannot execute this operation.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// Any other API-level failure, verbatim.
    #[error("{0}")]
    Api(String),
}

impl RemoteError {
    /// True when a create collided with existing state.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, RemoteError::AlreadyExists { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_exists_message_contains_marker() {
        let err = RemoteError::AlreadyExists { what: "header".into() };
        assert!(err.to_string().contains("already exists"));
        assert!(err.is_already_exists());
    }

    #[test]
    fn test_api_error_is_verbatim() {
        let err = RemoteError::Api("quota exceeded".into());
        assert_eq!(err.to_string(), "quota exceeded");
        assert!(!err.is_already_exists());
    }
}
