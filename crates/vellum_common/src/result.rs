//! Result and error types for violated internal invariants.

/// Result type for operations that can only fail because of a bug in Vellum.
///
/// Defects in analyzed source are never reported through this type. They are
/// ordinary `Warning` values carried as data; `Err` here means the tooling
/// itself broke an invariant (for example, a dangling document id).
pub type VellumResult<T> = Result<T, InternalError>;

/// A tooling bug, as opposed to a problem in the analyzed documents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("internal analyzer error: {message}")]
pub struct InternalError {
    /// Description of the violated invariant.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}
