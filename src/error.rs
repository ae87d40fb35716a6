use thiserror::Error;

use crate::models::QuestionId;

/// Errors returned by the question store.
///
/// Lookups that find nothing are not errors: they surface as `None` or an
/// empty list.
#[derive(Debug, Error)]
pub enum Error {
    /// The operation is declared but not available in this store.
    #[error("{0} is not supported")]
    NotSupported(&'static str),

    /// A write referenced a question that does not exist.
    #[error("question {0} does not exist")]
    QuestionNotFound(QuestionId),

    /// Failure reported by the underlying SQLite storage, passed through as is.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl Error {
    /// Returns true when the caller asked for something the store cannot do,
    /// as opposed to the storage itself failing.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::NotSupported(_) | Self::QuestionNotFound(_))
    }
}

/// Result alias for store operations.
pub type Result<T> = std::result::Result<T, Error>;
