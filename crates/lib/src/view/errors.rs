//! Error types for data view operations.
//!
//! Only programmer misuse is an error here. A query that does not resolve,
//! or a stored value that cannot be coerced, is reported as `None` by the
//! getters instead.

use thiserror::Error;

use crate::query::QueryError;

/// Structured error types for data view operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ViewError {
    /// The query was rejected, usually because it was empty
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The view handle does not belong to the container it was used with
    #[error("Illegal view state: {reason}")]
    IllegalState { reason: String },
}

impl ViewError {
    /// Check if this error is an invalid (usually empty) query
    pub fn is_invalid_path(&self) -> bool {
        matches!(self, ViewError::Query(err) if err.is_invalid_path())
    }

    /// Check if this error is an illegal state
    pub fn is_illegal_state(&self) -> bool {
        matches!(self, ViewError::IllegalState { .. })
    }

    /// Get the query if this is a query-related error
    pub fn query(&self) -> Option<&str> {
        match self {
            ViewError::Query(err) => Some(err.query()),
            _ => None,
        }
    }
}

// Conversion from ViewError to the main Error type
impl From<ViewError> for crate::Error {
    fn from(err: ViewError) -> Self {
        crate::Error::View(err)
    }
}
