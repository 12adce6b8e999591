//! Error types for value construction.

use thiserror::Error;

/// Structured error types for value operations.
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValueError {
    /// A bounded value was given an empty range or a default outside it
    #[error("Invalid bounds for value '{key}': {reason}")]
    InvalidBounds { key: String, reason: String },
}

impl ValueError {
    /// Check if this error is an invalid bounds error
    pub fn is_invalid_bounds(&self) -> bool {
        matches!(self, ValueError::InvalidBounds { .. })
    }

    /// Get the key of the value that failed
    pub fn key(&self) -> &str {
        match self {
            ValueError::InvalidBounds { key, .. } => key,
        }
    }
}

// Conversion from ValueError to the main Error type
impl From<ValueError> for crate::Error {
    fn from(err: ValueError) -> Self {
        crate::Error::Value(err)
    }
}
