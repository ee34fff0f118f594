//! Error types for tracker operations.

use thiserror::Error;

/// Result type alias for tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Errors that can occur while tracking edits to a document.
///
/// Validation happens before any state is mutated, so every error leaves the
/// tracker exactly as it was; callers may retry with a different name.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// A destination field name collides with an existing field.
    #[error("a field with the name \"{field}\" already exists")]
    DuplicateField {
        /// The name that collided.
        field: String,
    },
}

impl TrackerError {
    /// Create a duplicate field error.
    #[inline]
    pub fn duplicate_field(field: impl Into<String>) -> Self {
        TrackerError::DuplicateField {
            field: field.into(),
        }
    }

    /// The field name this error refers to.
    #[inline]
    pub fn field(&self) -> &str {
        match self {
            TrackerError::DuplicateField { field } => field,
        }
    }
}
