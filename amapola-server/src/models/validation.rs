//! Validation error types

use std::fmt;

/// Validation error for writable record fields
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field exceeds the column width of the legacy schema
    TooLong { field: &'static str, max: usize },

    /// Numeric field is NaN or infinite
    NotFinite { field: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::NotFinite { field } => write!(f, "{} must be a finite number", field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check a text field against a maximum length in characters (not bytes).
pub(crate) fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}
