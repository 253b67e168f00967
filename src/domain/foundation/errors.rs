//! Boundary validation errors.
//!
//! The personalization engine is total and never fails; these only guard the
//! values that cross into it (caller ids, coordinates, experience names).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} is blank")]
    Blank { field: &'static str },

    #[error("{field} is longer than {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} {actual} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error("{field} '{value}' is not recognized")]
    Unrecognized { field: &'static str, value: String },
}

impl ValidationError {
    pub fn blank(field: &'static str) -> Self {
        ValidationError::Blank { field }
    }

    pub fn too_long(field: &'static str, max: usize) -> Self {
        ValidationError::TooLong { field, max }
    }

    pub fn out_of_range(field: &'static str, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::OutOfRange {
            field,
            min,
            max,
            actual,
        }
    }

    pub fn unrecognized(field: &'static str, value: impl Into<String>) -> Self {
        ValidationError::Unrecognized {
            field,
            value: value.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Blank { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::Unrecognized { field, .. } => field,
        }
    }
}
