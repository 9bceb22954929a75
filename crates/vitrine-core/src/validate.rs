//! Draft validation: local preconditions checked before any dispatch.

use thiserror::Error;

use crate::record::{EditPatch, NewRecord};

/// A failed precondition on a single draft field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Validate an edit to an existing record.
///
/// Titles are trimmed before the emptiness check; prices must be finite
/// and positive.
pub fn validate_patch(patch: &EditPatch) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if patch.title.trim().is_empty() {
        errors.push(FieldError::new("title", "Title must not be empty"));
    }

    if !patch.price.is_finite() || patch.price <= 0.0 {
        errors.push(FieldError::new("price", "Price must be a positive number"));
    }

    errors
}

/// Validate a creation draft; in addition to the edit preconditions the
/// category id must be a positive integer.
pub fn validate_new(draft: &NewRecord) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if draft.title.trim().is_empty() {
        errors.push(FieldError::new("title", "Title must not be empty"));
    }

    if !draft.price.is_finite() || draft.price <= 0.0 {
        errors.push(FieldError::new("price", "Price must be a positive number"));
    }

    if draft.category_id <= 0 {
        errors.push(FieldError::new(
            "categoryId",
            "Category id must be a positive integer",
        ));
    }

    errors
}
