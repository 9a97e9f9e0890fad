//! Errors surfaced by the restaurant service.
//!
//! These are transport-agnostic; the HTTP layer maps each variant to a
//! status code.

use crate::domain::validation::FieldError;

#[derive(Debug, thiserror::Error)]
pub enum RestaurantError {
    /// No record with the requested id.
    #[error("Restaurant not found")]
    NotFound { id: i64 },

    /// Payload violates a write-schema constraint. Raised before storage is touched.
    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    /// Anything else. Any in-flight transaction has already been rolled back.
    #[error("{message}")]
    Internal { message: String },
}

impl RestaurantError {
    pub fn internal(context: &str, err: impl std::fmt::Display) -> Self {
        RestaurantError::Internal {
            message: format!("{}: {}", context, err),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RestaurantError::NotFound { .. })
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{} {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<Vec<FieldError>> for RestaurantError {
    fn from(errors: Vec<FieldError>) -> Self {
        RestaurantError::Validation(errors)
    }
}
