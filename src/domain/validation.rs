//! Field constraints for the write schemas.
//!
//! Validation runs at the transport boundary, before any session is
//! acquired. Errors are collected per field rather than failing on the first.

use crate::domain::model::{RestaurantCreate, RestaurantUpdate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const NAME_MAX: usize = 120;
pub const TYPE_MAX: usize = 80;
pub const IMAGE_MIN: usize = 5;
pub const LOCATION_MAX: usize = 80;
pub const DESCRIPTION_MAX: usize = 400;
pub const RATING_MIN: i64 = 0;
pub const RATING_MAX: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

pub type ValidationResult = Result<(), Vec<FieldError>>;

pub trait Validate {
    fn validate(&self) -> ValidationResult;
}

impl Validate for RestaurantCreate {
    fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();
        check_bounded(&mut errors, "name", &self.name, 1, Some(NAME_MAX));
        check_bounded(&mut errors, "type", &self.cuisine_type, 1, Some(TYPE_MAX));
        check_bounded(&mut errors, "image", &self.image, IMAGE_MIN, None);
        check_bounded(&mut errors, "location", &self.location, 1, Some(LOCATION_MAX));
        check_rating(&mut errors, self.rating);
        if let Some(description) = &self.description {
            check_bounded(&mut errors, "description", description, 0, Some(DESCRIPTION_MAX));
        }
        finish(errors)
    }
}

impl Validate for RestaurantUpdate {
    fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();
        check_present(&mut errors, "name", &self.name, |e, v| {
            check_bounded(e, "name", v, 1, Some(NAME_MAX))
        });
        check_present(&mut errors, "type", &self.cuisine_type, |e, v| {
            check_bounded(e, "type", v, 1, Some(TYPE_MAX))
        });
        check_present(&mut errors, "image", &self.image, |e, v| {
            check_bounded(e, "image", v, IMAGE_MIN, None)
        });
        check_present(&mut errors, "location", &self.location, |e, v| {
            check_bounded(e, "location", v, 1, Some(LOCATION_MAX))
        });
        check_present(&mut errors, "rating", &self.rating, |e, v| check_rating(e, *v));
        check_present(&mut errors, "priceRange", &self.price_range, |_, _| {});
        // Nullable: `Some(None)` clears it.
        if let Some(Some(description)) = &self.description {
            check_bounded(&mut errors, "description", description, 0, Some(DESCRIPTION_MAX));
        }
        finish(errors)
    }
}

/// For a required column: absent is fine, explicit `null` is not.
fn check_present<T>(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: &Option<Option<T>>,
    check: impl FnOnce(&mut Vec<FieldError>, &T),
) {
    match value {
        None => {}
        Some(None) => errors.push(FieldError::new(field, "may not be null")),
        Some(Some(v)) => check(errors, v),
    }
}

fn check_bounded(errors: &mut Vec<FieldError>, field: &str, value: &str, min: usize, max: Option<usize>) {
    let len = value.chars().count();
    if len < min {
        let msg = if min == 1 {
            "must not be empty".to_string()
        } else {
            format!("must be at least {} characters", min)
        };
        errors.push(FieldError::new(field, msg));
    }
    if let Some(max) = max {
        if len > max {
            errors.push(FieldError::new(field, format!("must be {} characters or less", max)));
        }
    }
}

fn check_rating(errors: &mut Vec<FieldError>, rating: i64) {
    if !(RATING_MIN..=RATING_MAX).contains(&rating) {
        errors.push(FieldError::new(
            "rating",
            format!("must be between {} and {}", RATING_MIN, RATING_MAX),
        ));
    }
}

fn finish(errors: Vec<FieldError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
