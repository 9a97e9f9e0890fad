use crate::app::RestaurantService;
use crate::domain::validation::FieldError;
use crate::domain::RestaurantError;
use axum::extract::rejection::{JsonRejection, PathRejection};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RestaurantService>,
}

impl AppState {
    pub fn new(service: RestaurantService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Body of every non-2xx response.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
    /// Per-field failures; only present on 422 responses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    pub message: String,
}

pub fn json_422(err: JsonRejection, expected: &str) -> RestaurantError {
    RestaurantError::Validation(vec![FieldError {
        field: "body".to_string(),
        message: format!("Invalid JSON body: {} (expected: {})", err.body_text(), expected),
    }])
}

pub fn path_422(err: PathRejection) -> RestaurantError {
    RestaurantError::Validation(vec![FieldError {
        field: "id".to_string(),
        message: format!("Invalid path parameter: {}", err.body_text()),
    }])
}
