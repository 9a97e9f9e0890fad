use crate::domain::RestaurantError;
use crate::transport::http::types::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

impl RestaurantError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestaurantError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestaurantError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RestaurantError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RestaurantError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            RestaurantError::NotFound { id } => {
                tracing::debug!(id, "restaurant not found");
                ErrorResponse {
                    detail: "Restaurant not found".to_string(),
                    errors: Vec::new(),
                }
            }
            RestaurantError::Validation(errors) => ErrorResponse {
                detail: "Validation failed".to_string(),
                errors,
            },
            RestaurantError::Internal { message } => {
                tracing::error!(error = %message, "internal error");
                ErrorResponse {
                    detail: message,
                    errors: Vec::new(),
                }
            }
        };
        (status, Json(body)).into_response()
    }
}
