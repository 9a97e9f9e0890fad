//! `/restaurants` handlers.
//!
//! Each handler rejects malformed or invalid input before a session is
//! acquired, then runs exactly one service operation on its own session.

use crate::domain::model::{RestaurantCreate, RestaurantRead, RestaurantUpdate};
use crate::domain::validation::Validate;
use crate::domain::RestaurantError;
use crate::transport::http::types::{json_422, path_422, AppState, ErrorResponse};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

const CREATE_SHAPE: &str = "{\"name\", \"type\", \"image\", \"location\", \"rating\", \"priceRange\", \"description\"?}";
const UPDATE_SHAPE: &str = "an object with any subset of the restaurant fields";

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "All restaurants", body = [RestaurantRead]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_restaurants_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<RestaurantRead>>, RestaurantError> {
    let mut session = state.service.session().await?;
    let restaurants = state.service.list(&mut session).await?;
    Ok(Json(restaurants))
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    params(
        ("id" = i64, Path, description = "Restaurant id")
    ),
    responses(
        (status = 200, description = "The restaurant", body = RestaurantRead),
        (status = 404, description = "Restaurant not found", body = ErrorResponse),
        (status = 422, description = "Malformed id", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_restaurant_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<RestaurantRead>, RestaurantError> {
    let Path(id) = id.map_err(path_422)?;
    let mut session = state.service.session().await?;
    let restaurant = state.service.get(&mut session, id).await?;
    Ok(Json(restaurant))
}

#[utoipa::path(
    post,
    path = "/restaurants",
    request_body = RestaurantCreate,
    responses(
        (status = 201, description = "Restaurant created", body = RestaurantRead),
        (status = 422, description = "Invalid body or field constraint violated", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_restaurant_handler(
    State(state): State<AppState>,
    request: Result<Json<RestaurantCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<RestaurantRead>), RestaurantError> {
    let Json(payload) = request.map_err(|e| json_422(e, CREATE_SHAPE))?;
    payload.validate()?;

    let mut session = state.service.session().await?;
    let created = state.service.create(&mut session, &payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    patch,
    path = "/restaurants/{id}",
    params(
        ("id" = i64, Path, description = "Restaurant id")
    ),
    request_body = RestaurantUpdate,
    responses(
        (status = 200, description = "Restaurant updated", body = RestaurantRead),
        (status = 404, description = "Restaurant not found", body = ErrorResponse),
        (status = 422, description = "Invalid body or field constraint violated", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_restaurant_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    request: Result<Json<RestaurantUpdate>, JsonRejection>,
) -> Result<Json<RestaurantRead>, RestaurantError> {
    let Path(id) = id.map_err(path_422)?;
    let Json(patch) = request.map_err(|e| json_422(e, UPDATE_SHAPE))?;
    patch.validate()?;

    let mut session = state.service.session().await?;
    let updated = state.service.update(&mut session, id, &patch).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    params(
        ("id" = i64, Path, description = "Restaurant id")
    ),
    responses(
        (status = 204, description = "Restaurant deleted"),
        (status = 404, description = "Restaurant not found", body = ErrorResponse),
        (status = 422, description = "Malformed id", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_restaurant_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, RestaurantError> {
    let Path(id) = id.map_err(path_422)?;
    let mut session = state.service.session().await?;
    state.service.delete(&mut session, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
