use crate::domain::model::{PriceRange, RestaurantCreate, RestaurantRead, RestaurantUpdate};
use crate::domain::validation::FieldError;
use crate::transport::http::handlers::{health, restaurants};
use crate::transport::http::types::{AppState, ErrorResponse, HealthResponse};
use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Restaurant List API",
        description = "A simple API for managing restaurant data",
        version = "1.0.0"
    ),
    paths(
        health::healthcheck_handler,
        restaurants::list_restaurants_handler,
        restaurants::get_restaurant_handler,
        restaurants::create_restaurant_handler,
        restaurants::update_restaurant_handler,
        restaurants::delete_restaurant_handler
    ),
    components(schemas(
        RestaurantCreate,
        RestaurantUpdate,
        RestaurantRead,
        PriceRange,
        ErrorResponse,
        FieldError,
        HealthResponse
    )),
    tags((name = "restaurants"))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/restaurants",
            get(restaurants::list_restaurants_handler).post(restaurants::create_restaurant_handler),
        )
        .route(
            "/restaurants/:id",
            get(restaurants::get_restaurant_handler)
                .patch(restaurants::update_restaurant_handler)
                .delete(restaurants::delete_restaurant_handler),
        )
        .with_state(app_state)
}

/// CORS for the configured frontend origins. Credentials are allowed, so
/// methods and headers are mirrored from the request instead of `*`.
pub fn cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o).map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}
