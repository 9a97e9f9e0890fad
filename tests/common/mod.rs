//! Shared fixtures: in-memory stores and a oneshot request helper.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use restaurant_list_api::transport::http::{create_router, AppState};
use restaurant_list_api::{PriceRange, RestaurantCreate, RestaurantService, StorageGateway};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tower::ServiceExt;

/// Fresh in-memory store with the schema created but no rows.
pub async fn empty_gateway() -> Arc<StorageGateway> {
    let gateway = StorageGateway::connect_in_memory().await.unwrap();
    gateway.initialize_schema().await.unwrap();
    Arc::new(gateway)
}

/// Fresh in-memory store holding the two sample restaurants.
pub async fn seeded_gateway() -> Arc<StorageGateway> {
    let gateway = empty_gateway().await;
    assert_eq!(gateway.seed_if_empty().await.unwrap(), 2);
    gateway
}

pub async fn seeded_app() -> (Router, Arc<StorageGateway>) {
    let gateway = seeded_gateway().await;
    let state = AppState::new(RestaurantService::new(gateway.clone()));
    (create_router(state), gateway)
}

pub fn payload(name: &str) -> RestaurantCreate {
    RestaurantCreate {
        name: name.to_string(),
        cuisine_type: "Italian".to_string(),
        image: "https://example.com/pasta.jpg".to_string(),
        location: "Oakland, CA".to_string(),
        rating: 3,
        description: Some("Hand-made pasta.".to_string()),
        price_range: PriceRange::Medium,
    }
}

/// Sends one request through the router. Empty response bodies come back as `Null`.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<JsonValue>) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
