// src/bin/api_server.rs

use restaurant_list_api::infra::{config, telemetry};
use restaurant_list_api::transport;
use restaurant_list_api::{RestaurantService, StorageGateway};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::load_dotenv();
    telemetry::init_tracing();

    // --- Storage Gateway Initialization ---
    let database_url = config::database_url();
    tracing::info!("initializing storage gateway");
    let gateway = Arc::new(StorageGateway::connect(&database_url, config::max_connections()).await?);
    gateway.initialize_schema().await?;
    let seeded = gateway.seed_if_empty().await?;
    if seeded == 0 {
        tracing::info!(rows = gateway.count().await?, "using existing restaurant data");
    }

    // --- Service Initialization ---
    let service = RestaurantService::new(gateway.clone());
    let app_state = transport::http::AppState::new(service);

    // --- API Server Initialization ---
    let cors = transport::http::cors_layer(&config::cors_allowed_origins())?;
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let bind_addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "API server listening");
    tracing::info!("Swagger UI available at /docs");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    gateway.close().await;
    tracing::info!("graceful shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received (Ctrl+C)");
}
