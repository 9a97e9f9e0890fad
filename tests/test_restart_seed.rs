//! File-backed store across a simulated restart, plus one end-to-end pass
//! over a real TCP listener.

mod common;

use restaurant_list_api::transport::http::{create_router, AppState};
use restaurant_list_api::{RestaurantRead, RestaurantService, RestaurantUpdate, StorageGateway};
use serde_json::json;
use std::sync::Arc;

fn database_url(dir: &tempfile::TempDir) -> String {
    format!("sqlite://{}", dir.path().join("restaurants.db").display())
}

#[tokio::test]
async fn restart_keeps_data_and_does_not_reseed() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let url = database_url(&dir);

    // First boot: empty file, seeded.
    let gateway = StorageGateway::connect(&url, 2).await?;
    gateway.initialize_schema().await?;
    assert_eq!(gateway.seed_if_empty().await?, 2);

    let service = RestaurantService::new(Arc::new(gateway.clone()));
    let mut session = service.session().await?;
    let kept = service.create(&mut session, &common::payload("Survivor")).await?;
    drop(session);
    gateway.close().await;

    // Second boot against the same file.
    let gateway = StorageGateway::connect(&url, 2).await?;
    gateway.initialize_schema().await?;
    assert_eq!(gateway.seed_if_empty().await?, 0);
    assert_eq!(gateway.count().await?, 3);

    let service = RestaurantService::new(Arc::new(gateway.clone()));
    let mut session = service.session().await?;
    assert_eq!(service.get(&mut session, kept.id).await?, kept);
    drop(session);
    gateway.close().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn end_to_end_over_http() -> anyhow::Result<()> {
    let gateway = common::seeded_gateway().await;
    let router = create_router(AppState::new(RestaurantService::new(gateway)));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let server = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let base_url = format!("http://{}", addr);
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?;

    let created: RestaurantRead = client
        .post(format!("{}/restaurants", base_url))
        .json(&json!({
            "name": "House of Prime Rib",
            "type": "Steakhouse",
            "image": "https://example.com/prime-rib.jpg",
            "location": "San Francisco, CA",
            "rating": 4,
            "priceRange": "$$$"
        }))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let patched = client
        .patch(format!("{}/restaurants/{}", base_url, created.id))
        .json(&json!({ "rating": 5 }))
        .send()
        .await?;
    assert_eq!(patched.status(), reqwest::StatusCode::OK);
    let patched: RestaurantRead = patched.json().await?;
    assert_eq!(patched.rating, 5.0);
    assert_eq!(patched.name, created.name);

    let all: Vec<RestaurantRead> = client
        .get(format!("{}/restaurants", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(all.len(), 3);

    let deleted = client
        .delete(format!("{}/restaurants/{}", base_url, created.id))
        .send()
        .await?;
    assert_eq!(deleted.status(), reqwest::StatusCode::NO_CONTENT);

    let missing = client
        .get(format!("{}/restaurants/{}", base_url, created.id))
        .send()
        .await?;
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);

    server.abort();
    let _ = server.await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_patches_on_one_row_all_succeed() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let gateway = StorageGateway::connect(&database_url(&dir), 8).await?;
    gateway.initialize_schema().await?;
    gateway.seed_if_empty().await?;

    let service = Arc::new(RestaurantService::new(Arc::new(gateway.clone())));
    let mut tasks = Vec::new();
    for i in 0..8 {
        let service = service.clone();
        tasks.push(tokio::spawn(async move {
            let mut session = service.session().await?;
            let patch = RestaurantUpdate {
                rating: Some(Some(i % 6)),
                location: Some(Some(format!("Writer {}", i))),
                ..Default::default()
            };
            service.update(&mut session, 1, &patch).await
        }));
    }
    for task in tasks {
        let updated = task.await??;
        assert_eq!(updated.id, 1);
    }

    let mut session = service.session().await?;
    let last = service.get(&mut session, 1).await?;
    assert!(last.location.starts_with("Writer "));
    drop(session);
    gateway.close().await;
    Ok(())
}
