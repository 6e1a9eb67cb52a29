//! Runs against a real MongoDB only when `TEST_MONGODB_URI` is set.

mod common;

use common::{test_config, TestApp};
use medicine_service::config::StoreBackend;
use serde_json::json;

fn mongo_uri() -> Option<String> {
    std::env::var("TEST_MONGODB_URI").ok()
}

#[tokio::test]
async fn mongo_backed_lifecycle() {
    let Some(uri) = mongo_uri() else {
        eprintln!("TEST_MONGODB_URI not set; skipping MongoDB test");
        return;
    };

    let mut config = test_config();
    config.store = StoreBackend::Mongo;
    config.mongodb.uri = uri.clone();
    let db_name = config.mongodb.database.clone();

    let app = TestApp::spawn_with_config(config).await;

    let response = app
        .add_medicine(&json!({"name": "Aspirin", "quantity": 10, "price": 2.5}))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let id = app.id_of("Aspirin").await;
    assert_eq!(
        app.list_medicines().await,
        vec![json!({"_id": id, "name": "Aspirin", "quantity": 10, "price": 2.5})]
    );

    let response = app
        .update_medicine(&json!({"id": id, "name": "Aspirin", "quantity": 5}))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let medicine = &app.list_medicines().await[0];
    assert_eq!(medicine["quantity"], 5);
    assert_eq!(medicine["price"], 2.5);

    let response = app.delete_medicine(&id).await;
    assert_eq!(response.status().as_u16(), 200);
    assert!(app.list_medicines().await.is_empty());

    let client = mongodb::Client::with_uri_str(&uri)
        .await
        .expect("Failed to connect for cleanup");
    client.database(&db_name).drop(None).await.ok();
}
