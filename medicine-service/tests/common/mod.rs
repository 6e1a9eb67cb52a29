#![allow(dead_code)]

use medicine_service::config::{
    CorsConfig, HttpConfig, MedicineConfig, MongoConfig, ObservabilityConfig, StoreBackend,
};
use medicine_service::services::{InMemoryMedicineStore, MedicineStore};
use medicine_service::startup::Application;
use reqwest::Client;
use serde_json::Value;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;

pub const TEST_ORIGIN: &str = "http://localhost:3000";

pub fn test_config() -> MedicineConfig {
    MedicineConfig {
        common: CoreConfig { port: 0 },
        mongodb: MongoConfig {
            uri: std::env::var("TEST_MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database: format!("medicine_test_{}", uuid::Uuid::new_v4()),
            collection: "medicines".to_string(),
        },
        store: StoreBackend::Memory,
        cors: CorsConfig {
            allowed_origin: TEST_ORIGIN.to_string(),
        },
        http: HttpConfig {
            max_body_bytes: 4096,
        },
        observability: ObservabilityConfig {
            log_level: "debug".to_string(),
            otlp_endpoint: None,
        },
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: Client,
}

impl TestApp {
    /// Spawn against a fresh in-memory store.
    pub async fn spawn() -> Self {
        Self::spawn_with_store(Arc::new(InMemoryMedicineStore::new())).await
    }

    pub async fn spawn_with_store(store: Arc<dyn MedicineStore>) -> Self {
        let app = Application::build_with_store(test_config(), store)
            .await
            .expect("Failed to build test application");
        Self::start(app).await
    }

    pub async fn spawn_with_config(config: MedicineConfig) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        Self::start(app).await
    }

    async fn start(app: Application) -> Self {
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn add_medicine(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url("/add-medicine"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn update_medicine(&self, body: &Value) -> reqwest::Response {
        self.client
            .put(self.url("/update-medicine"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_medicine(&self, id: &str) -> reqwest::Response {
        self.client
            .delete(self.url(&format!("/delete-medicine?id={}", id)))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn list_medicines(&self) -> Vec<Value> {
        let response = self
            .client
            .get(self.url("/medicines"))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status().as_u16(), 200);
        response.json().await.expect("Failed to parse response")
    }

    /// Id of the first listed medicine with the given name.
    pub async fn id_of(&self, name: &str) -> String {
        self.list_medicines()
            .await
            .into_iter()
            .find(|m| m["name"] == name)
            .and_then(|m| m["_id"].as_str().map(str::to_string))
            .unwrap_or_else(|| panic!("medicine '{}' not listed", name))
    }
}
