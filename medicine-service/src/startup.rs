//! Application startup and lifecycle management.

use crate::config::{MedicineConfig, StoreBackend};
use crate::handlers;
use crate::services::{InMemoryMedicineStore, MedicineStore, MongoMedicineStore};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, Request},
    middleware::from_fn,
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics_middleware, preflight_middleware, request_id_middleware, security_headers_middleware,
    REQUEST_ID_HEADER,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: MedicineConfig,
    pub store: Arc<dyn MedicineStore>,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
    store: Arc<dyn MedicineStore>,
}

impl Application {
    /// Build the application, connecting to the configured store.
    pub async fn build(config: MedicineConfig) -> Result<Self, AppError> {
        let store: Arc<dyn MedicineStore> = match config.store {
            StoreBackend::Mongo => Arc::new(
                MongoMedicineStore::connect(
                    &config.mongodb.uri,
                    &config.mongodb.database,
                    &config.mongodb.collection,
                )
                .await
                .map_err(|e| {
                    tracing::error!("Failed to connect to MongoDB: {}", e);
                    e
                })?,
            ),
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory medicine store; data is lost on restart");
                Arc::new(InMemoryMedicineStore::new())
            }
        };

        Self::build_with_store(config, store).await
    }

    /// Build the application around an already constructed store.
    pub async fn build_with_store(
        config: MedicineConfig,
        store: Arc<dyn MedicineStore>,
    ) -> Result<Self, AppError> {
        let state = AppState {
            config: config.clone(),
            store: store.clone(),
        };
        let router = build_router(state)?;

        let addr = config.common.socket_addr();
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Medicine service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
            store,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until ctrl-c or SIGTERM, then release the store.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let result = axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await;

        self.store.close().await;

        if let Err(e) = &result {
            tracing::error!("HTTP server error: {}", e);
        }
        result
    }
}

/// Assemble routes and middleware. Outermost layer is listed last.
pub fn build_router(state: AppState) -> Result<Router, AppError> {
    let allowed_origin = state
        .config
        .cors
        .allowed_origin
        .parse::<HeaderValue>()
        .map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "Invalid CORS origin '{}': {}",
                state.config.cors.allowed_origin,
                e
            ))
        })?;

    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let body_limit = state.config.http.max_body_bytes;

    let router = handlers::routes()
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
        .layer(from_fn(preflight_middleware));

    Ok(router)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
