// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Main server implementation

use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use fa_api_contract::MAX_IMAGE_BYTES;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Multipart framing overhead allowed on top of the largest accepted image
const UPLOAD_SLACK_BYTES: usize = 64 * 1024;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            enable_cors: true,
        }
    }
}

/// Mock prediction backend
pub struct Server {
    config: ServerConfig,
    app: Router,
}

impl Server {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        let app = Self::build_app(state, &config);
        Self { config, app }
    }

    /// Build the Axum application with routes and middleware
    pub fn build_app(state: AppState, config: &ServerConfig) -> Router {
        let api_routes = Router::new()
            .route("/health", get(handlers::health))
            .route("/status", get(handlers::yield_model_status))
            .route("/available-crops", get(handlers::available_crops))
            .route("/available-states", get(handlers::available_states))
            .route("/train", post(handlers::train))
            .route("/predict-yield", post(handlers::predict_yield))
            .route("/recommend-crops", post(handlers::recommend_crops))
            .route("/disease-detection/status", get(handlers::disease_model_status))
            .route("/disease-detection/load-model", post(handlers::load_disease_model))
            .route(
                "/disease-detection/supported-crops",
                get(handlers::disease_supported_crops),
            )
            .route("/disease-detection/predict", post(handlers::predict_disease));

        let app = Router::new()
            .nest("/api", api_routes)
            .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + UPLOAD_SLACK_BYTES))
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        if config.enable_cors {
            app.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        } else {
            app
        }
    }

    /// Bind the configured address and serve until the task is cancelled
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        self.run_on(listener).await
    }

    /// Serve on an already-bound listener
    pub async fn run_on(self, listener: TcpListener) -> anyhow::Result<()> {
        info!("mock backend listening on http://{}/api/", listener.local_addr()?);
        axum::serve(listener, self.app).await?;
        Ok(())
    }
}

/// Start a server on an ephemeral localhost port and return its API base URL
pub async fn spawn_ephemeral(
    state: AppState,
) -> anyhow::Result<(String, tokio::task::JoinHandle<anyhow::Result<()>>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let server = Server::new(
        ServerConfig {
            bind_addr: addr,
            ..Default::default()
        },
        state,
    );
    let handle = tokio::spawn(server.run_on(listener));
    Ok((format!("http://{}/api/", addr), handle))
}
