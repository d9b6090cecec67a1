// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP server: router, shared state, serve loop

use axum::{
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::analyze::analyze_handler;
use crate::config::NodeConfig;
use crate::gemini::EquationRecognizer;

/// Shared request-handler state. The recognizer is resolved once at startup
/// and read-only afterwards; `None` means the node runs unconfigured and
/// every analyze request fails with a model-unavailable error.
#[derive(Clone)]
pub struct AppState {
    pub recognizer: Option<Arc<EquationRecognizer>>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_configured: bool,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Static front-end
        .route("/", get(index_handler))
        // Liveness + configuration probe
        .route("/health", get(health_handler))
        // Recognition endpoint
        .route("/analyze", post(analyze_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(
    config: &NodeConfig,
    recognizer: Option<Arc<EquationRecognizer>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState { recognizer };
    let app = build_router(state);

    let addr: SocketAddr = config.listen_addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("MathSnap node listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

async fn health_handler(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model_configured: state.recognizer.is_some(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_builds_without_recognizer() {
        let _ = build_router(AppState { recognizer: None });
    }

    #[test]
    fn test_health_response_shape() {
        let health = HealthResponse {
            status: "ok".to_string(),
            model_configured: false,
        };
        let json = serde_json::to_value(&health).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["model_configured"], false);
    }
}
