// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use mathsnap_node::{
    api::start_server,
    config::NodeConfig,
    gemini::{EquationRecognizer, GeminiClient},
};
use std::{env, sync::Arc};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    info!("Starting MathSnap node...");

    let config = NodeConfig::from_env();

    // Resolve the recognition model once; the handle is read-only after
    // this point. Without a key or a usable model the node still serves,
    // but every analyze request fails closed.
    let recognizer = match config.api_key.as_deref() {
        Some(key) => match GeminiClient::discover(key).await {
            Ok(client) => {
                info!("Recognition model ready: {}", client.model_name());
                Some(Arc::new(EquationRecognizer::new(Arc::new(client))))
            }
            Err(e) => {
                warn!("Model discovery failed, serving unconfigured: {}", e);
                None
            }
        },
        None => {
            warn!("GEMINI_API_KEY not set, serving unconfigured");
            None
        }
    };

    start_server(&config, recognizer)
        .await
        .map_err(|e| anyhow::anyhow!("server error: {}", e))?;

    Ok(())
}
