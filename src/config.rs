// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Node configuration, resolved once at startup from the environment

use std::env;

/// Immutable startup configuration
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Model-provider API key; `None` leaves the node unconfigured and
    /// every recognition request fails closed.
    pub api_key: Option<String>,
    pub bind_addr: String,
    pub api_port: u16,
}

impl NodeConfig {
    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8080);

        Self {
            api_key,
            bind_addr,
            api_port,
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.api_port)
    }
}
