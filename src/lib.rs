// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod gemini;
pub mod normalizer;
pub mod vision;

pub use api::{build_router, start_server, AnalyzeResponse, ApiError, AppState};
pub use config::NodeConfig;
pub use gemini::{EquationRecognizer, GeminiClient, RecognitionError, VisionBackend};
pub use normalizer::normalize;
pub use vision::{ImagePayload, VisionError};
