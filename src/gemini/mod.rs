// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Hosted vision-model integration: client, model selection, retry policy

pub mod client;
pub mod error;
pub mod models;
pub mod recognizer;

pub use client::GeminiClient;
pub use error::RecognitionError;
pub use models::{select_model, ModelInfo, ModelList};
pub use recognizer::{EquationRecognizer, VisionBackend, RECOGNITION_PROMPT};
