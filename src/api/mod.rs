// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod analyze;
pub mod errors;
pub mod server;

pub use analyze::{analyze_handler, AnalyzeResponse};
pub use errors::ApiError;
pub use server::{build_router, start_server, AppState};
