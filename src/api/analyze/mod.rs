// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Analyze endpoint: image upload in, LaTeX + plottable expression out

pub mod handler;
pub mod response;

pub use handler::analyze_handler;
pub use response::AnalyzeResponse;
