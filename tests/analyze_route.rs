// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Router-level tests for the analyze endpoint

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use mathsnap_node::{
    build_router, AppState, EquationRecognizer, ImagePayload, RecognitionError, VisionBackend,
};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;

const BOUNDARY: &str = "X-MATHSNAP-TEST-BOUNDARY";
const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

struct FixedBackend {
    latex: &'static str,
}

#[async_trait]
impl VisionBackend for FixedBackend {
    async fn generate(
        &self,
        _prompt: &str,
        _image: &ImagePayload,
    ) -> Result<String, RecognitionError> {
        Ok(self.latex.to_string())
    }
}

struct ThrottledBackend;

#[async_trait]
impl VisionBackend for ThrottledBackend {
    async fn generate(
        &self,
        _prompt: &str,
        _image: &ImagePayload,
    ) -> Result<String, RecognitionError> {
        Err(RecognitionError::RateLimited)
    }
}

fn state_with(backend: Arc<dyn VisionBackend>) -> AppState {
    AppState {
        recognizer: Some(Arc::new(EquationRecognizer::new(backend))),
    }
}

fn multipart_body(field_name: &str, file_name: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field_name}\"; \
             filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn analyze_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_analyze_happy_path() {
    let app = build_router(state_with(Arc::new(FixedBackend {
        latex: "```latex\ny=x^{2}\n```",
    })));

    let response = app
        .oneshot(analyze_request(multipart_body("image", "eq.png", PNG_MAGIC)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["latex"], "```latex\ny=x^{2}\n```");
    assert_eq!(body["graph_fn"], "x^(2)");
}

#[tokio::test]
async fn test_analyze_missing_image_field() {
    let app = build_router(state_with(Arc::new(FixedBackend { latex: "y=x" })));

    let response = app
        .oneshot(analyze_request(multipart_body("other", "eq.png", PNG_MAGIC)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "No image uploaded");
    assert!(body.get("success").is_none());
}

#[tokio::test]
async fn test_analyze_empty_filename() {
    let app = build_router(state_with(Arc::new(FixedBackend { latex: "y=x" })));

    let response = app
        .oneshot(analyze_request(multipart_body("image", "", PNG_MAGIC)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "No file selected");
}

#[tokio::test]
async fn test_analyze_unconfigured_node() {
    let app = build_router(AppState { recognizer: None });

    let response = app
        .oneshot(analyze_request(multipart_body("image", "eq.png", PNG_MAGIC)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Recognition model is not configured");
}

#[tokio::test]
async fn test_analyze_non_image_upload_is_processing_failure() {
    let app = build_router(state_with(Arc::new(FixedBackend { latex: "y=x" })));

    let response = app
        .oneshot(analyze_request(multipart_body(
            "image",
            "eq.txt",
            b"just text",
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("image"));
}

#[tokio::test(start_paused = true)]
async fn test_analyze_exhausted_retries_return_429() {
    let app = build_router(state_with(Arc::new(ThrottledBackend)));

    let response = app
        .oneshot(analyze_request(multipart_body("image", "eq.png", PNG_MAGIC)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("busy"));
}

#[tokio::test]
async fn test_health_reports_model_configuration() {
    let app = build_router(AppState { recognizer: None });

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model_configured"], false);
}

#[tokio::test]
async fn test_index_serves_front_end() {
    let app = build_router(AppState { recognizer: None });

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("MathSnap"));
}
