//! Shared test utilities for feedback-api integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request};
use feedback_api::analysis::{AnalysisError, Analyzer, TextGenerator};
use feedback_api::{build_router, AppState};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// In-memory database with the feedback schema
///
/// A single connection that never expires, so every query sees the same
/// in-memory database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Should open in-memory database");
    feedback_api::db::init_tables(&pool)
        .await
        .expect("Should create schema");
    pool
}

/// Router over the given pool and generator
pub fn test_app(pool: SqlitePool, generator: Arc<dyn TextGenerator>) -> axum::Router {
    build_router(AppState::new(pool, Analyzer::new(generator)))
}

/// Answers like a well-behaved model, picking sentiment from keywords
///
/// "love" → positive, "hate" → negative, anything else → neutral. Answers
/// are wrapped in a ```json fence the way real models often do.
pub struct KeywordGenerator {
    pub calls: AtomicUsize,
}

impl KeywordGenerator {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl TextGenerator for KeywordGenerator {
    fn name(&self) -> &'static str {
        "keyword"
    }

    async fn generate(&self, prompt: &str) -> Result<String, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let text = prompt.rsplit("Text: ").next().unwrap_or_default();
        let sentiment = if text.contains("love") {
            "positive"
        } else if text.contains("hate") {
            "negative"
        } else {
            "neutral"
        };
        let language = if text.contains("producto") { "Spanish" } else { "English" };

        Ok(format!(
            "```json\n{{\"language\": \"{}\", \"translated_text\": \"translated feedback\", \"sentiment\": \"{}\"}}\n```",
            language, sentiment
        ))
    }
}

/// Always fails like an unreachable model
pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, AnalysisError> {
        Err(AnalysisError::Network("connection refused".to_string()))
    }
}

/// Returns a fixed raw answer
pub struct FixedGenerator(pub String);

#[async_trait]
impl TextGenerator for FixedGenerator {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, AnalysisError> {
        Ok(self.0.clone())
    }
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Extract JSON body from response
pub async fn extract_json(body: Body) -> Value {
    let bytes = body
        .collect()
        .await
        .expect("Should read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}
