//! feedback-api library interface
//!
//! Multilingual customer feedback ingestion: each submission is sent to a
//! text-generation model for language detection, English translation and
//! sentiment classification, then stored in SQLite and served back through
//! list and statistics endpoints.

pub mod analysis;
pub mod api;
pub mod db;
pub mod error;

pub use crate::error::{ApiError, ApiResult};

use analysis::Analyzer;
use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
///
/// Holds only immutable handles; each request checks out its own database
/// connection from the pool.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Feedback analysis adapter
    pub analyzer: Arc<Analyzer>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, analyzer: Analyzer) -> Self {
        Self {
            db,
            analyzer: Arc::new(analyzer),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::ui_routes())
        .merge(api::feedback_routes())
        .merge(api::stats_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
