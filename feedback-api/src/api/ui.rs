//! Dashboard page
//!
//! A single static page (vanilla JS, no frameworks) with a submission form,
//! the sentiment dashboard and the feedback list. It only talks to the
//! public `/api/*` endpoints.

use axum::{
    http::header,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use crate::AppState;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET /
pub async fn index_page() -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "no-cache")],
        Html(INDEX_HTML),
    )
}

pub fn ui_routes() -> Router<AppState> {
    Router::new().route("/", get(index_page))
}
