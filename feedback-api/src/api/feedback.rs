//! Feedback submission and listing endpoints

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use feedback_common::FeedbackRecord;
use serde::Deserialize;
use tracing::info;

use crate::db::{self, FeedbackFilter, NewFeedback};
use crate::{ApiError, ApiResult, AppState};

/// Request payload for submitting feedback
#[derive(Debug, Deserialize)]
pub struct SubmitFeedbackRequest {
    /// Feedback text in any language
    pub text: String,
    /// Optional product name used for filtering
    #[serde(default)]
    pub product: Option<String>,
}

/// Query parameters for listing feedback
#[derive(Debug, Default, Deserialize)]
pub struct ListFeedbackQuery {
    pub product: Option<String>,
    pub language: Option<String>,
}

impl ListFeedbackQuery {
    /// Empty parameters (`?product=`) mean "no filter"
    fn into_filter(self) -> FeedbackFilter {
        FeedbackFilter {
            product: non_blank(self.product),
            language: non_blank(self.language),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// POST /api/feedback
///
/// **Request:** `{"text": "El producto es excelente", "product": "phone"}`
/// **Response (201):** the stored record with its assigned `id`
///
/// **Behavior:**
/// 1. Reject missing or empty text (400)
/// 2. Analyse the text (language, English translation, sentiment); analysis
///    failures fall back to `unknown` / original text / `neutral`
/// 3. Insert the record and return it
///
/// `text` and `product` are stored exactly as sent.
pub async fn submit_feedback(
    State(state): State<AppState>,
    payload: Result<Json<SubmitFeedbackRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<FeedbackRecord>)> {
    let Json(payload) = payload?;

    if payload.text.is_empty() {
        return Err(ApiError::BadRequest("Feedback text cannot be empty".to_string()));
    }

    let outcome = state.analyzer.analyze(&payload.text).await;
    let source = outcome.source();

    let new_feedback = NewFeedback::new(
        payload.text,
        payload.product,
        outcome.into_analysis(),
    );

    // Session is checked out only after the model call so a slow model does
    // not hold a pooled connection.
    let mut conn = state.db.acquire().await?;
    let record = db::insert_feedback(&mut conn, &new_feedback).await?;

    info!(
        id = record.id,
        language = record.language.as_deref().unwrap_or(""),
        sentiment = record.sentiment.as_deref().unwrap_or(""),
        analysis = source,
        "Feedback stored"
    );

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/feedback?product=&language=
///
/// Returns every matching record, newest first. Both filters are optional and
/// combine with AND.
pub async fn list_feedback(
    State(state): State<AppState>,
    query: Result<Query<ListFeedbackQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<FeedbackRecord>>> {
    let Query(query) = query?;
    let filter = query.into_filter();

    let mut conn = state.db.acquire().await?;
    let records = db::list_feedback(&mut conn, &filter).await?;

    Ok(Json(records))
}

pub fn feedback_routes() -> Router<AppState> {
    Router::new().route("/api/feedback", get(list_feedback).post(submit_feedback))
}
