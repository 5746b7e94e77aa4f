//! Sentiment statistics endpoint

use axum::{extract::State, routing::get, Json, Router};
use feedback_common::FeedbackStats;

use crate::{db, ApiResult, AppState};

/// GET /api/stats
///
/// **Response:** `{"total_feedback": 4, "positive_percentage": 50.0, ...}`
///
/// Percentages are rounded to two decimals and are all 0 when nothing has
/// been submitted yet.
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<FeedbackStats>> {
    let mut conn = state.db.acquire().await?;
    let stats = db::load_stats(&mut conn).await?;
    Ok(Json(stats))
}

pub fn stats_routes() -> Router<AppState> {
    Router::new().route("/api/stats", get(get_stats))
}
