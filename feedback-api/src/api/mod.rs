//! HTTP API handlers for feedback-api
//!
//! - `POST /api/feedback`: submit and analyse feedback
//! - `GET /api/feedback`: list feedback, optionally filtered
//! - `GET /api/stats`: sentiment distribution
//! - `GET /health`: liveness
//! - `GET /`: dashboard page

pub mod feedback;
pub mod health;
pub mod stats;
pub mod ui;

pub use feedback::feedback_routes;
pub use health::health_routes;
pub use stats::stats_routes;
pub use ui::ui_routes;
