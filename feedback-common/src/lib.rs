//! # Feedback Common Library
//!
//! Shared code for the feedback analyzer workspace:
//! - Feedback record and statistics wire types
//! - Sentiment classification labels
//! - Tiered configuration loading (CLI → ENV → TOML → default)
//! - Common error type

pub mod config;
pub mod error;
pub mod models;

pub use error::{Error, Result};
pub use models::{FeedbackRecord, FeedbackStats, Sentiment};
