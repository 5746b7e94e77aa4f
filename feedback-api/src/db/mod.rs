//! Database access for feedback-api
//!
//! A single SQLite `feedback` table, created idempotently at start-up.

pub mod feedback;

pub use feedback::{
    count_by_sentiment, count_feedback, insert_feedback, list_feedback, load_stats,
    FeedbackFilter, NewFeedback,
};

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Initialize database connection pool
///
/// Accepts any sqlx SQLite URL (`sqlite://path/to/file.db`, `sqlite::memory:`).
/// The database file is created if missing and the schema is ensured.
pub async fn init_database_pool(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid database URL: {}", database_url))?
        .create_if_missing(true);

    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database directory {}", parent.display()))?;
        }
    }

    tracing::debug!("Connecting to database: {}", options.get_filename().display());

    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Create the feedback table and its indexes if they don't exist
pub async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS feedback (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            original_text TEXT NOT NULL,
            translated_text TEXT,
            sentiment TEXT,
            language TEXT,
            product TEXT
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create feedback table")?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_feedback_product ON feedback(product)")
        .execute(pool)
        .await
        .context("Failed to create product index")?;

    tracing::info!("Database tables initialized (feedback)");

    Ok(())
}
