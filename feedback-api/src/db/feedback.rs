//! Feedback table operations
//!
//! Records are inserted once and never updated or deleted. All functions take
//! the caller's connection so one request works on one pooled session.

use feedback_common::{FeedbackRecord, FeedbackStats, Result, Sentiment};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::analysis::Analysis;

const RECORD_COLUMNS: &str = "id, original_text, translated_text, sentiment, language, product";

/// A feedback row before it has an identifier
#[derive(Debug, Clone, PartialEq)]
pub struct NewFeedback {
    pub original_text: String,
    pub translated_text: String,
    pub sentiment: Sentiment,
    pub language: String,
    pub product: Option<String>,
}

impl NewFeedback {
    /// Combine submitted text with its analysis; derived fields come as a unit
    pub fn new(original_text: String, product: Option<String>, analysis: Analysis) -> Self {
        Self {
            original_text,
            translated_text: analysis.translated_text,
            sentiment: analysis.sentiment,
            language: analysis.language,
            product,
        }
    }
}

/// Optional list filters, combined with AND
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackFilter {
    pub product: Option<String>,
    pub language: Option<String>,
}

/// Insert a record and return it with its assigned identifier
pub async fn insert_feedback(conn: &mut SqliteConnection, feedback: &NewFeedback) -> Result<FeedbackRecord> {
    let record = sqlx::query_as::<_, FeedbackRecord>(&format!(
        "INSERT INTO feedback (original_text, translated_text, sentiment, language, product)
         VALUES (?, ?, ?, ?, ?)
         RETURNING {}",
        RECORD_COLUMNS
    ))
    .bind(&feedback.original_text)
    .bind(&feedback.translated_text)
    .bind(feedback.sentiment.as_str())
    .bind(&feedback.language)
    .bind(&feedback.product)
    .fetch_one(&mut *conn)
    .await?;

    Ok(record)
}

/// List records matching the filter, newest (highest id) first
pub async fn list_feedback(conn: &mut SqliteConnection, filter: &FeedbackFilter) -> Result<Vec<FeedbackRecord>> {
    let mut query: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {} FROM feedback", RECORD_COLUMNS));

    let mut has_where = false;
    if let Some(product) = &filter.product {
        query.push(" WHERE product = ").push_bind(product.clone());
        has_where = true;
    }
    if let Some(language) = &filter.language {
        query.push(if has_where { " AND " } else { " WHERE " });
        query.push("language = ").push_bind(language.clone());
    }
    query.push(" ORDER BY id DESC");

    let records = query
        .build_query_as::<FeedbackRecord>()
        .fetch_all(&mut *conn)
        .await?;

    Ok(records)
}

/// Total number of stored records
pub async fn count_feedback(conn: &mut SqliteConnection) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM feedback")
        .fetch_one(&mut *conn)
        .await?;
    Ok(count)
}

/// Number of records with the given sentiment
pub async fn count_by_sentiment(conn: &mut SqliteConnection, sentiment: Sentiment) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM feedback WHERE sentiment = ?")
        .bind(sentiment.as_str())
        .fetch_one(&mut *conn)
        .await?;
    Ok(count)
}

/// Sentiment distribution over all records
pub async fn load_stats(conn: &mut SqliteConnection) -> Result<FeedbackStats> {
    let total = count_feedback(conn).await?;
    if total == 0 {
        return Ok(FeedbackStats::from_counts(0, 0, 0, 0));
    }

    let positive = count_by_sentiment(conn, Sentiment::Positive).await?;
    let negative = count_by_sentiment(conn, Sentiment::Negative).await?;
    let neutral = count_by_sentiment(conn, Sentiment::Neutral).await?;

    Ok(FeedbackStats::from_counts(total, positive, negative, neutral))
}
