//! Feedback record, sentiment labels and aggregate statistics
//!
//! These are the wire types returned by the HTTP API and the row shape of
//! the `feedback` table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Sentiment label assigned by the analysis model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Every label, in the order used by the statistics endpoint
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    /// Label as stored in the `sentiment` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = Error;

    /// Case-insensitive, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            other => Err(Error::InvalidInput(format!("Unknown sentiment label: {other:?}"))),
        }
    }
}

/// A stored feedback submission
///
/// `translated_text`, `sentiment` and `language` are derived by the analysis
/// step. They are written together, either from a real model answer or from
/// the fixed fallback, and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct FeedbackRecord {
    pub id: i64,
    pub original_text: String,
    pub translated_text: Option<String>,
    pub sentiment: Option<String>,
    pub language: Option<String>,
    pub product: Option<String>,
}

/// Response body of `GET /api/stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackStats {
    pub total_feedback: i64,
    pub positive_percentage: f64,
    pub negative_percentage: f64,
    pub neutral_percentage: f64,
}

impl FeedbackStats {
    /// Build statistics from raw counts
    ///
    /// Percentages are rounded to two decimal places, ties to even. With no
    /// feedback at all every percentage is zero.
    pub fn from_counts(total: i64, positive: i64, negative: i64, neutral: i64) -> Self {
        Self {
            total_feedback: total,
            positive_percentage: percentage(positive, total),
            negative_percentage: percentage(negative, total),
            neutral_percentage: percentage(neutral, total),
        }
    }
}

fn percentage(count: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    let raw = count as f64 / total as f64 * 100.0;
    // Halves go to the even neighbour: 3.125 -> 3.12, 15.625 -> 15.62
    (raw * 100.0).round_ties_even() / 100.0
}
