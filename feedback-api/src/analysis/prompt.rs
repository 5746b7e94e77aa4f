//! Prompt construction and answer parsing
//!
//! The model is asked for a bare JSON object with exactly the keys
//! `language`, `translated_text` and `sentiment`. Its answer is treated as
//! untrusted input: markdown fences are stripped, the object must carry
//! exactly those three string keys, and the sentiment must be one of the
//! known labels.

use feedback_common::Sentiment;
use serde::Deserialize;

use super::{Analysis, AnalysisError};

/// Build the single instruction prompt for one piece of feedback
pub fn build_prompt(text: &str) -> String {
    // JSON-quoting keeps quotes and newlines in the feedback from breaking
    // out of the text field.
    let quoted = serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text));

    format!(
        r#"Analyze the following customer feedback text. Respond with only a valid JSON object with exactly three keys: "language", "translated_text" and "sentiment".
1. "language": the detected language of the text.
2. "translated_text": the text translated into English.
3. "sentiment": the sentiment of the text, exactly one of "positive", "negative" or "neutral".

Text: {quoted}"#
    )
}

/// Remove a surrounding markdown code fence (```` ```json ... ``` ````)
pub fn strip_code_fences(raw: &str) -> &str {
    let mut body = raw.trim();

    if let Some(rest) = body.strip_prefix("```") {
        body = rest
            .strip_prefix("json")
            .or_else(|| rest.strip_prefix("JSON"))
            .unwrap_or(rest)
            .trim_start();
    }
    if let Some(rest) = body.strip_suffix("```") {
        body = rest.trim_end();
    }

    body.trim()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAnalysis {
    language: String,
    translated_text: String,
    sentiment: String,
}

/// Parse the model's raw answer into an [`Analysis`]
pub fn parse_analysis(raw: &str) -> Result<Analysis, AnalysisError> {
    let body = strip_code_fences(raw);
    if body.is_empty() {
        return Err(AnalysisError::Parse("answer is empty".to_string()));
    }

    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| AnalysisError::Parse(e.to_string()))?;
    if !value.is_object() {
        return Err(AnalysisError::Schema(format!("expected a JSON object, got {}", value)));
    }
    let parsed: RawAnalysis =
        serde_json::from_value(value).map_err(|e| AnalysisError::Schema(e.to_string()))?;

    let sentiment: Sentiment = parsed
        .sentiment
        .parse()
        .map_err(|e: feedback_common::Error| AnalysisError::Schema(e.to_string()))?;

    if parsed.language.trim().is_empty() {
        return Err(AnalysisError::Schema("language is blank".to_string()));
    }
    if parsed.translated_text.trim().is_empty() {
        return Err(AnalysisError::Schema("translated_text is blank".to_string()));
    }

    Ok(Analysis {
        language: parsed.language.trim().to_string(),
        translated_text: parsed.translated_text,
        sentiment,
    })
}
