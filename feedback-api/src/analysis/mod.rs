//! Feedback analysis adapter
//!
//! Sends one prompt per submission to an external text-generation model and
//! turns the answer into an [`Analysis`]: detected language, English
//! translation and sentiment.
//!
//! [`Analyzer::analyze`] never fails. Transport errors, HTTP errors, missing
//! configuration and malformed or out-of-schema answers are all logged and
//! replaced by the fixed fallback from [`Analysis::fallback`].

pub mod gemini;
pub mod prompt;

use async_trait::async_trait;
use feedback_common::Sentiment;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

pub use gemini::GeminiClient;
pub use prompt::{build_prompt, parse_analysis, strip_code_fences};

/// Language reported when the model could not be consulted
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Analysis failures. These never leave the adapter.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Analysis not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Model returned no text: {0}")]
    EmptyResponse(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unexpected response shape: {0}")]
    Schema(String),
}

/// Result of analysing one piece of feedback
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub language: String,
    pub translated_text: String,
    pub sentiment: Sentiment,
}

impl Analysis {
    /// Fixed value used whenever the model cannot produce a valid answer
    pub fn fallback(original_text: &str) -> Self {
        Self {
            language: UNKNOWN_LANGUAGE.to_string(),
            translated_text: original_text.to_string(),
            sentiment: Sentiment::Neutral,
        }
    }
}

/// Analysis plus where it came from
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// The model answered with a well-formed result
    Analyzed(Analysis),
    /// The model could not be used; `reason` is the logged cause
    Fallback { analysis: Analysis, reason: String },
}

impl AnalysisOutcome {
    pub fn into_analysis(self) -> Analysis {
        match self {
            AnalysisOutcome::Analyzed(analysis) => analysis,
            AnalysisOutcome::Fallback { analysis, .. } => analysis,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, AnalysisOutcome::Fallback { .. })
    }

    /// Short label for logs ("model" or "fallback")
    pub fn source(&self) -> &'static str {
        if self.is_fallback() {
            "fallback"
        } else {
            "model"
        }
    }
}

/// External text-generation backend
///
/// Takes a prompt, returns the model's raw text answer.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Backend identifier for logs (e.g. "gemini")
    fn name(&self) -> &'static str;

    async fn generate(&self, prompt: &str) -> Result<String, AnalysisError>;
}

/// Generator used when no API key is configured
pub struct DisabledGenerator;

#[async_trait]
impl TextGenerator for DisabledGenerator {
    fn name(&self) -> &'static str {
        "disabled"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, AnalysisError> {
        Err(AnalysisError::NotConfigured(
            "no Gemini API key configured".to_string(),
        ))
    }
}

/// Runs the prompt → generate → parse pipeline with fallback
#[derive(Clone)]
pub struct Analyzer {
    generator: Arc<dyn TextGenerator>,
}

impl Analyzer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Analyzer that always returns the fallback
    pub fn disabled() -> Self {
        Self::new(Arc::new(DisabledGenerator))
    }

    pub fn generator_name(&self) -> &'static str {
        self.generator.name()
    }

    /// Analyse feedback text. Always returns a complete result.
    pub async fn analyze(&self, text: &str) -> AnalysisOutcome {
        match self.try_analyze(text).await {
            Ok(analysis) => {
                debug!(
                    generator = self.generator.name(),
                    language = %analysis.language,
                    sentiment = %analysis.sentiment,
                    "Feedback analysed"
                );
                AnalysisOutcome::Analyzed(analysis)
            }
            Err(e) => {
                warn!(
                    generator = self.generator.name(),
                    error = %e,
                    "Feedback analysis failed, using fallback"
                );
                AnalysisOutcome::Fallback {
                    analysis: Analysis::fallback(text),
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn try_analyze(&self, text: &str) -> Result<Analysis, AnalysisError> {
        let prompt = build_prompt(text);
        let raw = self.generator.generate(&prompt).await?;
        parse_analysis(&raw)
    }
}
