//! Remote financial advice and category suggestions.
//!
//! Everything here is best-effort: [`AdvisoryClient`] turns every remote
//! failure into a fixed fallback so callers never see an error.

pub mod gemini;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    config::AdvisorConfig,
    ledger::{calendar_day, Category, Transaction},
};

pub use gemini::GeminiModel;

pub const EMPTY_LEDGER_ADVICE: &str =
    "Add some transactions first so I can analyze your spending habits!";
pub const FAILED_ADVICE: &str =
    "I'm having trouble analyzing your data right now. Please try again later.";
pub const NO_ADVICE: &str = "No advice available yet.";

#[derive(Debug, Error)]
pub enum AdvisoryError {
    #[error("Advisor not configured: {message}")]
    NotConfigured { message: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Request failed: {message}")]
    RequestFailed { message: String },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },
}

pub type Result<T> = std::result::Result<T, AdvisoryError>;

/// One text-generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    /// JSON schema the answer must follow, if any.
    pub response_schema: Option<serde_json::Value>,
}

/// Remote text generator behind the advisory client.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate(&self, request: GenerationRequest) -> Result<String>;
}

/// Stand-in used when no API key is available. Every call fails, so the
/// client always answers with its fallbacks.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineModel;

#[async_trait]
impl LanguageModel for OfflineModel {
    fn name(&self) -> &'static str {
        "offline"
    }

    async fn generate(&self, _request: GenerationRequest) -> Result<String> {
        Err(AdvisoryError::NotConfigured {
            message: "no API key available".into(),
        })
    }
}

#[derive(Deserialize)]
struct SuggestionReply {
    category: String,
}

pub struct AdvisoryClient {
    model: Arc<dyn LanguageModel>,
    advice_model: String,
    suggestion_model: String,
}

impl AdvisoryClient {
    pub fn new(model: Arc<dyn LanguageModel>, config: &AdvisorConfig) -> Self {
        Self {
            model,
            advice_model: config.advice_model.clone(),
            suggestion_model: config.suggestion_model.clone(),
        }
    }

    /// Uses Gemini when an API key is configured, the offline model otherwise.
    pub fn from_config(config: &AdvisorConfig) -> Self {
        let model: Arc<dyn LanguageModel> = match GeminiModel::from_config(config) {
            Ok(model) => Arc::new(model),
            Err(err) => {
                tracing::warn!(error = %err, "advisor running offline");
                Arc::new(OfflineModel)
            }
        };
        Self::new(model, config)
    }

    pub fn model_name(&self) -> &'static str {
        self.model.name()
    }

    /// Free-text advice for the given transactions. Never fails.
    pub async fn advice(&self, transactions: &[Transaction]) -> String {
        if transactions.is_empty() {
            return EMPTY_LEDGER_ADVICE.to_string();
        }
        let request = GenerationRequest {
            model: self.advice_model.clone(),
            prompt: advice_prompt(transactions),
            response_schema: None,
        };
        match self.model.generate(request).await {
            Ok(text) if text.trim().is_empty() => NO_ADVICE.to_string(),
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(model = self.model.name(), error = %err, "advice request failed");
                FAILED_ADVICE.to_string()
            }
        }
    }

    /// Picks an existing category name for `note`.
    ///
    /// Returns `None` when there is nothing to classify (blank note or no
    /// categories). Otherwise the answer is always a name from `categories`:
    /// the remote pick matched case-insensitively, or the last category.
    pub async fn suggest_category(&self, note: &str, categories: &[Category]) -> Option<String> {
        let fallback = categories.last()?.name.clone();
        if note.trim().is_empty() {
            return None;
        }
        let request = GenerationRequest {
            model: self.suggestion_model.clone(),
            prompt: suggestion_prompt(note, categories),
            response_schema: Some(suggestion_schema()),
        };
        let raw = match self.model.generate(request).await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(model = self.model.name(), error = %err, "suggestion request failed");
                return Some(fallback);
            }
        };
        let reply: SuggestionReply = match serde_json::from_str(raw.trim()) {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!(error = %err, "suggestion reply unparseable");
                return Some(fallback);
            }
        };
        let wanted = reply.category.trim().to_lowercase();
        let matched = categories
            .iter()
            .find(|category| category.name.to_lowercase() == wanted)
            .map(|category| category.name.clone());
        if matched.is_none() {
            tracing::debug!(suggested = %reply.category, "suggestion not in category set");
        }
        Some(matched.unwrap_or(fallback))
    }
}

fn advice_prompt(transactions: &[Transaction]) -> String {
    let summary = transactions
        .iter()
        .map(|txn| {
            format!(
                "{}: {}${} ({}) - {}",
                calendar_day(&txn.date),
                txn.kind.sign(),
                txn.amount,
                txn.category,
                txn.note
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "I have the following transactions:\n{summary}\n\n\
         Act as a professional personal finance advisor. Analyze these spending habits and \
         provide 3 concise, actionable tips to improve my financial health. \
         Keep it friendly and mobile-app styled."
    )
}

fn suggestion_prompt(note: &str, categories: &[Category]) -> String {
    let names = categories
        .iter()
        .map(|category| category.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Categorize this expense note into one of the following existing categories: {names}. \
         Note: \"{note}\". Return only the category name."
    )
}

fn suggestion_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "category": { "type": "STRING" }
        },
        "required": ["category"]
    })
}
