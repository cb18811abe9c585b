//! Intent classification backed by an OpenAI-compatible chat-completions API.
//!
//! Transport and parse problems never escape [`OpenAiIntentClassifier`]; they
//! degrade to a `Medium` verdict with a diagnostic reason. A
//! [`ClassifierError`] is reserved for failures the pipeline cannot recover
//! from, and aborts the scoring run that hit it.

mod openai;
mod reply;

pub use openai::OpenAiIntentClassifier;
pub use reply::{parse_reply, FALLBACK_REASON_CHARS};

use super::domain::{IntentAssessment, Lead, Offer};
use async_trait::async_trait;

pub const MISSING_CREDENTIALS_REASON: &str = "No OPENAI_API_KEY provided; defaulting to Medium.";
pub const REQUEST_EXCEPTION_REASON: &str = "AI call exception, defaulting to Medium.";

/// Produces an intent verdict for one lead against the current offer.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(
        &self,
        lead: &Lead,
        offer: &Offer,
    ) -> Result<IntentAssessment, ClassifierError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("failed to build classification prompt: {0}")]
    Prompt(#[from] serde_json::Error),
    #[error("intent classifier unavailable: {0}")]
    Unavailable(String),
}
