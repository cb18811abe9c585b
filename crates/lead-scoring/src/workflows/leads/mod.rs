//! Lead scoring workflow: CSV intake, rule heuristics, AI intent
//! classification and result export.

pub mod classifier;
pub mod domain;
pub mod export;
pub mod import;
pub mod pipeline;
pub mod router;
pub mod scoring;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use classifier::{ClassifierError, IntentClassifier, OpenAiIntentClassifier};
pub use domain::{Intent, IntentAssessment, Lead, Offer, ScoredLead};
pub use export::{render_results_csv, ExportError};
pub use import::{LeadImportError, LeadImporter};
pub use pipeline::{LeadScoringPipeline, ScoringError};
pub use router::lead_router;
pub use scoring::{ai_points_for_intent, compute_rule_score, RuleScore, RuleScorer};
pub use service::LeadScoringService;
pub use session::{ScoringRunSummary, ScoringSession};
