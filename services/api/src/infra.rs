use lead_scoring::config::ClassifierConfig;
use lead_scoring::error::AppError;
use lead_scoring::workflows::leads::{LeadScoringService, OpenAiIntentClassifier};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type ScoringService = LeadScoringService<OpenAiIntentClassifier>;

/// Wires the chat-completions classifier into a fresh scoring service.
pub(crate) fn build_scoring_service(config: ClassifierConfig) -> Result<ScoringService, AppError> {
    let classifier = OpenAiIntentClassifier::new(config)?;
    if classifier.is_configured() {
        info!(?classifier, "intent classifier configured");
    } else {
        warn!("OPENAI_API_KEY not set; every lead will be classified as Medium");
    }

    Ok(LeadScoringService::new(Arc::new(classifier)))
}
