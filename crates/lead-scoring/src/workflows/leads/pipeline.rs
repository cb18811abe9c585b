use super::classifier::{ClassifierError, IntentClassifier};
use super::domain::{Lead, Offer, ScoredLead};
use super::scoring::{combine, RuleScorer};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("no offer has been configured")]
    MissingOffer,
    #[error("no leads have been imported")]
    NoLeads,
    #[error("scoring aborted at lead {position} ('{lead}'): {source}")]
    Classification {
        position: usize,
        lead: String,
        #[source]
        source: ClassifierError,
    },
}

impl ScoringError {
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::MissingOffer | Self::NoLeads)
    }
}

/// Scores a batch of leads one at a time, in order.
///
/// Each lead is rule-scored and then classified; the classification call is
/// awaited before the next lead starts. Nothing is returned unless every lead
/// was scored.
pub struct LeadScoringPipeline<C> {
    classifier: Arc<C>,
}

impl<C> Clone for LeadScoringPipeline<C> {
    fn clone(&self) -> Self {
        Self {
            classifier: Arc::clone(&self.classifier),
        }
    }
}

impl<C> LeadScoringPipeline<C>
where
    C: IntentClassifier + 'static,
{
    pub fn new(classifier: Arc<C>) -> Self {
        Self { classifier }
    }

    pub async fn run(
        &self,
        leads: &[Lead],
        offer: Option<&Offer>,
    ) -> Result<Vec<ScoredLead>, ScoringError> {
        let offer = offer.ok_or(ScoringError::MissingOffer)?;
        if leads.is_empty() {
            return Err(ScoringError::NoLeads);
        }

        info!(offer = %offer.name, leads = leads.len(), "scoring run started");

        let mut results = Vec::with_capacity(leads.len());
        for (position, lead) in leads.iter().enumerate() {
            let rule_score = RuleScorer::score(lead, offer);
            let assessment = self
                .classifier
                .classify(lead, offer)
                .await
                .map_err(|source| {
                    warn!(position, lead = %lead.name, error = %source, "scoring run aborted");
                    ScoringError::Classification {
                        position,
                        lead: lead.name.clone(),
                        source,
                    }
                })?;

            let scored = combine(lead, rule_score.total, assessment);
            debug!(
                position,
                lead = %scored.name,
                rule = scored.raw_rule_score,
                ai = scored.raw_ai_points,
                intent = %scored.intent,
                components = ?rule_score.components,
                "lead scored"
            );
            results.push(scored);
        }

        info!(results = results.len(), "scoring run completed");
        Ok(results)
    }
}
