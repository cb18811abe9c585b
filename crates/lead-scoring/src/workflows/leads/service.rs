use std::io::Read;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::info;

use super::classifier::IntentClassifier;
use super::domain::{Lead, Offer, ScoredLead};
use super::export::{render_results_csv, ExportError};
use super::import::{LeadImportError, LeadImporter};
use super::pipeline::{LeadScoringPipeline, ScoringError};
use super::session::{ScoringRunSummary, ScoringSession};

/// Service owning the scoring session and the pipeline that scores it.
///
/// Scoring runs work on a snapshot of the offer and leads; the session lock is
/// released while leads are classified and taken again only to swap in the
/// finished results.
pub struct LeadScoringService<C> {
    session: RwLock<ScoringSession>,
    pipeline: LeadScoringPipeline<C>,
}

impl<C> LeadScoringService<C>
where
    C: IntentClassifier + 'static,
{
    pub fn new(classifier: Arc<C>) -> Self {
        Self {
            session: RwLock::new(ScoringSession::default()),
            pipeline: LeadScoringPipeline::new(classifier),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, ScoringSession> {
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ScoringSession> {
        self.session.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the active offer.
    pub fn set_offer(&self, offer: Offer) -> Offer {
        info!(offer = %offer.name, use_cases = offer.ideal_use_cases.len(), "offer configured");
        self.write().set_offer(offer.clone());
        offer
    }

    pub fn offer(&self) -> Option<Offer> {
        self.read().offer().cloned()
    }

    pub fn add_leads(&self, leads: Vec<Lead>) -> usize {
        let added = self.write().add_leads(leads);
        info!(added, "leads added");
        added
    }

    /// Parse a lead CSV and append every row; nothing is added if parsing fails.
    pub fn import_leads<R: Read>(&self, reader: R) -> Result<usize, LeadImportError> {
        let leads = LeadImporter::from_reader(reader)?;
        Ok(self.add_leads(leads))
    }

    pub fn clear_leads(&self) -> usize {
        let cleared = self.write().clear_leads();
        info!(cleared, "leads cleared");
        cleared
    }

    pub fn leads(&self) -> Vec<Lead> {
        self.read().leads().to_vec()
    }

    /// Score every lead against the current offer and replace stored results.
    ///
    /// Failed runs leave previously stored results untouched.
    pub async fn score(&self) -> Result<ScoringRunSummary, ScoringError> {
        let (offer, leads) = {
            let session = self.read();
            (session.offer().cloned(), session.leads().to_vec())
        };

        let results = self.pipeline.run(&leads, offer.as_ref()).await?;
        let summary = self.write().commit_results(results, Utc::now());
        Ok(summary)
    }

    pub fn results(&self) -> Vec<ScoredLead> {
        self.read().results().to_vec()
    }

    pub fn ranked_results(&self) -> Vec<ScoredLead> {
        self.read().ranked_results()
    }

    pub fn last_run(&self) -> Option<ScoringRunSummary> {
        self.read().last_run().cloned()
    }

    pub fn export_csv(&self) -> Result<Vec<u8>, ExportError> {
        render_results_csv(self.read().results())
    }
}
