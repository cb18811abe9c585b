use super::domain::{Lead, Offer, ScoredLead};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of the most recent successful scoring run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoringRunSummary {
    pub results_count: usize,
    pub completed_at: DateTime<Utc>,
}

/// Offer, lead and result state for one scoring session.
///
/// The offer is replaced wholesale, leads only ever grow until cleared, and
/// results change solely through [`ScoringSession::commit_results`].
#[derive(Debug, Clone, Default)]
pub struct ScoringSession {
    offer: Option<Offer>,
    leads: Vec<Lead>,
    results: Vec<ScoredLead>,
    last_run: Option<ScoringRunSummary>,
}

impl ScoringSession {
    pub fn offer(&self) -> Option<&Offer> {
        self.offer.as_ref()
    }

    pub fn set_offer(&mut self, offer: Offer) {
        self.offer = Some(offer);
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    /// Appends leads in the given order and returns how many were added.
    pub fn add_leads(&mut self, leads: Vec<Lead>) -> usize {
        let added = leads.len();
        self.leads.extend(leads);
        added
    }

    pub fn clear_leads(&mut self) -> usize {
        let cleared = self.leads.len();
        self.leads.clear();
        cleared
    }

    pub fn results(&self) -> &[ScoredLead] {
        &self.results
    }

    pub fn last_run(&self) -> Option<&ScoringRunSummary> {
        self.last_run.as_ref()
    }

    /// Replaces the previous results with a completed run.
    pub fn commit_results(
        &mut self,
        results: Vec<ScoredLead>,
        completed_at: DateTime<Utc>,
    ) -> ScoringRunSummary {
        let summary = ScoringRunSummary {
            results_count: results.len(),
            completed_at,
        };
        self.results = results;
        self.last_run = Some(summary.clone());
        summary
    }

    /// Results ordered by score, highest first; ties keep import order.
    pub fn ranked_results(&self) -> Vec<ScoredLead> {
        let mut ranked = self.results.clone();
        ranked.sort_by(|left, right| right.score.cmp(&left.score));
        ranked
    }
}
