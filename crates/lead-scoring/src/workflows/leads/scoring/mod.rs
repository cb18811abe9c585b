mod policy;
mod rules;

pub use policy::{ai_points_for_intent, combine, MAX_AI_POINTS};
pub use rules::{
    completeness_score, industry_score, role_score, DECISION_MAKER_KEYWORDS,
    INFLUENCER_KEYWORDS, MAX_COMPLETENESS_POINTS, MAX_INDUSTRY_POINTS, MAX_ROLE_POINTS,
};

use super::domain::{Lead, Offer};
use serde::{Deserialize, Serialize};

pub const MAX_RULE_SCORE: u8 = MAX_ROLE_POINTS + MAX_INDUSTRY_POINTS + MAX_COMPLETENESS_POINTS;

/// Deterministic rule score for a lead, in `0..=50`.
pub fn compute_rule_score(lead: &Lead, offer: &Offer) -> u8 {
    RuleScorer::score(lead, offer).total
}

/// Stateless scorer applying the role, industry and completeness heuristics.
pub struct RuleScorer;

impl RuleScorer {
    pub fn score(lead: &Lead, offer: &Offer) -> RuleScore {
        let components = vec![
            rules::role_component(&lead.role),
            rules::industry_component(&lead.industry, offer),
            rules::completeness_component(lead),
        ];
        let total = components.iter().map(|component| component.points).sum();

        RuleScore { total, components }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleFactor {
    Role,
    Industry,
    Completeness,
}

impl RuleFactor {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Role => "Role",
            Self::Industry => "Industry",
            Self::Completeness => "Completeness",
        }
    }
}

/// Discrete contribution to a rule score, kept for audit output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: RuleFactor,
    pub points: u8,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleScore {
    pub total: u8,
    pub components: Vec<ScoreComponent>,
}

impl RuleScore {
    pub fn points_for(&self, factor: RuleFactor) -> u8 {
        self.components
            .iter()
            .filter(|component| component.factor == factor)
            .map(|component| component.points)
            .sum()
    }
}
