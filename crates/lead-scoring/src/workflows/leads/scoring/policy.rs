use super::super::domain::{Intent, IntentAssessment, Lead, ScoredLead};

pub const MAX_AI_POINTS: u8 = 50;

pub fn ai_points_for_intent(intent: Intent) -> u8 {
    match intent {
        Intent::High => MAX_AI_POINTS,
        Intent::Medium => 30,
        Intent::Low => 10,
    }
}

/// Merges the rule score with the classifier verdict into a result row.
pub fn combine(lead: &Lead, rule_score: u8, assessment: IntentAssessment) -> ScoredLead {
    let raw_ai_points = ai_points_for_intent(assessment.intent);

    ScoredLead {
        name: lead.name.clone(),
        role: lead.role.clone(),
        company: lead.company.clone(),
        intent: assessment.intent,
        score: rule_score + raw_ai_points,
        reason: assessment.reason,
        raw_rule_score: rule_score,
        raw_ai_points,
    }
}
