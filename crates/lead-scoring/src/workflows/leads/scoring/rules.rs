use super::super::domain::{Lead, Offer};
use super::{RuleFactor, ScoreComponent};

pub const MAX_ROLE_POINTS: u8 = 20;
pub const MAX_INDUSTRY_POINTS: u8 = 20;
pub const MAX_COMPLETENESS_POINTS: u8 = 10;

const INFLUENCER_POINTS: u8 = 10;
const RELATED_INDUSTRY_POINTS: u8 = 10;

/// Scanned first, in order; the first substring hit wins.
pub const DECISION_MAKER_KEYWORDS: &[&str] = &[
    "ceo",
    "founder",
    "co-founder",
    "cto",
    "cpo",
    "chief",
    "head of",
    "vp",
    "vice president",
    "director",
    "owner",
    "partner",
    "president",
];

pub const INFLUENCER_KEYWORDS: &[&str] = &[
    "manager",
    "lead",
    "principal",
    "senior",
    "associate",
    "evangelist",
    "specialist",
    "coordinator",
    "marketing",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoleMatch {
    DecisionMaker(&'static str),
    Influencer(&'static str),
    Unmatched,
}

fn match_role(role: &str) -> RoleMatch {
    let role = role.to_lowercase();

    if let Some(keyword) = DECISION_MAKER_KEYWORDS
        .iter()
        .copied()
        .find(|keyword| role.contains(keyword))
    {
        return RoleMatch::DecisionMaker(keyword);
    }

    INFLUENCER_KEYWORDS
        .iter()
        .copied()
        .find(|keyword| role.contains(keyword))
        .map_or(RoleMatch::Unmatched, RoleMatch::Influencer)
}

pub fn role_score(role: &str) -> u8 {
    match match_role(role) {
        RoleMatch::DecisionMaker(_) => MAX_ROLE_POINTS,
        RoleMatch::Influencer(_) => INFLUENCER_POINTS,
        RoleMatch::Unmatched => 0,
    }
}

pub(super) fn role_component(role: &str) -> ScoreComponent {
    let (points, notes) = match match_role(role) {
        RoleMatch::DecisionMaker(keyword) => (
            MAX_ROLE_POINTS,
            format!("decision maker (matched '{keyword}')"),
        ),
        RoleMatch::Influencer(keyword) => {
            (INFLUENCER_POINTS, format!("influencer (matched '{keyword}')"))
        }
        RoleMatch::Unmatched => (0, "no seniority keyword in role".to_string()),
    };

    ScoreComponent {
        factor: RuleFactor::Role,
        points,
        notes,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum IndustryMatch<'a> {
    Exact(&'a str),
    Contains(&'a str),
    SharedToken { use_case: &'a str, token: String },
    Unmatched,
}

/// Splits on anything outside `[A-Za-z0-9_]`, dropping empty pieces.
fn use_case_tokens(use_case: &str) -> impl Iterator<Item = &str> {
    use_case
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty())
}

fn match_industry<'a>(industry: &str, offer: &'a Offer) -> IndustryMatch<'a> {
    if offer.ideal_use_cases.is_empty() || industry.is_empty() {
        return IndustryMatch::Unmatched;
    }

    let industry = industry.to_lowercase();
    for use_case in &offer.ideal_use_cases {
        let candidate = use_case.to_lowercase();

        if industry == candidate {
            return IndustryMatch::Exact(use_case);
        }
        if industry.contains(&candidate) || candidate.contains(&industry) {
            return IndustryMatch::Contains(use_case);
        }
        let shared = use_case_tokens(&candidate)
            .find(|token| industry.contains(token))
            .map(str::to_string);
        if let Some(token) = shared {
            return IndustryMatch::SharedToken { use_case, token };
        }
    }

    IndustryMatch::Unmatched
}

pub fn industry_score(industry: &str, offer: &Offer) -> u8 {
    match match_industry(industry, offer) {
        IndustryMatch::Exact(_) => MAX_INDUSTRY_POINTS,
        IndustryMatch::Contains(_) | IndustryMatch::SharedToken { .. } => {
            RELATED_INDUSTRY_POINTS
        }
        IndustryMatch::Unmatched => 0,
    }
}

pub(super) fn industry_component(industry: &str, offer: &Offer) -> ScoreComponent {
    let (points, notes) = match match_industry(industry, offer) {
        IndustryMatch::Exact(use_case) => (
            MAX_INDUSTRY_POINTS,
            format!("industry matches ideal use case '{use_case}'"),
        ),
        IndustryMatch::Contains(use_case) => (
            RELATED_INDUSTRY_POINTS,
            format!("industry adjacent to ideal use case '{use_case}'"),
        ),
        IndustryMatch::SharedToken { use_case, token } => (
            RELATED_INDUSTRY_POINTS,
            format!("industry shares '{token}' with ideal use case '{use_case}'"),
        ),
        IndustryMatch::Unmatched => (0, "industry outside ideal use cases".to_string()),
    };

    ScoreComponent {
        factor: RuleFactor::Industry,
        points,
        notes,
    }
}

pub fn completeness_score(lead: &Lead) -> u8 {
    if lead
        .required_fields()
        .iter()
        .all(|value| !value.trim().is_empty())
    {
        MAX_COMPLETENESS_POINTS
    } else {
        0
    }
}

pub(super) fn completeness_component(lead: &Lead) -> ScoreComponent {
    let points = completeness_score(lead);
    let notes = if points > 0 {
        "all profile fields present".to_string()
    } else {
        "profile incomplete".to_string()
    };

    ScoreComponent {
        factor: RuleFactor::Completeness,
        points,
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead() -> Lead {
        Lead {
            name: "Ava Patel".to_string(),
            role: "Head of Growth".to_string(),
            company: "FlowMetrics".to_string(),
            industry: "SaaS".to_string(),
            location: "Austin".to_string(),
            linkedin_bio: "Scaling B2B pipelines".to_string(),
        }
    }

    #[test]
    fn decision_maker_keywords_score_twenty_in_any_case_or_position() {
        for role in [
            "CEO",
            "Co-Founder & CEO",
            "founder",
            "Regional Sales DIRECTOR",
            "Managing Director",
            "Senior Vice President, Sales",
        ] {
            assert_eq!(role_score(role), 20, "role {role}");
        }
    }

    #[test]
    fn influencer_keywords_score_ten() {
        for role in [
            "Marketing Coordinator",
            "Senior Manager",
            "Product Specialist",
            "Team Lead",
        ] {
            assert_eq!(role_score(role), 10, "role {role}");
        }
    }

    #[test]
    fn unlisted_roles_score_zero() {
        for role in ["Engineer", "Intern", "", "Analyst"] {
            assert_eq!(role_score(role), 0, "role {role}");
        }
    }

    #[test]
    fn role_matching_is_substring_based() {
        assert_eq!(role_score("Developer"), 0);
        assert_eq!(role_score("SVP Engineering"), 20);
        // "director" contains "cto", which sits earlier in the list.
        assert!(role_component("Director").notes.contains("'cto'"));
    }

    #[test]
    fn decision_maker_list_is_scanned_before_influencers() {
        let component = role_component("Senior Head of Marketing");
        assert_eq!(component.points, 20);
        assert!(component.notes.contains("'head of'"));

        let component = role_component("Senior Manager");
        assert_eq!(component.points, 10);
        assert!(component.notes.contains("'manager'"));
    }

    #[test]
    fn industry_exact_match_is_case_insensitive() {
        let offer = Offer::new("X").with_ideal_use_cases(["B2B SaaS"]);
        assert_eq!(industry_score("b2b saas", &offer), 20);
    }

    #[test]
    fn industry_substring_in_either_direction_scores_ten() {
        let offer = Offer::new("X").with_ideal_use_cases(["SaaS"]);
        assert_eq!(industry_score("B2B SaaS", &offer), 10);

        let offer = Offer::new("X").with_ideal_use_cases(["Enterprise Software"]);
        assert_eq!(industry_score("software", &offer), 10);
    }

    #[test]
    fn industry_token_overlap_scores_ten() {
        let offer = Offer::new("X").with_ideal_use_cases(["mid-market healthcare"]);
        assert_eq!(industry_score("Healthcare IT", &offer), 10);

        let component = industry_component("Healthcare IT", &offer);
        assert!(component.notes.contains("'healthcare'"));
    }

    #[test]
    fn token_overlap_is_checked_for_every_use_case_in_order() {
        let offer = Offer::new("X").with_ideal_use_cases(["retail banking", "mid-market logistics"]);
        let component = industry_component("Freight Logistics", &offer);

        assert_eq!(component.points, 10);
        assert!(component.notes.contains("'logistics'"));
        assert!(component.notes.contains("'mid-market logistics'"));
    }

    #[test]
    fn industry_exact_match_later_in_list_is_not_reached_after_related_match() {
        let offer = Offer::new("X").with_ideal_use_cases(["SaaS", "B2B SaaS"]);
        assert_eq!(industry_score("B2B SaaS", &offer), 10);
    }

    #[test]
    fn industry_without_overlap_or_inputs_scores_zero() {
        let offer = Offer::new("X").with_ideal_use_cases(["Logistics"]);
        assert_eq!(industry_score("Retail", &offer), 0);
        assert_eq!(industry_score("", &offer), 0);
        assert_eq!(industry_score("Retail", &Offer::new("X")), 0);
    }

    #[test]
    fn completeness_is_all_or_nothing() {
        assert_eq!(completeness_score(&lead()), 10);

        let mut missing_bio = lead();
        missing_bio.linkedin_bio = "   ".to_string();
        assert_eq!(completeness_score(&missing_bio), 0);

        let mut missing_location = lead();
        missing_location.location.clear();
        assert_eq!(completeness_score(&missing_location), 0);
    }
}
