use serde::{Deserialize, Serialize};
use std::fmt;

/// Product profile the leads are being scored against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub name: String,
    #[serde(default)]
    pub value_props: Vec<String>,
    #[serde(default)]
    pub ideal_use_cases: Vec<String>,
}

impl Offer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_props: Vec::new(),
            ideal_use_cases: Vec::new(),
        }
    }

    pub fn with_value_props<I, S>(mut self, value_props: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.value_props = value_props.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ideal_use_cases<I, S>(mut self, use_cases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ideal_use_cases = use_cases.into_iter().map(Into::into).collect();
        self
    }
}

/// Prospect record as ingested; every field defaults to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lead {
    pub name: String,
    pub role: String,
    pub company: String,
    pub industry: String,
    pub location: String,
    pub linkedin_bio: String,
}

impl Lead {
    /// The six attributes that must be filled for the completeness bonus, in column order.
    pub fn required_fields(&self) -> [&str; 6] {
        [
            self.name.as_str(),
            self.role.as_str(),
            self.company.as_str(),
            self.industry.as_str(),
            self.location.as_str(),
            self.linkedin_bio.as_str(),
        ]
    }
}

/// Coarse buying-intent label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    High,
    Medium,
    Low,
}

impl Intent {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Case-insensitive parse of `high`, `medium` or `low`.
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifier verdict for a single lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentAssessment {
    pub intent: Intent,
    pub reason: String,
}

impl IntentAssessment {
    pub fn new(intent: Intent, reason: impl Into<String>) -> Self {
        Self {
            intent,
            reason: reason.into(),
        }
    }

    pub(crate) fn medium(reason: impl Into<String>) -> Self {
        Self::new(Intent::Medium, reason)
    }
}

/// Result row produced for each lead by a scoring run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredLead {
    pub name: String,
    pub role: String,
    pub company: String,
    pub intent: Intent,
    pub score: u8,
    pub reason: String,
    pub raw_rule_score: u8,
    pub raw_ai_points: u8,
}
