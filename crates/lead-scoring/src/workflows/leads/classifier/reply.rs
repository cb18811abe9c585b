use super::super::domain::{Intent, IntentAssessment};
use regex::Regex;
use std::sync::OnceLock;

pub const FALLBACK_REASON_CHARS: usize = 200;

static INTENT_PATTERN: OnceLock<Regex> = OnceLock::new();
static REASON_PATTERN: OnceLock<Regex> = OnceLock::new();

fn intent_pattern() -> &'static Regex {
    INTENT_PATTERN.get_or_init(|| {
        Regex::new(r"(?i)Intent:\s*(High|Medium|Low)").expect("intent pattern is valid")
    })
}

fn reason_pattern() -> &'static Regex {
    REASON_PATTERN
        .get_or_init(|| Regex::new(r"(?is)Reason:\s*(.+)").expect("reason pattern is valid"))
}

/// Extracts `Intent:` and `Reason:` lines from a model reply.
///
/// Missing intent falls back to `Medium`; a missing reason falls back to the
/// first 200 characters of the trimmed reply.
pub fn parse_reply(reply: &str) -> IntentAssessment {
    let intent = intent_pattern()
        .captures(reply)
        .and_then(|captures| captures.get(1))
        .and_then(|label| Intent::from_label(label.as_str()))
        .unwrap_or(Intent::Medium);

    let reason = match reason_pattern()
        .captures(reply)
        .and_then(|captures| captures.get(1))
    {
        Some(rest) => rest
            .as_str()
            .trim()
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .to_string(),
        None => reply.trim().chars().take(FALLBACK_REASON_CHARS).collect(),
    };

    IntentAssessment { intent, reason }
}
