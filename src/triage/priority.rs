//! Keyword-driven priority classification.
//!
//! Matching is plain substring containment on the lowercased text, so a
//! keyword inside a larger word still counts (`"reissued"` contains `"issue"`).

use tracing::debug;

use crate::base::{
    keywords::{HIGH_PRIORITY_KEYWORDS, MEDIUM_PRIORITY_KEYWORDS},
    types::Priority,
};

/// Tiers in the order they are checked.
static TIERS: [(Priority, &[&str]); 2] = [(Priority::High, HIGH_PRIORITY_KEYWORDS), (Priority::Medium, MEDIUM_PRIORITY_KEYWORDS)];

/// Assigns a priority to a customer question.
///
/// High-priority keywords are always checked before medium ones; text matching
/// neither tier (including the empty string) is `low`.
pub fn classify(text: &str) -> Priority {
    match matched_keyword(text) {
        Some((priority, keyword)) => {
            debug!("Matched `{}` keyword `{}`.", priority, keyword);
            priority
        }
        None => Priority::Low,
    }
}

/// Returns the tier and the first keyword (in declared order) that matched, if any.
pub fn matched_keyword(text: &str) -> Option<(Priority, &'static str)> {
    let lower = text.to_lowercase();

    TIERS
        .iter()
        .find_map(|(priority, keywords)| keywords.iter().find(|keyword| lower.contains(*keyword)).map(|keyword| (*priority, *keyword)))
}

// Tests.
