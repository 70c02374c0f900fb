//! Keyword tiers used by the priority classifier.
//!
//! Every entry is a lowercase literal matched as a substring of the
//! lowercased question text.

/// Phrases that mark a question as `high` priority.
pub const HIGH_PRIORITY_KEYWORDS: &[&str] = &[
    "urgent",
    "emergency",
    "asap",
    "critical",
    "broken",
    "not working",
    "error",
    "bug",
    "crash",
    "down",
    "failed",
    "immediately",
];

/// Phrases that mark a question as `medium` priority.
pub const MEDIUM_PRIORITY_KEYWORDS: &[&str] = &["help", "issue", "problem", "question", "concern", "trouble", "difficulty", "support"];
