//! Intake of incoming customer requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::base::types::Priority;

use super::priority::classify;

/// A customer question stamped with its priority on arrival.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportRequest {
    pub question: String,
    pub priority: Priority,
    pub received_at: DateTime<Utc>,
}

impl SupportRequest {
    /// Classifies the question and stamps it with the current time.
    #[instrument(skip_all)]
    pub fn new(question: impl Into<String>) -> Self {
        Self::received_at(question, Utc::now())
    }

    /// Classifies the question, recording an explicit arrival time.
    pub fn received_at(question: impl Into<String>, received_at: DateTime<Utc>) -> Self {
        let question = question.into();
        let priority = classify(&question);

        info!("Received `{}` priority request.", priority);

        Self { question, priority, received_at }
    }
}

/// Orders a queue so the most severe requests come first.
///
/// Requests of equal priority are ordered oldest first.
pub fn sort_by_priority(requests: &mut [SupportRequest]) {
    requests.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.received_at.cmp(&b.received_at)));
}

// Tests.
