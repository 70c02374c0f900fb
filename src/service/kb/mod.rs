//! Knowledge-base storage for question/answer pairs.

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::base::types::Res;

pub mod surreal;

// Types.

/// A stored question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The editable content of a question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQaPair {
    pub question: String,
    pub answer: String,
}

impl NewQaPair {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

// Traits.

/// Generic knowledge-base store trait that backends must implement.
///
/// Implementations perform no authorization; callers are expected to go
/// through [`crate::interaction::knowledge_base::KnowledgeBase`].
#[async_trait]
pub trait GenericKbStore: Send + Sync + 'static {
    /// Lists every pair, ordered by ID.
    async fn list_pairs(&self) -> Res<Vec<QaPair>>;

    /// Gets a single pair by its ID.
    async fn get_pair(&self, id: i64) -> Res<Option<QaPair>>;

    /// Creates a pair, allocating the next ID.
    async fn create_pair(&self, pair: NewQaPair) -> Res<QaPair>;

    /// Replaces the question and answer of an existing pair.
    ///
    /// Returns `None` if there is no pair with that ID.
    async fn update_pair(&self, id: i64, pair: NewQaPair) -> Res<Option<QaPair>>;

    /// Deletes a pair, returning whether anything was removed.
    async fn delete_pair(&self, id: i64) -> Res<bool>;
}

// Structs.

/// Knowledge-base store handle.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct KbStore {
    inner: Arc<dyn GenericKbStore>,
}

impl Deref for KbStore {
    type Target = dyn GenericKbStore;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl KbStore {
    pub fn new(inner: Arc<dyn GenericKbStore>) -> Self {
        Self { inner }
    }
}
