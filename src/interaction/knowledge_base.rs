//! Administration of the knowledge base.
//!
//! Every operation is performed on behalf of an [`Actor`], and only admins may
//! manage records. The role check happens before the store is touched.

use anyhow::{anyhow, bail};
use tracing::{info, instrument, warn};

use crate::{
    base::types::{Actor, Res, Void},
    service::kb::{KbStore, NewQaPair, QaPair},
};

/// Role-gated access to the knowledge base.
#[derive(Clone)]
pub struct KnowledgeBase {
    store: KbStore,
}

impl KnowledgeBase {
    pub fn new(store: KbStore) -> Self {
        Self { store }
    }

    /// Lists every pair.
    #[instrument(skip_all, fields(actor = %actor.name))]
    pub async fn list(&self, actor: &Actor) -> Res<Vec<QaPair>> {
        authorize(actor)?;

        self.store.list_pairs().await
    }

    /// Gets a single pair.
    #[instrument(skip_all, fields(actor = %actor.name, id = id))]
    pub async fn get(&self, actor: &Actor, id: i64) -> Res<QaPair> {
        authorize(actor)?;

        self.store.get_pair(id).await?.ok_or_else(|| not_found(id))
    }

    /// Creates a pair from a non-blank question and answer.
    #[instrument(skip_all, fields(actor = %actor.name))]
    pub async fn create(&self, actor: &Actor, pair: NewQaPair) -> Res<QaPair> {
        authorize(actor)?;
        let pair = normalize(pair)?;

        let created = self.store.create_pair(pair).await?;
        info!("Q&A pair {} created.", created.id);

        Ok(created)
    }

    /// Replaces the question and answer of an existing pair.
    #[instrument(skip_all, fields(actor = %actor.name, id = id))]
    pub async fn update(&self, actor: &Actor, id: i64, pair: NewQaPair) -> Res<QaPair> {
        authorize(actor)?;
        let pair = normalize(pair)?;

        let updated = self.store.update_pair(id, pair).await?.ok_or_else(|| not_found(id))?;
        info!("Q&A pair {} updated.", id);

        Ok(updated)
    }

    /// Deletes a pair.
    #[instrument(skip_all, fields(actor = %actor.name, id = id))]
    pub async fn delete(&self, actor: &Actor, id: i64) -> Void {
        authorize(actor)?;

        if !self.store.delete_pair(id).await? {
            return Err(not_found(id));
        }

        info!("Q&A pair {} deleted.", id);

        Ok(())
    }

    /// Finds pairs whose question or answer contains the query, ignoring case.
    ///
    /// An empty query matches everything.
    #[instrument(skip_all, fields(actor = %actor.name))]
    pub async fn search(&self, actor: &Actor, query: &str) -> Res<Vec<QaPair>> {
        let pairs = self.list(actor).await?;

        Ok(filter_pairs(pairs, query))
    }
}

/// Case-insensitive substring filter over question and answer.
pub fn filter_pairs(pairs: Vec<QaPair>, query: &str) -> Vec<QaPair> {
    let query = query.to_lowercase();

    pairs
        .into_iter()
        .filter(|p| p.question.to_lowercase().contains(&query) || p.answer.to_lowercase().contains(&query))
        .collect()
}

fn authorize(actor: &Actor) -> Void {
    if !actor.is_admin() {
        warn!("Rejected knowledge base access by `{}`.", actor.name);
        bail!("{} is not allowed to manage the knowledge base", actor.name);
    }

    Ok(())
}

fn normalize(pair: NewQaPair) -> Res<NewQaPair> {
    let question = pair.question.trim();
    let answer = pair.answer.trim();

    if question.is_empty() || answer.is_empty() {
        bail!("Question and answer must both be non-empty");
    }

    Ok(NewQaPair::new(question, answer))
}

fn not_found(id: i64) -> anyhow::Error {
    anyhow!("Q&A pair {id} not found")
}

// Tests.
