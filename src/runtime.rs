//! Runtime services and shared state for the support desk.

use tracing::{instrument, warn};

use crate::{
    base::{
        config::Config,
        types::{Actor, Res},
    },
    cli::{self, KbAction, KbArgs},
    interaction::knowledge_base::KnowledgeBase,
    service::kb::{KbStore, NewQaPair},
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the configuration and the knowledge base. It is designed
/// to be trivially cloneable, allowing it to be passed around without the need
/// for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The role-gated knowledge base.
    pub kb: KnowledgeBase,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub async fn new(config: Config) -> Res<Self> {
        if config.is_ephemeral() {
            warn!("Database endpoint `{}` is in-memory; knowledge-base changes are lost on exit.", config.db_endpoint);
        }

        // Initialize the store.
        let store = KbStore::surreal(&config).await?;

        Ok(Self::with_store(config, store))
    }

    /// Create a runtime around an existing store.
    pub fn with_store(config: Config, store: KbStore) -> Self {
        Self {
            config,
            kb: KnowledgeBase::new(store),
        }
    }

    /// Executes a knowledge-base command as the configured operator, returning the rendered output.
    #[instrument(skip_all)]
    pub async fn execute_kb(&self, args: &KbArgs) -> Res<String> {
        let actor: Actor = self.config.operator();

        match &args.action {
            KbAction::List => cli::render_pairs(&self.kb.list(&actor).await?, args.json),
            KbAction::Get { id } => cli::render_pair(&self.kb.get(&actor, *id).await?, args.json),
            KbAction::Create { question, answer } => {
                let created = self.kb.create(&actor, NewQaPair::new(question, answer)).await?;
                cli::render_pair(&created, args.json)
            }
            KbAction::Update { id, question, answer } => {
                let updated = self.kb.update(&actor, *id, NewQaPair::new(question, answer)).await?;
                cli::render_pair(&updated, args.json)
            }
            KbAction::Delete { id } => {
                self.kb.delete(&actor, *id).await?;
                Ok(format!("Deleted Q&A pair {id}."))
            }
            KbAction::Search { query } => cli::render_pairs(&self.kb.search(&actor, query).await?, args.json),
        }
    }
}
