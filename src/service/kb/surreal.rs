//! SurrealDB implementation of the knowledge-base store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::{
    Surreal,
    engine::any::{self, Any},
    opt::auth::Root,
};
use tracing::{debug, info, instrument};

use crate::base::{
    config::{Config, ConfigInner},
    types::Res,
};

use super::{GenericKbStore, KbStore, NewQaPair, QaPair};

const TABLE: &str = "kb_pair";
const COUNTER_TABLE: &str = "kb_counter";

// Extra methods on `KbStore` applied by the surreal implementation.

impl KbStore {
    /// Connects to the SurrealDB instance named by the configuration.
    pub async fn surreal(config: &Config) -> Res<Self> {
        let store = SurrealKbStore::connect(config).await?;
        Ok(Self { inner: Arc::new(store) })
    }

    /// Opens a fresh in-memory SurrealDB instance with the default namespace and database.
    pub async fn surreal_memory() -> Res<Self> {
        let config = Config::from(ConfigInner {
            db_endpoint: "mem://".to_string(),
            ..Default::default()
        });

        Self::surreal(&config).await
    }
}

// Records.

/// A pair as stored in the `kb_pair` table; the record key is `pair_id`.
#[derive(Debug, Serialize, Deserialize)]
struct StoredPair {
    pair_id: i64,
    question: String,
    answer: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<StoredPair> for QaPair {
    fn from(stored: StoredPair) -> Self {
        Self {
            id: stored.pair_id,
            question: stored.question,
            answer: stored.answer,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }
    }
}

/// Fields merged into an existing record on update.
#[derive(Debug, Serialize)]
struct PairPatch {
    question: String,
    answer: String,
    updated_at: DateTime<Utc>,
}

// Specific implementations.

/// SurrealDB-backed store.
///
/// IDs come from a counter record in the database, so several processes can
/// share one server.
struct SurrealKbStore {
    db: Surreal<Any>,
}

impl SurrealKbStore {
    #[instrument(name = "SurrealKbStore::connect", skip_all)]
    async fn connect(config: &Config) -> Res<Self> {
        let db = any::connect(config.db_endpoint.as_str()).await?;

        // Authenticate if credentials are configured.

        if let (Some(username), Some(password)) = (&config.db_username, &config.db_password) {
            db.signin(Root { username, password }).await?;
        }

        Self::open(db, &config.db_namespace, &config.db_database).await
    }

    async fn open(db: Surreal<Any>, namespace: &str, database: &str) -> Res<Self> {
        db.use_ns(namespace).use_db(database).await?;

        // Define schemas.

        db.query(format!("DEFINE TABLE IF NOT EXISTS {TABLE} SCHEMALESS;")).await?.check()?;
        db.query(format!("DEFINE INDEX IF NOT EXISTS {TABLE}_pair_id ON {TABLE} FIELDS pair_id UNIQUE;"))
            .await?
            .check()?;

        db.query(format!("DEFINE TABLE IF NOT EXISTS {COUNTER_TABLE} SCHEMALESS;")).await?.check()?;

        // Never hand out an ID below one already stored.

        let existing: Vec<StoredPair> = db.select(TABLE).await?;
        let max_id = existing.iter().map(|p| p.pair_id).max().unwrap_or(0);

        if max_id > 0 {
            db.query(format!("UPSERT {COUNTER_TABLE}:{TABLE} SET last_id = math::max([(last_id OR 0), $max_id]);"))
                .bind(("max_id", max_id))
                .await?
                .check()?;
        }

        info!("Knowledge base opened with {} pairs.", existing.len());

        Ok(Self { db })
    }

    /// Atomically bumps the counter record and returns the new ID.
    async fn next_id(&self) -> Res<i64> {
        let mut response = self
            .db
            .query(format!("UPSERT {COUNTER_TABLE}:{TABLE} SET last_id = (last_id OR 0) + 1 RETURN VALUE last_id;"))
            .await?
            .check()?;

        let id: Option<i64> = response.take(0)?;

        id.ok_or_else(|| anyhow::anyhow!("Database returned no ID for a new Q&A pair."))
    }
}

#[async_trait]
impl GenericKbStore for SurrealKbStore {
    #[instrument(skip(self))]
    async fn list_pairs(&self) -> Res<Vec<QaPair>> {
        let stored: Vec<StoredPair> = self.db.select(TABLE).await?;

        let mut pairs: Vec<QaPair> = stored.into_iter().map(QaPair::from).collect();
        pairs.sort_by_key(|p| p.id);

        Ok(pairs)
    }

    #[instrument(skip(self))]
    async fn get_pair(&self, id: i64) -> Res<Option<QaPair>> {
        let stored: Option<StoredPair> = self.db.select((TABLE, id)).await?;

        Ok(stored.map(QaPair::from))
    }

    #[instrument(skip_all)]
    async fn create_pair(&self, pair: NewQaPair) -> Res<QaPair> {
        let id = self.next_id().await?;
        let now = Utc::now();

        let record = StoredPair {
            pair_id: id,
            question: pair.question,
            answer: pair.answer,
            created_at: now,
            updated_at: now,
        };

        let created: Option<StoredPair> = self.db.create((TABLE, id)).content(record).await?;
        let created = created.ok_or_else(|| anyhow::anyhow!("Database returned no record for Q&A pair {id}."))?;

        debug!("Created Q&A pair {}.", id);

        Ok(created.into())
    }

    #[instrument(skip(self, pair))]
    async fn update_pair(&self, id: i64, pair: NewQaPair) -> Res<Option<QaPair>> {
        let patch = PairPatch {
            question: pair.question,
            answer: pair.answer,
            updated_at: Utc::now(),
        };

        let updated: Option<StoredPair> = self.db.update((TABLE, id)).merge(patch).await?;

        Ok(updated.map(QaPair::from))
    }

    #[instrument(skip(self))]
    async fn delete_pair(&self, id: i64) -> Res<bool> {
        let removed: Option<StoredPair> = self.db.delete((TABLE, id)).await?;

        Ok(removed.is_some())
    }
}

// Tests.
