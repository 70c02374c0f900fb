//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc};

use serde::Deserialize;

use super::types::{Actor, Res, Role, Void};

/// Default database endpoint (an embedded, file-backed SurrealDB).
fn default_db_endpoint() -> String {
    "surrealkv://.hidden/kb".to_string()
}

/// Default database namespace.
fn default_db_namespace() -> String {
    "support".to_string()
}

/// Default database name.
fn default_db_database() -> String {
    "desk".to_string()
}

/// Default operator name for CLI knowledge-base commands.
fn default_operator_name() -> String {
    "operator".to_string()
}

/// Configuration for the support desk.
#[derive(Debug, Clone)]
pub struct Config {
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ConfigInner {
    /// Database endpoint URL (`DB_ENDPOINT`), e.g. `surrealkv://.hidden/kb`, `mem://`, or `ws://localhost:8000`.
    #[serde(default = "default_db_endpoint")]
    pub db_endpoint: String,
    /// Database namespace (`DB_NAMESPACE`).
    #[serde(default = "default_db_namespace")]
    pub db_namespace: String,
    /// Database name (`DB_DATABASE`).
    #[serde(default = "default_db_database")]
    pub db_database: String,
    /// Database root username (`DB_USERNAME`); must be paired with a password.
    #[serde(default)]
    pub db_username: Option<String>,
    /// Database root password (`DB_PASSWORD`).
    #[serde(default)]
    pub db_password: Option<String>,
    /// Name the CLI acts as (`OPERATOR_NAME`).
    #[serde(default = "default_operator_name")]
    pub operator_name: String,
    /// Role the CLI acts as (`OPERATOR_ROLE`); only `admin` may manage the knowledge base.
    #[serde(default)]
    pub operator_role: Role,
}

impl Default for ConfigInner {
    fn default() -> Self {
        Self {
            db_endpoint: default_db_endpoint(),
            db_namespace: default_db_namespace(),
            db_database: default_db_database(),
            db_username: None,
            db_password: None,
            operator_name: default_operator_name(),
            operator_role: Role::default(),
        }
    }
}

impl Config {
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default().prefix("SUPPORT_DESK"));

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        result.validate()?;

        Ok(result)
    }

    /// Checks invariants the deserializer cannot express.
    pub fn validate(&self) -> Void {
        if self.db_endpoint.trim().is_empty() {
            return Err(anyhow::anyhow!("Database endpoint must not be empty."));
        }

        if self.db_namespace.trim().is_empty() || self.db_database.trim().is_empty() {
            return Err(anyhow::anyhow!("Database namespace and database name must not be empty."));
        }

        if self.db_username.is_some() != self.db_password.is_some() {
            return Err(anyhow::anyhow!("Database username and password must be set together."));
        }

        Ok(())
    }

    /// Whether the endpoint is an in-memory database that is lost on exit.
    pub fn is_ephemeral(&self) -> bool {
        self.db_endpoint.trim_start().starts_with("mem://")
    }

    /// The actor CLI commands are performed as.
    pub fn operator(&self) -> Actor {
        Actor::new(self.operator_name.clone(), self.operator_role)
    }
}

impl From<ConfigInner> for Config {
    fn from(inner: ConfigInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

// Tests.
