use crate::config::AppConfig;
use crate::db;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = db::connect(&config.database_path, config.max_connections).await?;
        Ok(Self::from_parts(db, config))
    }

    pub fn from_parts(db: SqlitePool, config: Arc<AppConfig>) -> Self {
        Self { db, config }
    }

    /// Fresh in-memory store with the schema already applied.
    #[cfg(test)]
    pub async fn in_memory() -> Self {
        let db = db::connect_in_memory().await.expect("in-memory pool ok");
        db::init_schema(&db).await.expect("schema ok");

        let config = Arc::new(AppConfig {
            database_path: ":memory:".into(),
            max_connections: 1,
            host: "127.0.0.1".into(),
            port: 0,
        });
        Self::from_parts(db, config)
    }
}
