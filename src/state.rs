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
        let db = db::connect(&config.database).await?;
        db::migrate(&db).await?;
        Ok(Self { db, config })
    }

    /// Fresh in-memory database with the schema applied.
    #[cfg(test)]
    pub async fn in_memory(streak_rule: crate::meals::streak::StreakRule) -> Self {
        let config = Arc::new(AppConfig::for_tests(streak_rule));
        let db = db::connect(&config.database)
            .await
            .expect("in-memory pool ok");
        db::migrate(&db).await.expect("migrations ok");
        Self { db, config }
    }
}
