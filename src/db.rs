use std::str::FromStr;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::DatabaseConfig;

pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&cfg.url)
        .with_context(|| format!("parse database url {}", cfg.url))?
        .create_if_missing(true);

    // An in-memory database lives and dies with its connection, so the pool must
    // keep exactly one open for the lifetime of the process.
    let mut pool = SqlitePoolOptions::new().max_connections(cfg.max_connections.max(1));
    if cfg.url.contains(":memory:") {
        pool = pool.max_connections(1).idle_timeout(None).max_lifetime(None);
    }

    pool.connect_with(options)
        .await
        .context("connect to database")
}

pub async fn migrate(db: &SqlitePool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(db)
        .await
        .context("run migrations")?;
    tracing::debug!("migrations applied");
    Ok(())
}
