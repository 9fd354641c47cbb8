use std::str::FromStr;

use anyhow::Context;
use serde::Deserialize;

use crate::meals::streak::StreakRule;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub streak_rule: StreakRule,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database = DatabaseConfig {
            url: std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://dailydiet.db".into()),
            max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(5),
        };
        let streak_rule = match std::env::var("STREAK_RULE") {
            Ok(v) => StreakRule::from_str(&v).context("STREAK_RULE")?,
            Err(_) => StreakRule::default(),
        };
        Ok(Self {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("APP_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(3333),
            database,
            streak_rule,
        })
    }

    #[cfg(test)]
    pub fn for_tests(streak_rule: StreakRule) -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            database: DatabaseConfig {
                url: "sqlite::memory:".into(),
                max_connections: 1,
            },
            streak_rule,
        }
    }
}
