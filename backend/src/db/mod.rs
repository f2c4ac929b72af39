//! Postgres pool for the credential store

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Pool settings derived from the `database` config section
pub fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .test_before_acquire(true)
}

/// Connect to the configured database
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let connect_options = PgConnectOptions::from_str(&config.url)
        .context("Invalid database.url")?
        .application_name("codeclass");

    let pool = pool_options(config).connect_with(connect_options).await?;

    info!(
        max = config.max_connections,
        min = config.min_connections,
        acquire_timeout_secs = config.acquire_timeout_secs,
        "Connected to credential store"
    );

    Ok(pool)
}

/// Apply pending schema migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Schema up to date");
    Ok(())
}

/// Round-trip a trivial query
pub async fn health_check(pool: &PgPool) -> Result<()> {
    if let Err(e) = sqlx::query("SELECT 1").execute(pool).await {
        warn!(error = %e, "Credential store query failed");
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_pool_options_follow_config() {
        let mut config = AppConfig::default().database;
        config.max_connections = 7;
        config.min_connections = 3;
        config.acquire_timeout_secs = 5;
        config.idle_timeout_secs = 60;
        config.max_lifetime_secs = 120;

        let options = pool_options(&config);

        assert_eq!(options.get_max_connections(), 7);
        assert_eq!(options.get_min_connections(), 3);
        assert_eq!(options.get_acquire_timeout(), Duration::from_secs(5));
        assert_eq!(options.get_idle_timeout(), Some(Duration::from_secs(60)));
        assert_eq!(options.get_max_lifetime(), Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_min_connections_capped_by_max() {
        let mut config = AppConfig::default().database;
        config.max_connections = 2;
        config.min_connections = 10;

        assert_eq!(pool_options(&config).get_min_connections(), 2);
    }

    #[tokio::test]
    async fn test_bad_url_is_error() {
        let mut config = AppConfig::default().database;
        config.url = "not a url".to_string();

        assert!(create_pool(&config).await.is_err());
    }
}
