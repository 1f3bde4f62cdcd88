//! Application state shared across handlers

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};

use crate::{config::Config, db::PostgresGameStore, services::GameService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: PgPool,
    pub games: GameService<PostgresGameStore>,
}

impl AppState {
    /// Build the state from configuration: set up the connection pool, run
    /// migrations when configured to, and wire the game service.
    ///
    /// The pool connects lazily, so construction succeeds even before the
    /// database is reachable.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let options: PgConnectOptions = config
            .database
            .url
            .parse()
            .context("Invalid database URL")?;

        let pool = PgPoolOptions::new()
            .max_connections(config.database.pool_max_size)
            .min_connections(config.database.pool_min_size)
            .acquire_timeout(Duration::from_secs(config.database.pool_timeout_seconds))
            .connect_lazy_with(options);

        if config.database.run_migrations {
            sqlx::migrate!()
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;
        }

        let store = PostgresGameStore::new(pool.clone(), config.search.full_text);
        let games = GameService::new(store);

        Ok(Self {
            config: Arc::new(config),
            db_pool: pool,
            games,
        })
    }
}
