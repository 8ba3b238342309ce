//! Database module - AppState and the PostgreSQL item store
//!
//! - `item` - `PgItemStore`, the `sqlx` implementation of `ItemStore`

mod item;

pub use item::PgItemStore;

use crate::config::{AppConfig, StoreBackend};
use crate::store::{InMemoryItemStore, ItemStore};
use anyhow::Context;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ItemStore>,
}

impl AppState {
    pub async fn new_with_config(config: &AppConfig) -> anyhow::Result<Self> {
        match config.store_backend {
            StoreBackend::Memory => {
                log::warn!("Using in-memory item store, data will not survive a restart");
                Ok(Self::in_memory())
            }
            StoreBackend::Postgres => {
                let pool = connect_pool(config).await?;
                let store = PgItemStore::new(pool);
                store
                    .ensure_schema()
                    .await
                    .context("Failed to create items table")?;
                Ok(Self::new_with_store(Arc::new(store)))
            }
        }
    }

    pub fn new_with_store(store: Arc<dyn ItemStore>) -> Self {
        AppState { store }
    }

    pub fn in_memory() -> Self {
        Self::new_with_store(Arc::new(InMemoryItemStore::new()))
    }
}

pub async fn connect_pool(config: &AppConfig) -> anyhow::Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set for the postgres item store")?;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .acquire_timeout(config.db_acquire_timeout)
        .idle_timeout(std::time::Duration::from_secs(900))
        .max_lifetime(std::time::Duration::from_secs(1800))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    log::info!(
        "Connected to database (max {} connections)",
        config.db_max_connections
    );
    Ok(pool)
}
