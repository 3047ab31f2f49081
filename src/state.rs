// src/state.rs
use crate::{
    config::AppConfig,
    error::AppResult,
    services::{persistence, save_indicator::SaveIndicator, store::Store},
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    // Single writer at a time; every handler finishes its mutation inside one request.
    pub store: Arc<RwLock<Store>>,
    pub save_indicator: SaveIndicator,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Hydrates the store from storage and seeds an admin on first run.
    pub async fn load(db_pool: SqlitePool, config: AppConfig) -> Self {
        let mut store = Store::from_snapshot(persistence::load(&db_pool).await);
        store.seed_admin_if_empty(&config.seed_admin_username, &config.seed_admin_password);
        for warning in store.link_warnings() {
            tracing::warn!("Data link: {}", warning);
        }

        Self {
            db_pool,
            store: Arc::new(RwLock::new(store)),
            save_indicator: SaveIndicator::new(config.save_indicator),
            config: Arc::new(config),
        }
    }

    /// Flushes the full snapshot to storage. Returns once the write is done.
    pub async fn save(&self) -> AppResult<()> {
        let snapshot = self.store.read().await.snapshot();
        persistence::save(&self.db_pool, &snapshot).await
    }
}
