use std::sync::Arc;

use crate::config::AppConfig;
use crate::db;
use crate::resource::Schemas;
use crate::store::{PgStore, RecordStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub config: Arc<AppConfig>,
    pub schemas: Arc<Schemas>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let pool = db::build_pool(&config.db);
        db::check_reachable(&pool).await;

        if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
            tracing::warn!(error = %e, "migrations failed; continuing");
        }

        let store = Arc::new(PgStore::new(pool)) as Arc<dyn RecordStore>;
        Ok(Self::from_parts(store, Arc::new(config)))
    }

    pub fn from_parts(store: Arc<dyn RecordStore>, config: Arc<AppConfig>) -> Self {
        let schemas = Arc::new(Schemas::new(config.extended_updates));
        Self {
            store,
            config,
            schemas,
        }
    }

    #[cfg(test)]
    pub fn fake(extended_updates: bool) -> (Self, Arc<crate::store::memory::MemoryStore>) {
        let memory = Arc::new(crate::store::memory::MemoryStore::new());
        let mut config = AppConfig::from_lookup(|_| None).expect("default config");
        config.extended_updates = extended_updates;
        let state = Self::from_parts(memory.clone(), Arc::new(config));
        (state, memory)
    }
}
