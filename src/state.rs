use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    config::AppConfig,
    error::AppResult,
    models::ReferenceData,
    seed,
    session::SessionRegistry,
    store::{MemoryStore, Store},
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub reference: Arc<ReferenceData>,
    pub sessions: SessionRegistry,
    pub config: Arc<AppConfig>,
    /// Serializes read-modify-write cycles against the store.
    pub writes: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(config: AppConfig, reference: ReferenceData, store: Arc<dyn Store>) -> Self {
        Self {
            store,
            reference: Arc::new(reference),
            sessions: SessionRegistry::new(),
            config: Arc::new(config),
            writes: Arc::new(Mutex::new(())),
        }
    }

    /// State backed by a [`MemoryStore`] filled with the demo data.
    pub fn seeded(config: AppConfig) -> AppResult<Self> {
        let snapshot = seed::initial_snapshot(&config.seed_password)?;
        let store = Arc::new(MemoryStore::new(snapshot));
        Ok(Self::new(config, seed::reference_data(), store))
    }
}
