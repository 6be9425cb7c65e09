//! Storage factory for creating stores from configuration

use std::sync::Arc;
use tracing::info;

use super::backends::{JsonFileStore, MemoryStore};
use super::error::StorageResult;
use super::traits::FeedbackStore;
use crate::config::{ServerConfig, StorageBackend};

/// Factory for creating feedback stores
pub struct StorageFactory;

impl StorageFactory {
    /// Create and initialize the store selected by configuration
    pub async fn from_config(config: &ServerConfig) -> StorageResult<Arc<dyn FeedbackStore>> {
        let store: Arc<dyn FeedbackStore> = match config.storage_backend {
            StorageBackend::File => Arc::new(JsonFileStore::new(&config.data_dir)),
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
        };

        store.initialize().await?;
        info!("Using {} storage backend", store.backend_name());

        Ok(store)
    }
}
