//! In-memory calendar store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{CalendarError, CalendarResult};
use crate::models::StoreCalendarConfig;

use super::CalendarStore;

/// A [`CalendarStore`] that keeps documents in a shared map.
///
/// Cloning the store shares the underlying map.
///
/// # Example
///
/// ```
/// use store_calendar::models::StoreCalendarConfig;
/// use store_calendar::store::{CalendarStore, InMemoryCalendarStore};
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// rt.block_on(async {
///     let store = InMemoryCalendarStore::new();
///     store.save_config(&StoreCalendarConfig::new_default("store_001")).await.unwrap();
///     let loaded = store.load_config("store_001").await.unwrap();
///     assert_eq!(loaded.store_id, "store_001");
/// });
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryCalendarStore {
    configs: Arc<RwLock<HashMap<String, StoreCalendarConfig>>>,
}

impl InMemoryCalendarStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stores with a saved configuration.
    pub async fn len(&self) -> usize {
        self.configs.read().await.len()
    }

    /// Returns true if no configuration has been saved.
    pub async fn is_empty(&self) -> bool {
        self.configs.read().await.is_empty()
    }
}

#[async_trait]
impl CalendarStore for InMemoryCalendarStore {
    async fn load_config(&self, store_id: &str) -> CalendarResult<StoreCalendarConfig> {
        self.configs
            .read()
            .await
            .get(store_id)
            .cloned()
            .ok_or_else(|| CalendarError::ConfigNotFound {
                store_id: store_id.to_string(),
            })
    }

    async fn save_config(&self, config: &StoreCalendarConfig) -> CalendarResult<()> {
        self.configs
            .write()
            .await
            .insert(config.store_id.clone(), config.clone());
        Ok(())
    }
}
