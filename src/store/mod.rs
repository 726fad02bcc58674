//! Persistence collaborator for store calendar configurations.
//!
//! The engine itself is pure; loading and saving a [`StoreCalendarConfig`]
//! goes through the [`CalendarStore`] trait so that the surrounding
//! application can back it with whatever storage it uses. Timeouts and
//! retries belong to the implementation, not to the engine.

mod memory;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{CalendarError, CalendarResult};
use crate::models::StoreCalendarConfig;

pub use memory::InMemoryCalendarStore;

/// Loads and saves one calendar document per store.
#[async_trait]
pub trait CalendarStore: Send + Sync {
    /// Loads the configuration of a store.
    ///
    /// Returns [`CalendarError::ConfigNotFound`] when nothing has been saved
    /// for the store yet.
    async fn load_config(&self, store_id: &str) -> CalendarResult<StoreCalendarConfig>;

    /// Persists a configuration as a single document, replacing any previous one.
    async fn save_config(&self, config: &StoreCalendarConfig) -> CalendarResult<()>;

    /// Loads a store's configuration, materializing the defaults when none exists.
    ///
    /// The defaults are returned but not saved; they are persisted on the
    /// first explicit save.
    async fn load_or_default(&self, store_id: &str) -> CalendarResult<StoreCalendarConfig> {
        match self.load_config(store_id).await {
            Err(CalendarError::ConfigNotFound { .. }) => {
                debug!(store_id = %store_id, "No calendar configuration yet, using defaults");
                Ok(StoreCalendarConfig::new_default(store_id))
            }
            other => other,
        }
    }
}
