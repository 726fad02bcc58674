//! Application state for the store calendar API.

use std::sync::Arc;

use crate::config::{HolidayCalendar, HolidaySource};
use crate::store::{CalendarStore, InMemoryCalendarStore};

/// Shared application state.
///
/// Holds the collaborators every handler needs: the configuration store and
/// the holiday source.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn CalendarStore>,
    holidays: Arc<dyn HolidaySource>,
}

impl AppState {
    /// Creates a new application state from its collaborators.
    pub fn new(store: Arc<dyn CalendarStore>, holidays: Arc<dyn HolidaySource>) -> Self {
        Self { store, holidays }
    }

    /// Creates a state backed by an empty in-memory store.
    pub fn in_memory(holidays: HolidayCalendar) -> Self {
        Self::new(Arc::new(InMemoryCalendarStore::new()), Arc::new(holidays))
    }

    /// Returns the configuration store.
    pub fn store(&self) -> &dyn CalendarStore {
        self.store.as_ref()
    }

    /// Returns the holiday source.
    pub fn holidays(&self) -> &dyn HolidaySource {
        self.holidays.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Required for axum state
        fn assert_clone<T: Clone + Send + Sync>() {}
        assert_clone::<AppState>();
    }

    #[tokio::test]
    async fn test_clones_share_the_store() {
        let state = AppState::in_memory(HolidayCalendar::default());
        let clone = state.clone();
        clone
            .store()
            .save_config(&crate::models::StoreCalendarConfig::new_default("store_001"))
            .await
            .unwrap();
        assert!(state.store().load_config("store_001").await.is_ok());
    }
}
