//! HTTP API module for the store calendar service.
//!
//! This module provides the REST endpoints for reading and saving a store's
//! calendar configuration, resolving its effective opening hours, and
//! propagating its weekly schedule to other stores.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CopyRequest, DaysQuery, MAX_RANGE_DAYS, TenantQuery};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
