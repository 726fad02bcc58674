//! Request types for the store calendar API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_TABLE_NAME;

/// Longest range, in days, that one `/calendar/days` request may resolve.
pub const MAX_RANGE_DAYS: i64 = 731;

/// Request body for `POST /stores/:store_id/calendar/copy`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyRequest {
    /// The stores that receive the source store's weekly rules and settings.
    pub target_store_ids: Vec<String>,
}

/// Query string for `GET /stores/:store_id/calendar/days`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaysQuery {
    /// First date, inclusive.
    pub from: NaiveDate,
    /// Last date, inclusive.
    pub to: NaiveDate,
    /// Tenant whose holidays apply.
    #[serde(default)]
    pub tenant_id: Option<String>,
}

impl DaysQuery {
    /// The tenant whose holiday table applies.
    pub fn tenant(&self) -> &str {
        tenant_or_default(self.tenant_id.as_deref())
    }
}

/// Query string for `GET /stores/:store_id/calendar/days/:date`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TenantQuery {
    /// Tenant whose holidays apply.
    #[serde(default)]
    pub tenant_id: Option<String>,
}

impl TenantQuery {
    /// The tenant whose holiday table applies.
    pub fn tenant(&self) -> &str {
        tenant_or_default(self.tenant_id.as_deref())
    }
}

fn tenant_or_default(tenant_id: Option<&str>) -> &str {
    match tenant_id {
        Some(id) if !id.trim().is_empty() => id,
        _ => DEFAULT_TABLE_NAME,
    }
}
