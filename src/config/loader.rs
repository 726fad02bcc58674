//! Holiday table loading.
//!
//! This module provides the [`HolidayCalendar`] type, which reads holiday
//! tables from YAML files and serves the holidays of a tenant for a year
//! through the [`HolidaySource`] trait.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{CalendarError, CalendarResult};
use crate::models::Holiday;

use super::types::HolidayTable;

/// File stem of the table that replaces the built-in default.
pub const DEFAULT_TABLE_NAME: &str = "default";

/// Provides the holidays of a tenant for a calendar year.
#[async_trait]
pub trait HolidaySource: Send + Sync {
    /// Loads the holidays of `tenant_id` for `year`.
    async fn load_holidays(&self, tenant_id: &str, year: i32) -> CalendarResult<Vec<Holiday>>;
}

/// Holiday tables keyed by tenant, with a fallback table.
///
/// Tenants without their own table get the default one, which is the built-in
/// Italian table unless a `default.yaml` replaces it.
///
/// # Directory Structure
///
/// ```text
/// config/holidays/
/// ├── default.yaml     # Replaces the built-in table
/// └── tenant_milan.yaml # Table for tenant "tenant_milan"
/// ```
///
/// # Example
///
/// ```no_run
/// use store_calendar::config::HolidayCalendar;
///
/// let calendar = HolidayCalendar::load("./config/holidays")?;
/// let holidays = calendar.holidays_for("tenant_milan", 2026);
/// println!("{} holidays", holidays.len());
/// # Ok::<(), store_calendar::error::CalendarError>(())
/// ```
#[derive(Debug, Clone)]
pub struct HolidayCalendar {
    default_table: HolidayTable,
    tenants: HashMap<String, HolidayTable>,
}

impl Default for HolidayCalendar {
    fn default() -> Self {
        Self::new(HolidayTable::italian())
    }
}

impl HolidayCalendar {
    /// Creates a calendar that serves `default_table` to every tenant.
    pub fn new(default_table: HolidayTable) -> Self {
        Self {
            default_table,
            tenants: HashMap::new(),
        }
    }

    /// Registers a table for one tenant, replacing any previous one.
    pub fn with_tenant(mut self, tenant_id: impl Into<String>, table: HolidayTable) -> Self {
        self.tenants.insert(tenant_id.into(), table);
        self
    }

    /// Loads every `*.yaml` table in `path`.
    ///
    /// # Returns
    ///
    /// Returns a `HolidayCalendar` on success, or an error if:
    /// - The directory does not exist or cannot be read
    /// - Any file contains invalid YAML
    /// - Any fixed rule names a day that does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> CalendarResult<Self> {
        let dir = path.as_ref();
        let dir_str = dir.display().to_string();

        let entries = fs::read_dir(dir).map_err(|_| CalendarError::HolidayTableNotFound {
            path: dir_str.clone(),
        })?;

        let mut calendar = Self::default();
        for entry in entries {
            let entry = entry.map_err(|_| CalendarError::HolidayTableNotFound {
                path: dir_str.clone(),
            })?;
            let file = entry.path();
            if !file.extension().is_some_and(|ext| ext == "yaml") {
                continue;
            }
            let Some(stem) = file.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let table = Self::load_table(&file)?;
            debug!(
                file = %file.display(),
                region = %table.region,
                rules = table.holidays.len(),
                "Loaded holiday table"
            );
            if stem == DEFAULT_TABLE_NAME {
                calendar.default_table = table;
            } else {
                calendar.tenants.insert(stem.to_string(), table);
            }
        }

        info!(
            path = %dir_str,
            tenants = calendar.tenants.len(),
            "Holiday calendar loaded"
        );
        Ok(calendar)
    }

    /// Loads and checks a single table file.
    pub fn load_table(path: &Path) -> CalendarResult<HolidayTable> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| CalendarError::HolidayTableNotFound {
            path: path_str.clone(),
        })?;

        let table: HolidayTable =
            serde_yaml::from_str(&content).map_err(|e| CalendarError::HolidayTableParse {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        if let Some(rule) = table.first_malformed_rule() {
            return Err(CalendarError::HolidayTableParse {
                path: path_str,
                message: format!("holiday '{}' does not fall on a real date", rule.name()),
            });
        }
        Ok(table)
    }

    /// Returns the table that applies to a tenant.
    pub fn table_for(&self, tenant_id: &str) -> &HolidayTable {
        self.tenants.get(tenant_id).unwrap_or(&self.default_table)
    }

    /// Returns the holidays of a tenant for one year, sorted by date.
    pub fn holidays_for(&self, tenant_id: &str, year: i32) -> Vec<Holiday> {
        self.table_for(tenant_id).holidays_for_year(year)
    }

    /// Returns the holidays of a tenant for every year touched by a date range.
    pub fn holidays_between(&self, tenant_id: &str, from: NaiveDate, to: NaiveDate) -> Vec<Holiday> {
        let table = self.table_for(tenant_id);
        (from.year()..=to.year())
            .flat_map(|year| table.holidays_for_year(year))
            .collect()
    }
}

#[async_trait]
impl HolidaySource for HolidayCalendar {
    async fn load_holidays(&self, tenant_id: &str, year: i32) -> CalendarResult<Vec<Holiday>> {
        Ok(self.holidays_for(tenant_id, year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HolidayType;
    use tempfile::TempDir;

    fn holidays_path() -> &'static str {
        "./config/holidays"
    }

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    #[test]
    fn test_shipped_default_matches_built_in_table() {
        let result = HolidayCalendar::load(holidays_path());
        assert!(result.is_ok(), "Failed to load holidays: {:?}", result.err());

        let calendar = result.unwrap();
        assert_eq!(calendar.table_for("any_tenant"), &HolidayTable::italian());
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        match HolidayCalendar::load("/nonexistent/holidays") {
            Err(CalendarError::HolidayTableNotFound { path }) => {
                assert!(path.contains("nonexistent"));
            }
            other => panic!("Expected HolidayTableNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_tenant_table_and_default_fallback() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "tenant_milan.yaml",
            "region: IT-MI\nholidays:\n  - name: Sant'Ambrogio\n    type: religious\n    month: 12\n    day: 7\n",
        );
        write(&dir, "notes.txt", "ignored");

        let calendar = HolidayCalendar::load(dir.path()).unwrap();

        let milan = calendar.holidays_for("tenant_milan", 2026);
        assert_eq!(milan.len(), 1);
        assert_eq!(milan[0].name, "Sant'Ambrogio");
        assert_eq!(milan[0].holiday_type, HolidayType::Religious);

        assert_eq!(calendar.holidays_for("tenant_rome", 2026).len(), 12);
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let dir = TempDir::new().unwrap();
        write(&dir, "broken.yaml", "region: [unclosed");

        match HolidayCalendar::load(dir.path()) {
            Err(CalendarError::HolidayTableParse { path, .. }) => {
                assert!(path.ends_with("broken.yaml"));
            }
            other => panic!("Expected HolidayTableParse error, got {:?}", other),
        }
    }

    #[test]
    fn test_impossible_date_rejected() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "default.yaml",
            "region: XX\nholidays:\n  - name: Nope\n    type: national\n    month: 4\n    day: 31\n",
        );

        match HolidayCalendar::load(dir.path()) {
            Err(CalendarError::HolidayTableParse { message, .. }) => {
                assert!(message.contains("Nope"));
            }
            other => panic!("Expected HolidayTableParse error, got {:?}", other),
        }
    }

    #[test]
    fn test_holidays_between_spans_years() {
        let calendar = HolidayCalendar::default();
        let from = NaiveDate::from_ymd_opt(2025, 12, 20).unwrap();
        let to = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();

        let holidays = calendar.holidays_between("tenant", from, to);
        assert_eq!(holidays.len(), 24);
        assert!(holidays.iter().any(|h| h.date == NaiveDate::from_ymd_opt(2026, 1, 6).unwrap()));
    }

    #[tokio::test]
    async fn test_holiday_source_serves_year() {
        let calendar = HolidayCalendar::default();
        let holidays = calendar.load_holidays("tenant", 2026).await.unwrap();
        let pasqua = holidays.iter().find(|h| h.name == "Pasqua").unwrap();
        assert_eq!(pasqua.date, NaiveDate::from_ymd_opt(2026, 4, 5).unwrap());
    }
}
