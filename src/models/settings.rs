//! Store-wide calendar policy settings.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::holiday::{Holiday, HolidayType};

/// Name used for the patron saint's day when none is configured.
pub const DEFAULT_PATRON_SAINT_NAME: &str = "Santo Patrono";

/// Auto-close policy switches for a store.
///
/// The flags are declarative: turning `auto_close_sundays` on never touches
/// the stored Sunday rule, the resolver suppresses it at read time instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    /// Force Sundays closed regardless of the Sunday rule.
    pub auto_close_sundays: bool,
    /// Close on holidays classified as national.
    pub auto_close_national_holidays: bool,
    /// Close on holidays classified as religious, including the patron saint's day.
    pub auto_close_religious_holidays: bool,
    /// The local patron saint's feast; only month and day are used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patron_saint_day: Option<NaiveDate>,
    /// The local patron saint's name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patron_saint_name: Option<String>,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            auto_close_sundays: true,
            auto_close_national_holidays: true,
            auto_close_religious_holidays: true,
            patron_saint_day: None,
            patron_saint_name: None,
        }
    }
}

impl CalendarSettings {
    /// Returns true if holidays of the given type close the store.
    pub fn closes_on(&self, holiday_type: HolidayType) -> bool {
        match holiday_type {
            HolidayType::National => self.auto_close_national_holidays,
            HolidayType::Religious => self.auto_close_religious_holidays,
        }
    }

    /// Returns the patron saint's day as a religious holiday if it falls on `date`.
    ///
    /// The configured date recurs every year on the same month and day. A
    /// 29 February patron day only matches in leap years.
    pub fn patron_saint_holiday_on(&self, date: NaiveDate) -> Option<Holiday> {
        let patron = self.patron_saint_day?;
        if patron.month() != date.month() || patron.day() != date.day() {
            return None;
        }
        Some(Holiday {
            date,
            name: self
                .patron_saint_name
                .clone()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PATRON_SAINT_NAME.to_string()),
            holiday_type: HolidayType::Religious,
        })
    }
}
