//! Holiday reference data.
//!
//! This module contains the [`Holiday`] type and its [`HolidayType`]
//! classification. Holidays are tenant reference data, not store data.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The classification of a holiday, which selects the auto-close policy flag
/// that applies to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayType {
    /// A civil holiday (e.g. Festa della Repubblica).
    National,
    /// A religious feast (e.g. Natale, Ognissanti, the patron saint's day).
    Religious,
}

impl fmt::Display for HolidayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HolidayType::National => write!(f, "national"),
            HolidayType::Religious => write!(f, "religious"),
        }
    }
}

/// A dated holiday.
///
/// # Example
///
/// ```
/// use store_calendar::models::{Holiday, HolidayType};
/// use chrono::NaiveDate;
///
/// let holiday = Holiday {
///     date: NaiveDate::from_ymd_opt(2026, 6, 2).unwrap(),
///     name: "Festa della Repubblica".to_string(),
///     holiday_type: HolidayType::National,
/// };
/// assert!(holiday.falls_on(NaiveDate::from_ymd_opt(2026, 6, 2).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday.
    pub name: String,
    /// Whether the holiday is national or religious.
    #[serde(rename = "type")]
    pub holiday_type: HolidayType,
}

impl Holiday {
    /// Returns true if the holiday falls on the given date.
    pub fn falls_on(&self, date: NaiveDate) -> bool {
        self.date == date
    }
}
