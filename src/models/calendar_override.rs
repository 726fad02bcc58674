//! Per-date override model.
//!
//! This module defines [`CalendarOverride`], a manual exception for a single
//! date that takes precedence over holidays and the weekly schedule.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::time_slot::{TimeSlot, default_time_slots};

/// The kind of override recorded for a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideType {
    /// The store is closed all day.
    Closed,
    /// The store opens with the override's own hours.
    SpecialHours,
    /// The store is closed for a store-declared holiday.
    Holiday,
}

impl OverrideType {
    /// Returns the open flag this type requires.
    pub fn is_open(&self) -> bool {
        matches!(self, OverrideType::SpecialHours)
    }

    /// Returns the snake_case name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            OverrideType::Closed => "closed",
            OverrideType::SpecialHours => "special_hours",
            OverrideType::Holiday => "holiday",
        }
    }
}

impl fmt::Display for OverrideType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A manual exception for a single date.
///
/// `override_type` and `is_open` must agree: `special_hours` is open with at
/// least one valid slot, `closed` and `holiday` are closed with no slots.
///
/// # Example
///
/// ```
/// use store_calendar::models::{CalendarOverride, OverrideType};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
/// let inventory = CalendarOverride::new(date, OverrideType::Closed);
/// assert!(!inventory.is_open);
/// assert!(inventory.time_slots.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarOverride {
    /// The date this override applies to (unique per store).
    pub date: NaiveDate,
    /// The kind of override.
    pub override_type: OverrideType,
    /// Whether the store opens on this date.
    pub is_open: bool,
    /// The open intervals when `override_type` is `special_hours`.
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
    /// Free-text explanation (e.g. "inventory").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Display name when the override declares a holiday.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday_name: Option<String>,
}

impl CalendarOverride {
    /// Creates an override of the given type in a consistent state.
    ///
    /// `special_hours` overrides are seeded with the default sessions.
    pub fn new(date: NaiveDate, override_type: OverrideType) -> Self {
        let time_slots = if override_type.is_open() {
            default_time_slots()
        } else {
            Vec::new()
        };
        Self {
            date,
            override_type,
            is_open: override_type.is_open(),
            time_slots,
            reason: None,
            holiday_name: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 24).unwrap()
    }

    #[test]
    fn test_special_hours_seeds_default_slots() {
        let o = CalendarOverride::new(date(), OverrideType::SpecialHours);
        assert!(o.is_open);
        assert_eq!(o.time_slots.len(), 2);
    }

    #[test]
    fn test_holiday_override_is_closed() {
        let o = CalendarOverride::new(date(), OverrideType::Holiday);
        assert!(!o.is_open);
        assert!(o.time_slots.is_empty());
    }

    #[test]
    fn test_deserialize_override() {
        let json = r#"{
            "date": "2025-12-25",
            "override_type": "special_hours",
            "is_open": true,
            "time_slots": [{"id": "s1", "start_time": "10:00", "end_time": "13:00"}],
            "reason": "Christmas opening"
        }"#;
        let o: CalendarOverride = serde_json::from_str(json).unwrap();
        assert_eq!(o.override_type, OverrideType::SpecialHours);
        assert_eq!(o.time_slots.len(), 1);
        assert_eq!(o.reason.as_deref(), Some("Christmas opening"));
        assert!(o.holiday_name.is_none());
    }

    #[test]
    fn test_override_type_display() {
        assert_eq!(OverrideType::SpecialHours.to_string(), "special_hours");
        assert_eq!(OverrideType::Closed.to_string(), "closed");
    }
}
