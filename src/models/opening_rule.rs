//! Weekly opening rule model.
//!
//! This module defines the [`DayOfWeek`] enum and the [`OpeningRule`] struct
//! that together make up a store's recurring weekly schedule.

use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::time_slot::{TimeSlot, seeded_time_slots};

/// A day of the week, Monday first.
///
/// # Example
///
/// ```
/// use store_calendar::models::DayOfWeek;
/// use chrono::Weekday;
///
/// assert_eq!(DayOfWeek::from(Weekday::Sun), DayOfWeek::Sunday);
/// assert_eq!(DayOfWeek::Sunday.to_string(), "sunday");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOfWeek {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl DayOfWeek {
    /// All seven days, Monday first.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Returns the lowercase name of the day.
    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The recurring opening hours for one day of the week.
///
/// A closed rule has no slots; an open rule has at least one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningRule {
    /// The day this rule applies to.
    pub day_of_week: DayOfWeek,
    /// Whether the store opens on this day.
    pub is_open: bool,
    /// The open intervals, in ascending start-time order.
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
}

impl OpeningRule {
    /// Creates an open rule with the default morning and afternoon sessions.
    ///
    /// Slot ids are derived from the day, e.g. `monday-1`.
    pub fn open_default(day_of_week: DayOfWeek) -> Self {
        Self {
            day_of_week,
            is_open: true,
            time_slots: seeded_time_slots(day_of_week.as_str()),
        }
    }

    /// Creates a closed rule.
    pub fn closed(day_of_week: DayOfWeek) -> Self {
        Self {
            day_of_week,
            is_open: false,
            time_slots: Vec::new(),
        }
    }

    /// Returns the default weekly schedule: Monday to Saturday open with the
    /// default sessions, Sunday closed.
    pub fn default_week() -> Vec<OpeningRule> {
        DayOfWeek::ALL
            .iter()
            .map(|&day| match day {
                DayOfWeek::Sunday => OpeningRule::closed(day),
                _ => OpeningRule::open_default(day),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_conversion_covers_all_days() {
        let weekdays = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ];
        for (weekday, day) in weekdays.iter().zip(DayOfWeek::ALL.iter()) {
            assert_eq!(DayOfWeek::from(*weekday), *day);
        }
    }

    #[test]
    fn test_default_week_has_one_rule_per_day() {
        let week = OpeningRule::default_week();
        assert_eq!(week.len(), 7);
        for (rule, day) in week.iter().zip(DayOfWeek::ALL.iter()) {
            assert_eq!(rule.day_of_week, *day);
        }
    }

    #[test]
    fn test_default_week_closes_sunday_only() {
        let week = OpeningRule::default_week();
        for rule in &week {
            if rule.day_of_week == DayOfWeek::Sunday {
                assert!(!rule.is_open);
                assert!(rule.time_slots.is_empty());
            } else {
                assert!(rule.is_open);
                assert_eq!(rule.time_slots.len(), 2);
            }
        }
    }

    #[test]
    fn test_day_of_week_serialization() {
        let json = serde_json::to_string(&DayOfWeek::Wednesday).unwrap();
        assert_eq!(json, "\"wednesday\"");
        let day: DayOfWeek = serde_json::from_str("\"saturday\"").unwrap();
        assert_eq!(day, DayOfWeek::Saturday);
    }

    #[test]
    fn test_deserialize_closed_rule_without_slots() {
        let json = r#"{"day_of_week":"sunday","is_open":false}"#;
        let rule: OpeningRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule, OpeningRule::closed(DayOfWeek::Sunday));
    }
}
