//! Time slot model.
//!
//! This module defines the [`TimeSlot`] struct, a single open/close interval
//! in store-local wall-clock time, along with the default opening hours used
//! to seed newly opened days and overrides.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single open interval within a day.
///
/// Times are store-local `HH:MM` wall-clock values with no timezone attached.
/// A valid slot starts strictly before it ends; see
/// [`validate_slots`](crate::calendar::validate_slots).
///
/// # Example
///
/// ```
/// use store_calendar::models::TimeSlot;
///
/// let slot = TimeSlot::parse("09:00", "13:00").unwrap();
/// assert_eq!(slot.duration_minutes(), 240);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Unique identifier for the slot.
    pub id: String,
    /// The time the store opens.
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    /// The time the store closes.
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
}

impl TimeSlot {
    /// Creates a slot with a freshly generated id.
    pub fn new(start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            start_time,
            end_time,
        }
    }

    /// Creates a slot from two `HH:MM` strings.
    ///
    /// Returns `None` if either string is not a valid time. The range itself is
    /// not checked here.
    pub fn parse(start: &str, end: &str) -> Option<Self> {
        let start_time = NaiveTime::parse_from_str(start, hhmm::FORMAT).ok()?;
        let end_time = NaiveTime::parse_from_str(end, hhmm::FORMAT).ok()?;
        Some(Self::new(start_time, end_time))
    }

    /// Returns a copy of this slot with a new id.
    pub fn with_fresh_id(&self) -> Self {
        Self::new(self.start_time, self.end_time)
    }

    /// Returns the slot length in minutes (negative if the slot is inverted).
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

/// The field of a slot being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotField {
    /// The opening time.
    StartTime,
    /// The closing time.
    EndTime,
}

impl TimeSlot {
    /// Returns a copy with one field replaced.
    pub(crate) fn with_field(&self, field: SlotField, value: NaiveTime) -> Self {
        let mut slot = self.clone();
        match field {
            SlotField::StartTime => slot.start_time = value,
            SlotField::EndTime => slot.end_time = value,
        }
        slot
    }
}

/// Returns the default opening hours: a morning session 09:00–13:00 and an
/// afternoon session 15:00–19:30, each with a fresh id.
pub fn default_time_slots() -> Vec<TimeSlot> {
    vec![
        TimeSlot::new(hm(9, 0), hm(13, 0)),
        TimeSlot::new(hm(15, 0), hm(19, 30)),
    ]
}

/// Returns the default opening hours with ids `{prefix}-1` and `{prefix}-2`.
///
/// Used for the built-in weekly schedule so that an unsaved store reads the
/// same document on every fetch.
pub fn seeded_time_slots(prefix: &str) -> Vec<TimeSlot> {
    default_time_slots()
        .into_iter()
        .enumerate()
        .map(|(i, slot)| TimeSlot {
            id: format!("{}-{}", prefix, i + 1),
            ..slot
        })
        .collect()
}

pub(crate) fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// Serde adapter for `HH:MM` times.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}
