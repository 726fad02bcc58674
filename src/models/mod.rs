//! Core data models for the store calendar engine.
//!
//! This module contains the configuration document persisted per store and
//! the holiday reference data the resolver reads.

mod calendar_override;
mod holiday;
mod opening_rule;
mod settings;
mod store_config;
mod time_slot;

pub use calendar_override::{CalendarOverride, OverrideType};
pub use holiday::{Holiday, HolidayType};
pub use opening_rule::{DayOfWeek, OpeningRule};
pub use settings::{CalendarSettings, DEFAULT_PATRON_SAINT_NAME};
pub use store_config::StoreCalendarConfig;
pub use time_slot::{SlotField, TimeSlot, default_time_slots, seeded_time_slots};

pub(crate) use time_slot::hm;
