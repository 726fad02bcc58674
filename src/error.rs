//! Error types for the store calendar engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! [`ValidationError`] covers structural invariants on slots, rules and
//! overrides; [`CalendarError`] wraps it together with persistence, lookup and
//! holiday-table failures.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::models::DayOfWeek;

/// Identifies which part of a store configuration owns a list of time slots.
///
/// Used in error messages so that the editor can point at the offending
/// weekday or override date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOwner {
    /// The weekly opening rule for a day of the week.
    Day(DayOfWeek),
    /// The override recorded for a specific date.
    Override(NaiveDate),
}

impl fmt::Display for SlotOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotOwner::Day(day) => write!(f, "{} rule", day),
            SlotOwner::Override(date) => write!(f, "override {}", date),
        }
    }
}

/// A structural invariant was violated by a slot, rule or override.
///
/// Validation errors are always recoverable: the caller rejects the edit and
/// keeps the last valid state.
///
/// # Example
///
/// ```
/// use store_calendar::error::{SlotOwner, ValidationError};
/// use store_calendar::models::DayOfWeek;
///
/// let error = ValidationError::MissingSlots {
///     owner: SlotOwner::Day(DayOfWeek::Monday),
/// };
/// assert_eq!(error.to_string(), "monday rule is open but has no time slots");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A slot does not start strictly before it ends.
    #[error("{owner}: slot {index} starts at {start} but ends at {end}")]
    InvalidRange {
        /// Owner of the slot list.
        owner: SlotOwner,
        /// Position of the offending slot in the list.
        index: usize,
        /// Start time of the slot.
        start: NaiveTime,
        /// End time of the slot.
        end: NaiveTime,
    },

    /// Two slots overlap once sorted by start time.
    #[error("{owner}: slot {index} starting at {start} overlaps slot {previous} ending at {previous_end}")]
    Overlap {
        /// Owner of the slot list.
        owner: SlotOwner,
        /// Position of the later slot in the list.
        index: usize,
        /// Start time of the later slot.
        start: NaiveTime,
        /// Position of the earlier slot in the list.
        previous: usize,
        /// End time of the earlier slot.
        previous_end: NaiveTime,
    },

    /// An open day or override has no time slots.
    #[error("{owner} is open but has no time slots")]
    MissingSlots {
        /// Owner of the slot list.
        owner: SlotOwner,
    },

    /// A closed day or override still carries time slots.
    #[error("{owner} is closed but has {count} time slots")]
    SlotsOnClosedDay {
        /// Owner of the slot list.
        owner: SlotOwner,
        /// Number of slots found.
        count: usize,
    },

    /// An override's type disagrees with its open flag.
    #[error("override {date}: type '{override_type}' requires is_open = {expected_open}")]
    OverrideMismatch {
        /// Date of the override.
        date: NaiveDate,
        /// The declared override type.
        override_type: String,
        /// The open flag the type requires.
        expected_open: bool,
    },

    /// The referenced slot does not exist.
    #[error("{owner}: no slot with id '{slot_id}'")]
    SlotNotFound {
        /// Owner of the slot list.
        owner: SlotOwner,
        /// The slot id that was not found.
        slot_id: String,
    },

    /// Removing the slot would leave an open day without hours.
    #[error("{owner}: cannot remove the last slot while open")]
    LastSlot {
        /// Owner of the slot list.
        owner: SlotOwner,
    },

    /// Slots cannot be added to a closed day.
    #[error("{owner} is closed; open it before adding slots")]
    DayClosed {
        /// Owner of the slot list.
        owner: SlotOwner,
    },

    /// There is no room left in the day for another slot.
    #[error("{owner}: no room for another slot after {after}")]
    NoRoomForSlot {
        /// Owner of the slot list.
        owner: SlotOwner,
        /// End time of the last existing slot.
        after: NaiveTime,
    },

    /// No opening rule exists for a day of the week.
    #[error("no opening rule for {day}")]
    MissingRule {
        /// The day without a rule.
        day: DayOfWeek,
    },

    /// More than one opening rule exists for a day of the week.
    #[error("duplicate opening rule for {day}")]
    DuplicateRule {
        /// The day with more than one rule.
        day: DayOfWeek,
    },

    /// More than one override exists for a date.
    #[error("duplicate override for {date}")]
    DuplicateOverride {
        /// The date with more than one override.
        date: NaiveDate,
    },

    /// No override exists for a date.
    #[error("no override for {date}")]
    OverrideNotFound {
        /// The date without an override.
        date: NaiveDate,
    },

    /// The override has a type that does not accept the operation.
    #[error("override {date} is '{override_type}'; only special_hours overrides carry slots")]
    WrongOverrideType {
        /// Date of the override.
        date: NaiveDate,
        /// The override's current type.
        override_type: String,
    },

    /// A date range ends before it starts.
    #[error("date range {from} to {to} ends before it starts")]
    InvalidDateRange {
        /// First date of the range.
        from: NaiveDate,
        /// Last date of the range.
        to: NaiveDate,
    },
}

/// The main error type for the store calendar engine.
///
/// No variant is fatal to the process; each is scoped to the configuration
/// operation that raised it.
///
/// # Example
///
/// ```
/// use store_calendar::error::CalendarError;
///
/// let error = CalendarError::ConfigNotFound {
///     store_id: "store_001".to_string(),
/// };
/// assert_eq!(error.to_string(), "No calendar configuration for store 'store_001'");
/// ```
#[derive(Debug, Error)]
pub enum CalendarError {
    /// A structural invariant was violated.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No configuration has been stored for the store yet.
    #[error("No calendar configuration for store '{store_id}'")]
    ConfigNotFound {
        /// The store without a configuration.
        store_id: String,
    },

    /// The persistence collaborator failed to load or save.
    #[error("Persistence failed for store '{store_id}': {message}")]
    Persistence {
        /// The store whose load or save failed.
        store_id: String,
        /// A description of the failure.
        message: String,
    },

    /// One or more targets failed during configuration propagation.
    #[error("Propagation failed for {} store(s): {}", .failed.len(), .failed.join(", "))]
    PartialPropagation {
        /// The target stores that were not updated.
        failed: Vec<String>,
    },

    /// Stored data violates an invariant that should have been enforced at write time.
    #[error("Data integrity error on {date}: {message}")]
    DataIntegrity {
        /// The date being resolved.
        date: NaiveDate,
        /// A description of the violated invariant.
        message: String,
    },

    /// A holiday table file or directory was not found.
    #[error("Holiday table not found: {path}")]
    HolidayTableNotFound {
        /// The path that was not found.
        path: String,
    },

    /// A holiday table file could not be parsed.
    #[error("Failed to parse holiday table '{path}': {message}")]
    HolidayTableParse {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A server setting read from the environment has an invalid value.
    #[error("Invalid value '{value}' for {name}: {message}")]
    InvalidSetting {
        /// The environment variable.
        name: String,
        /// The rejected value.
        value: String,
        /// Why the value was rejected.
        message: String,
    },
}

/// A type alias for Results that return CalendarError.
pub type CalendarResult<T> = Result<T, CalendarError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    #[test]
    fn test_config_not_found_displays_store() {
        let error = CalendarError::ConfigNotFound {
            store_id: "store_001".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "No calendar configuration for store 'store_001'"
        );
    }

    #[test]
    fn test_invalid_range_names_owner_and_index() {
        let error = ValidationError::InvalidRange {
            owner: SlotOwner::Day(DayOfWeek::Tuesday),
            index: 1,
            start: time("14:00"),
            end: time("13:00"),
        };
        assert_eq!(
            error.to_string(),
            "tuesday rule: slot 1 starts at 14:00:00 but ends at 13:00:00"
        );
    }

    #[test]
    fn test_override_owner_display() {
        let owner = SlotOwner::Override(NaiveDate::from_ymd_opt(2025, 12, 25).unwrap());
        assert_eq!(owner.to_string(), "override 2025-12-25");
    }

    #[test]
    fn test_partial_propagation_lists_failed_stores() {
        let error = CalendarError::PartialPropagation {
            failed: vec!["store_b".to_string(), "store_c".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "Propagation failed for 2 store(s): store_b, store_c"
        );
    }

    #[test]
    fn test_validation_error_converts_with_question_mark() {
        fn fails() -> Result<(), ValidationError> {
            Err(ValidationError::MissingRule {
                day: DayOfWeek::Friday,
            })
        }

        fn propagates() -> CalendarResult<()> {
            fails()?;
            Ok(())
        }

        match propagates() {
            Err(CalendarError::Validation(ValidationError::MissingRule { day })) => {
                assert_eq!(day, DayOfWeek::Friday);
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<CalendarError>();
        assert_error::<ValidationError>();
    }
}
