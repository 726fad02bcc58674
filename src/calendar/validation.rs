//! Structural validation for time slots, rules, overrides and whole configurations.
//!
//! Every editor operation and every save runs through these checks. Validation
//! never coerces data: a violation is reported and the caller keeps its prior
//! state.

use std::collections::HashSet;

use crate::error::{SlotOwner, ValidationError};
use crate::models::{CalendarOverride, DayOfWeek, OpeningRule, StoreCalendarConfig, TimeSlot};

/// Validates an ordered list of time slots.
///
/// Checks, in order:
/// 1. every slot starts strictly before it ends
/// 2. once sorted by start time, each slot ends no later than the next starts
/// 3. at least one slot is present when `is_open` is true
///
/// Error indices refer to positions in `slots` as given.
///
/// # Example
///
/// ```
/// use store_calendar::calendar::validate_slots;
/// use store_calendar::error::SlotOwner;
/// use store_calendar::models::{DayOfWeek, TimeSlot};
///
/// let owner = SlotOwner::Day(DayOfWeek::Monday);
/// let ok = vec![
///     TimeSlot::parse("09:00", "13:00").unwrap(),
///     TimeSlot::parse("15:00", "19:30").unwrap(),
/// ];
/// assert!(validate_slots(owner, true, &ok).is_ok());
///
/// let overlapping = vec![
///     TimeSlot::parse("09:00", "14:00").unwrap(),
///     TimeSlot::parse("13:00", "19:00").unwrap(),
/// ];
/// assert!(validate_slots(owner, true, &overlapping).is_err());
/// ```
pub fn validate_slots(
    owner: SlotOwner,
    is_open: bool,
    slots: &[TimeSlot],
) -> Result<(), ValidationError> {
    for (index, slot) in slots.iter().enumerate() {
        if slot.start_time >= slot.end_time {
            return Err(ValidationError::InvalidRange {
                owner,
                index,
                start: slot.start_time,
                end: slot.end_time,
            });
        }
    }

    let mut order: Vec<usize> = (0..slots.len()).collect();
    order.sort_by_key(|&i| slots[i].start_time);
    for pair in order.windows(2) {
        let (previous, index) = (pair[0], pair[1]);
        if slots[previous].end_time > slots[index].start_time {
            return Err(ValidationError::Overlap {
                owner,
                index,
                start: slots[index].start_time,
                previous,
                previous_end: slots[previous].end_time,
            });
        }
    }

    if is_open && slots.is_empty() {
        return Err(ValidationError::MissingSlots { owner });
    }

    Ok(())
}

/// Validates a weekly rule: slot structure plus the open/closed invariant.
pub fn validate_rule(rule: &OpeningRule) -> Result<(), ValidationError> {
    let owner = SlotOwner::Day(rule.day_of_week);
    if !rule.is_open && !rule.time_slots.is_empty() {
        return Err(ValidationError::SlotsOnClosedDay {
            owner,
            count: rule.time_slots.len(),
        });
    }
    validate_slots(owner, rule.is_open, &rule.time_slots)
}

/// Validates an override: type/open-flag agreement plus slot structure.
pub fn validate_override(entry: &CalendarOverride) -> Result<(), ValidationError> {
    let expected_open = entry.override_type.is_open();
    if entry.is_open != expected_open {
        return Err(ValidationError::OverrideMismatch {
            date: entry.date,
            override_type: entry.override_type.to_string(),
            expected_open,
        });
    }

    let owner = SlotOwner::Override(entry.date);
    if !entry.is_open && !entry.time_slots.is_empty() {
        return Err(ValidationError::SlotsOnClosedDay {
            owner,
            count: entry.time_slots.len(),
        });
    }
    validate_slots(owner, entry.is_open, &entry.time_slots)
}

/// Validates a complete store configuration before it is persisted.
///
/// Requires exactly one rule per day of the week, a unique date per override,
/// and every rule and override individually valid.
pub fn validate_config(config: &StoreCalendarConfig) -> Result<(), ValidationError> {
    let mut seen_days = HashSet::new();
    for rule in &config.opening_rules {
        if !seen_days.insert(rule.day_of_week) {
            return Err(ValidationError::DuplicateRule {
                day: rule.day_of_week,
            });
        }
        validate_rule(rule)?;
    }
    if let Some(&day) = DayOfWeek::ALL.iter().find(|d| !seen_days.contains(d)) {
        return Err(ValidationError::MissingRule { day });
    }

    let mut seen_dates = HashSet::new();
    for entry in &config.overrides {
        if !seen_dates.insert(entry.date) {
            return Err(ValidationError::DuplicateOverride { date: entry.date });
        }
        validate_override(entry)?;
    }

    Ok(())
}
