//! Weekly rule set editing operations.
//!
//! These operations mutate a [`StoreCalendarConfig`] in memory. Each one either
//! commits a state that satisfies the rule invariants or returns a
//! [`ValidationError`] and leaves the configuration unchanged.

use chrono::NaiveTime;

use crate::error::{SlotOwner, ValidationError};
use crate::models::{
    DayOfWeek, OpeningRule, SlotField, StoreCalendarConfig, TimeSlot, default_time_slots,
};

use super::slots;
use super::validation::validate_rule;

impl StoreCalendarConfig {
    fn rule_for_edit(&mut self, day: DayOfWeek) -> Result<&mut OpeningRule, ValidationError> {
        self.rule_mut(day)
            .ok_or(ValidationError::MissingRule { day })
    }

    /// Opens or closes a day.
    ///
    /// Opening a day with no slots seeds the default sessions, so a day is
    /// never open without hours. Closing a day clears its slots.
    ///
    /// # Example
    ///
    /// ```
    /// use store_calendar::models::{DayOfWeek, StoreCalendarConfig};
    ///
    /// let mut config = StoreCalendarConfig::new_default("store_001");
    /// config.set_day_open(DayOfWeek::Monday, false).unwrap();
    /// config.set_day_open(DayOfWeek::Monday, true).unwrap();
    ///
    /// let monday = config.rule(DayOfWeek::Monday).unwrap();
    /// assert!(monday.is_open);
    /// assert_eq!(monday.time_slots.len(), 2);
    /// ```
    pub fn set_day_open(&mut self, day: DayOfWeek, is_open: bool) -> Result<(), ValidationError> {
        let rule = self.rule_for_edit(day)?;
        if is_open {
            if rule.time_slots.is_empty() {
                rule.time_slots = default_time_slots();
            }
            rule.is_open = true;
        } else {
            rule.is_open = false;
            rule.time_slots.clear();
        }
        Ok(())
    }

    /// Appends a slot to an open day and returns it.
    ///
    /// The new slot starts one hour after the day's latest closing time and
    /// lasts two hours, clamped to 23:59.
    pub fn add_slot(&mut self, day: DayOfWeek) -> Result<TimeSlot, ValidationError> {
        let owner = SlotOwner::Day(day);
        let rule = self.rule_for_edit(day)?;
        if !rule.is_open {
            return Err(ValidationError::DayClosed { owner });
        }
        slots::add_slot(owner, &mut rule.time_slots)
    }

    /// Removes a slot from a day. The last slot of an open day cannot be removed.
    pub fn remove_slot(
        &mut self,
        day: DayOfWeek,
        slot_id: &str,
    ) -> Result<TimeSlot, ValidationError> {
        let owner = SlotOwner::Day(day);
        let rule = self.rule_for_edit(day)?;
        slots::remove_slot(owner, &mut rule.time_slots, slot_id)
    }

    /// Changes the start or end time of one slot after re-validating the day.
    pub fn update_slot(
        &mut self,
        day: DayOfWeek,
        slot_id: &str,
        field: SlotField,
        value: NaiveTime,
    ) -> Result<(), ValidationError> {
        let owner = SlotOwner::Day(day);
        let rule = self.rule_for_edit(day)?;
        slots::update_slot(owner, &mut rule.time_slots, slot_id, field, value)
    }

    /// Copies one day's open state and hours onto every other day.
    ///
    /// Each copied slot gets a fresh id. Sunday is skipped while
    /// `auto_close_sundays` is on, since the policy already decides its
    /// effective state. Returns the days that were written.
    pub fn copy_day_to_all(
        &mut self,
        source_day: DayOfWeek,
    ) -> Result<Vec<DayOfWeek>, ValidationError> {
        let source = self
            .rule(source_day)
            .cloned()
            .ok_or(ValidationError::MissingRule { day: source_day })?;
        validate_rule(&source)?;

        let skip_sunday = self.settings.auto_close_sundays;
        let mut written = Vec::new();
        for rule in self.opening_rules.iter_mut() {
            let day = rule.day_of_week;
            if day == source_day || (skip_sunday && day == DayOfWeek::Sunday) {
                continue;
            }
            rule.is_open = source.is_open;
            rule.time_slots = source.time_slots.iter().map(TimeSlot::with_fresh_id).collect();
            written.push(day);
        }
        Ok(written)
    }
}
