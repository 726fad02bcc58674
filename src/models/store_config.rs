//! Store calendar configuration aggregate.
//!
//! [`StoreCalendarConfig`] is the document persisted once per store. It owns
//! the weekly rules, the policy settings and the per-date overrides. Edits go
//! through the operations in [`crate::calendar`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar_override::CalendarOverride;
use super::opening_rule::{DayOfWeek, OpeningRule};
use super::settings::CalendarSettings;

/// The complete calendar configuration of one store.
///
/// # Example
///
/// ```
/// use store_calendar::models::{DayOfWeek, StoreCalendarConfig};
///
/// let config = StoreCalendarConfig::new_default("store_001");
/// assert_eq!(config.opening_rules.len(), 7);
/// assert!(config.rule(DayOfWeek::Monday).unwrap().is_open);
/// assert!(!config.rule(DayOfWeek::Sunday).unwrap().is_open);
/// assert!(config.overrides.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreCalendarConfig {
    /// The store this configuration belongs to.
    pub store_id: String,
    /// One rule per day of the week.
    pub opening_rules: Vec<OpeningRule>,
    /// Auto-close policy settings.
    #[serde(default)]
    pub settings: CalendarSettings,
    /// Per-date exceptions, sorted by date.
    #[serde(default)]
    pub overrides: Vec<CalendarOverride>,
}

impl StoreCalendarConfig {
    /// Creates the default configuration for a store: Monday to Saturday open
    /// 09:00–13:00 and 15:00–19:30, Sunday closed, default policy, no overrides.
    pub fn new_default(store_id: impl Into<String>) -> Self {
        Self {
            store_id: store_id.into(),
            opening_rules: OpeningRule::default_week(),
            settings: CalendarSettings::default(),
            overrides: Vec::new(),
        }
    }

    /// Returns the rule for a day of the week.
    pub fn rule(&self, day: DayOfWeek) -> Option<&OpeningRule> {
        self.opening_rules.iter().find(|r| r.day_of_week == day)
    }

    pub(crate) fn rule_mut(&mut self, day: DayOfWeek) -> Option<&mut OpeningRule> {
        self.opening_rules.iter_mut().find(|r| r.day_of_week == day)
    }

    /// Returns the override recorded for a date, if any.
    pub fn override_for(&self, date: NaiveDate) -> Option<&CalendarOverride> {
        self.overrides.iter().find(|o| o.date == date)
    }

    pub(crate) fn override_mut(&mut self, date: NaiveDate) -> Option<&mut CalendarOverride> {
        self.overrides.iter_mut().find(|o| o.date == date)
    }

    /// Orders the slots of every rule and override by start time.
    pub fn sort_slots(&mut self) {
        for rule in &mut self.opening_rules {
            rule.time_slots.sort_by_key(|s| s.start_time);
        }
        for entry in &mut self.overrides {
            entry.time_slots.sort_by_key(|s| s.start_time);
        }
    }

    /// Replaces the weekly rules and settings with another store's, keeping
    /// this store's id and overrides.
    pub fn adopt_schedule_from(&mut self, source: &StoreCalendarConfig) {
        self.opening_rules = source.opening_rules.clone();
        self.settings = source.settings.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CalendarOverride, OverrideType};

    #[test]
    fn test_override_lookup_by_date() {
        let mut config = StoreCalendarConfig::new_default("store_001");
        let date = NaiveDate::from_ymd_opt(2026, 8, 16).unwrap();
        config
            .overrides
            .push(CalendarOverride::new(date, OverrideType::Closed));

        assert!(config.override_for(date).is_some());
        assert!(config.override_for(date.succ_opt().unwrap()).is_none());
    }

    #[test]
    fn test_adopt_schedule_keeps_id_and_overrides() {
        let mut source = StoreCalendarConfig::new_default("store_a");
        source.settings.auto_close_sundays = false;
        source.opening_rules[0].is_open = false;
        source.opening_rules[0].time_slots.clear();

        let date = NaiveDate::from_ymd_opt(2026, 8, 16).unwrap();
        let mut target = StoreCalendarConfig::new_default("store_b");
        target
            .overrides
            .push(CalendarOverride::new(date, OverrideType::Closed));

        target.adopt_schedule_from(&source);

        assert_eq!(target.store_id, "store_b");
        assert_eq!(target.opening_rules, source.opening_rules);
        assert_eq!(target.settings, source.settings);
        assert_eq!(target.overrides.len(), 1);
    }

    #[test]
    fn test_sort_slots_orders_rules_and_overrides() {
        let mut config = StoreCalendarConfig::new_default("store_001");
        config.opening_rules[0].time_slots.reverse();
        let date = NaiveDate::from_ymd_opt(2026, 8, 16).unwrap();
        let mut entry = CalendarOverride::new(date, OverrideType::SpecialHours);
        entry.time_slots.reverse();
        config.overrides.push(entry);

        config.sort_slots();

        let monday = &config.opening_rules[0].time_slots;
        assert!(monday[0].start_time < monday[1].start_time);
        assert_eq!(monday[0].id, "monday-1");
        let special = &config.overrides[0].time_slots;
        assert!(special[0].start_time < special[1].start_time);
    }

    #[test]
    fn test_deserialize_without_settings_uses_defaults() {
        let config = StoreCalendarConfig::new_default("store_001");
        let mut value = serde_json::to_value(&config).unwrap();
        value.as_object_mut().unwrap().remove("settings");
        value.as_object_mut().unwrap().remove("overrides");

        let parsed: StoreCalendarConfig = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.settings, CalendarSettings::default());
        assert!(parsed.overrides.is_empty());
    }
}
