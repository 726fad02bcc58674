//! Per-date override editing operations.
//!
//! Overrides are kept sorted by date with at most one entry per date. Slot
//! edits are only accepted on `special_hours` overrides and follow the same
//! rules as the weekly editor.

use chrono::{NaiveDate, NaiveTime};

use crate::error::{SlotOwner, ValidationError};
use crate::models::{
    CalendarOverride, OverrideType, SlotField, StoreCalendarConfig, TimeSlot, default_time_slots,
};

use super::slots;

impl StoreCalendarConfig {
    /// Creates an override for `date`, or changes the type of the existing one.
    ///
    /// Switching to `special_hours` seeds the default sessions when the
    /// override has none; switching to `closed` or `holiday` clears its slots.
    /// Reason and holiday name are kept across type changes.
    ///
    /// # Example
    ///
    /// ```
    /// use store_calendar::models::{OverrideType, StoreCalendarConfig};
    /// use chrono::NaiveDate;
    ///
    /// let mut config = StoreCalendarConfig::new_default("store_001");
    /// let date = NaiveDate::from_ymd_opt(2026, 12, 24).unwrap();
    ///
    /// config.set_override(date, OverrideType::Closed);
    /// let entry = config.set_override(date, OverrideType::SpecialHours);
    /// assert!(entry.is_open);
    /// assert_eq!(entry.time_slots.len(), 2);
    /// ```
    pub fn set_override(&mut self, date: NaiveDate, override_type: OverrideType) -> &CalendarOverride {
        let index = match self.overrides.iter().position(|o| o.date == date) {
            Some(index) => {
                let entry = &mut self.overrides[index];
                entry.override_type = override_type;
                entry.is_open = override_type.is_open();
                if entry.is_open {
                    if entry.time_slots.is_empty() {
                        entry.time_slots = default_time_slots();
                    }
                } else {
                    entry.time_slots.clear();
                }
                index
            }
            None => {
                let index = self.overrides.partition_point(|o| o.date < date);
                self.overrides
                    .insert(index, CalendarOverride::new(date, override_type));
                index
            }
        };
        &self.overrides[index]
    }

    /// Deletes the override for `date`, returning it if one existed.
    ///
    /// The date then resolves through holidays and the weekly rule again.
    pub fn remove_override(&mut self, date: NaiveDate) -> Option<CalendarOverride> {
        let index = self.overrides.iter().position(|o| o.date == date)?;
        Some(self.overrides.remove(index))
    }

    /// Sets the free-text reason of an override. Blank text clears it.
    pub fn set_override_reason(
        &mut self,
        date: NaiveDate,
        text: &str,
    ) -> Result<(), ValidationError> {
        let entry = self
            .override_mut(date)
            .ok_or(ValidationError::OverrideNotFound { date })?;
        entry.reason = non_blank(text);
        Ok(())
    }

    /// Sets the display name of an override. Blank text clears it.
    pub fn set_override_holiday_name(
        &mut self,
        date: NaiveDate,
        name: &str,
    ) -> Result<(), ValidationError> {
        let entry = self
            .override_mut(date)
            .ok_or(ValidationError::OverrideNotFound { date })?;
        entry.holiday_name = non_blank(name);
        Ok(())
    }

    fn special_hours_slots(&mut self, date: NaiveDate) -> Result<&mut Vec<TimeSlot>, ValidationError> {
        let entry = self
            .override_mut(date)
            .ok_or(ValidationError::OverrideNotFound { date })?;
        if entry.override_type != OverrideType::SpecialHours {
            return Err(ValidationError::WrongOverrideType {
                date,
                override_type: entry.override_type.to_string(),
            });
        }
        Ok(&mut entry.time_slots)
    }

    /// Appends a slot to a `special_hours` override and returns it.
    pub fn add_override_slot(&mut self, date: NaiveDate) -> Result<TimeSlot, ValidationError> {
        let list = self.special_hours_slots(date)?;
        slots::add_slot(SlotOwner::Override(date), list)
    }

    /// Removes a slot from a `special_hours` override; the last slot stays.
    pub fn remove_override_slot(
        &mut self,
        date: NaiveDate,
        slot_id: &str,
    ) -> Result<TimeSlot, ValidationError> {
        let list = self.special_hours_slots(date)?;
        slots::remove_slot(SlotOwner::Override(date), list, slot_id)
    }

    /// Changes the start or end time of one override slot after re-validation.
    pub fn update_override_slot(
        &mut self,
        date: NaiveDate,
        slot_id: &str,
        field: SlotField,
        value: NaiveTime,
    ) -> Result<(), ValidationError> {
        let list = self.special_hours_slots(date)?;
        slots::update_slot(SlotOwner::Override(date), list, slot_id, field, value)
    }
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{validate_config, validate_override};
    use crate::models::hm;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn config() -> StoreCalendarConfig {
        StoreCalendarConfig::new_default("store_001")
    }

    #[test]
    fn test_overrides_kept_sorted_and_unique() {
        let mut config = config();
        config.set_override(date("2026-12-31"), OverrideType::Closed);
        config.set_override(date("2026-01-06"), OverrideType::Holiday);
        config.set_override(date("2026-08-16"), OverrideType::SpecialHours);
        config.set_override(date("2026-01-06"), OverrideType::Closed);

        let dates: Vec<NaiveDate> = config.overrides.iter().map(|o| o.date).collect();
        assert_eq!(
            dates,
            vec![date("2026-01-06"), date("2026-08-16"), date("2026-12-31")]
        );
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_retype_to_closed_clears_slots_and_keeps_reason() {
        let mut config = config();
        let d = date("2026-03-14");
        config.set_override(d, OverrideType::SpecialHours);
        config.set_override_reason(d, "Inventario").unwrap();

        let entry = config.set_override(d, OverrideType::Closed).clone();
        assert!(!entry.is_open);
        assert!(entry.time_slots.is_empty());
        assert_eq!(entry.reason.as_deref(), Some("Inventario"));
        assert!(validate_override(&entry).is_ok());
    }

    #[test]
    fn test_retype_to_special_hours_seeds_slots() {
        let mut config = config();
        let d = date("2026-03-14");
        config.set_override(d, OverrideType::Holiday);
        let entry = config.set_override(d, OverrideType::SpecialHours);
        assert!(entry.is_open);
        assert_eq!(entry.time_slots.len(), 2);
    }

    #[test]
    fn test_remove_override() {
        let mut config = config();
        let d = date("2026-03-14");
        config.set_override(d, OverrideType::Closed);
        let removed = config.remove_override(d).unwrap();
        assert_eq!(removed.date, d);
        assert!(config.override_for(d).is_none());
        assert!(config.remove_override(d).is_none());
    }

    #[test]
    fn test_reason_requires_existing_override() {
        let mut config = config();
        let d = date("2026-03-14");
        assert_eq!(
            config.set_override_reason(d, "anything"),
            Err(ValidationError::OverrideNotFound { date: d })
        );
    }

    #[test]
    fn test_blank_reason_clears_it() {
        let mut config = config();
        let d = date("2026-03-14");
        config.set_override(d, OverrideType::Closed);
        config.set_override_reason(d, "Inventario").unwrap();
        config.set_override_reason(d, "   ").unwrap();
        assert!(config.override_for(d).unwrap().reason.is_none());
    }

    #[test]
    fn test_holiday_name_metadata() {
        let mut config = config();
        let d = date("2026-03-14");
        config.set_override(d, OverrideType::Holiday);
        config.set_override_holiday_name(d, "Festa patronale").unwrap();
        assert_eq!(
            config.override_for(d).unwrap().holiday_name.as_deref(),
            Some("Festa patronale")
        );
    }

    #[test]
    fn test_slot_edits_rejected_on_closed_override() {
        let mut config = config();
        let d = date("2026-03-14");
        config.set_override(d, OverrideType::Closed);
        assert!(matches!(
            config.add_override_slot(d),
            Err(ValidationError::WrongOverrideType { .. })
        ));
    }

    #[test]
    fn test_override_slot_lifecycle() {
        let mut config = config();
        let d = date("2026-12-24");
        config.set_override(d, OverrideType::SpecialHours);

        let added = config.add_override_slot(d).unwrap();
        assert_eq!(config.override_for(d).unwrap().time_slots.len(), 3);

        config
            .update_override_slot(d, &added.id, SlotField::EndTime, hm(23, 0))
            .unwrap();
        config.remove_override_slot(d, &added.id).unwrap();

        let ids: Vec<String> = config
            .override_for(d)
            .unwrap()
            .time_slots
            .iter()
            .map(|s| s.id.clone())
            .collect();
        config.remove_override_slot(d, &ids[0]).unwrap();
        assert!(matches!(
            config.remove_override_slot(d, &ids[1]),
            Err(ValidationError::LastSlot { .. })
        ));
        assert!(validate_override(config.override_for(d).unwrap()).is_ok());
    }

    #[test]
    fn test_override_slot_overlap_rejected() {
        let mut config = config();
        let d = date("2026-12-24");
        config.set_override(d, OverrideType::SpecialHours);
        let before = config.clone();
        let id = config.override_for(d).unwrap().time_slots[1].id.clone();

        let result = config.update_override_slot(d, &id, SlotField::StartTime, hm(12, 0));
        assert!(matches!(result, Err(ValidationError::Overlap { .. })));
        assert_eq!(config, before);
    }

    #[test]
    fn test_slot_edit_on_missing_override() {
        let mut config = config();
        let d = date("2026-12-24");
        assert_eq!(
            config.add_override_slot(d),
            Err(ValidationError::OverrideNotFound { date: d })
        );
    }
}
