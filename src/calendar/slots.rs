//! Slot-list edits shared by the weekly rule editor and the override editor.
//!
//! Each edit is computed on a copy and validated before it replaces the
//! caller's list, so a rejected edit leaves the list untouched.

use chrono::{NaiveTime, Timelike};

use crate::error::{SlotOwner, ValidationError};
use crate::models::{SlotField, TimeSlot, hm};

use super::validation::validate_slots;

const GAP_MINUTES: u32 = 60;
const NEW_SLOT_MINUTES: u32 = 120;
const LAST_MINUTE: u32 = 23 * 60 + 59;

fn minutes(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

fn from_minutes(total: u32) -> NaiveTime {
    hm(total / 60, total % 60)
}

/// Appends a slot one hour after the latest closing time, two hours long and
/// clamped to 23:59.
pub(super) fn add_slot(
    owner: SlotOwner,
    slots: &mut Vec<TimeSlot>,
) -> Result<TimeSlot, ValidationError> {
    let latest_end = slots.iter().map(|s| s.end_time).max();
    let slot = match latest_end {
        None => TimeSlot::new(hm(9, 0), hm(13, 0)),
        Some(after) => {
            let start = minutes(after) + GAP_MINUTES;
            let end = (start + NEW_SLOT_MINUTES).min(LAST_MINUTE);
            if start >= end {
                return Err(ValidationError::NoRoomForSlot { owner, after });
            }
            TimeSlot::new(from_minutes(start), from_minutes(end))
        }
    };

    let mut candidate = slots.clone();
    candidate.push(slot.clone());
    validate_slots(owner, true, &candidate)?;
    *slots = candidate;
    Ok(slot)
}

/// Removes a slot, refusing to remove the last one.
pub(super) fn remove_slot(
    owner: SlotOwner,
    slots: &mut Vec<TimeSlot>,
    slot_id: &str,
) -> Result<TimeSlot, ValidationError> {
    let index = slots
        .iter()
        .position(|s| s.id == slot_id)
        .ok_or_else(|| ValidationError::SlotNotFound {
            owner,
            slot_id: slot_id.to_string(),
        })?;
    if slots.len() == 1 {
        return Err(ValidationError::LastSlot { owner });
    }
    Ok(slots.remove(index))
}

/// Changes one field of a slot, then keeps the list sorted by start time.
pub(super) fn update_slot(
    owner: SlotOwner,
    slots: &mut Vec<TimeSlot>,
    slot_id: &str,
    field: SlotField,
    value: NaiveTime,
) -> Result<(), ValidationError> {
    let index = slots
        .iter()
        .position(|s| s.id == slot_id)
        .ok_or_else(|| ValidationError::SlotNotFound {
            owner,
            slot_id: slot_id.to_string(),
        })?;

    let mut candidate = slots.clone();
    candidate[index] = candidate[index].with_field(field, value);
    validate_slots(owner, true, &candidate)?;
    candidate.sort_by_key(|s| s.start_time);
    *slots = candidate;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayOfWeek, default_time_slots};

    fn owner() -> SlotOwner {
        SlotOwner::Day(DayOfWeek::Tuesday)
    }

    #[test]
    fn test_add_after_default_sessions() {
        let mut slots = default_time_slots();
        let added = add_slot(owner(), &mut slots).unwrap();
        assert_eq!(added.start_time, hm(20, 30));
        assert_eq!(added.end_time, hm(22, 30));
        assert_eq!(slots.len(), 3);
    }

    #[test]
    fn test_add_clamps_to_end_of_day() {
        let mut slots = vec![TimeSlot::parse("09:00", "22:00").unwrap()];
        let added = add_slot(owner(), &mut slots).unwrap();
        assert_eq!(added.start_time, hm(23, 0));
        assert_eq!(added.end_time, hm(23, 59));
    }

    #[test]
    fn test_add_without_room_rejected() {
        let mut slots = vec![TimeSlot::parse("09:00", "23:00").unwrap()];
        let before = slots.clone();
        assert!(matches!(
            add_slot(owner(), &mut slots),
            Err(ValidationError::NoRoomForSlot { .. })
        ));
        assert_eq!(slots, before);
    }

    #[test]
    fn test_update_rejects_overlap_and_keeps_state() {
        let mut slots = default_time_slots();
        let before = slots.clone();
        let id = slots[0].id.clone();
        let result = update_slot(owner(), &mut slots, &id, SlotField::EndTime, hm(16, 0));
        assert!(matches!(result, Err(ValidationError::Overlap { .. })));
        assert_eq!(slots, before);
    }

    #[test]
    fn test_update_leaves_slots_sorted() {
        let mut slots = vec![
            TimeSlot::parse("15:00", "19:30").unwrap(),
            TimeSlot::parse("09:00", "13:00").unwrap(),
        ];
        let id = slots[0].id.clone();
        update_slot(owner(), &mut slots, &id, SlotField::EndTime, hm(19, 0)).unwrap();
        assert_eq!(slots[0].start_time, hm(9, 0));
        assert_eq!(slots[1].id, id);
        assert_eq!(slots[1].end_time, hm(19, 0));
    }

    #[test]
    fn test_remove_unknown_slot() {
        let mut slots = default_time_slots();
        assert!(matches!(
            remove_slot(owner(), &mut slots, "missing"),
            Err(ValidationError::SlotNotFound { .. })
        ));
    }

    #[test]
    fn test_remove_last_slot_rejected() {
        let mut slots = vec![TimeSlot::parse("09:00", "13:00").unwrap()];
        let id = slots[0].id.clone();
        assert_eq!(
            remove_slot(owner(), &mut slots, &id),
            Err(ValidationError::LastSlot { owner: owner() })
        );
        assert_eq!(slots.len(), 1);
    }
}
