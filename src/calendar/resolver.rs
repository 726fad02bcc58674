//! Day-status resolution.
//!
//! This module decides, for a single date, whether a store is open and with
//! which hours. Three sources are consulted in strict precedence order and the
//! first one that applies wins outright:
//!
//! 1. a per-date override
//! 2. a holiday whose classification the store auto-closes on
//! 3. the weekly rule for the date's day of the week, with Sundays suppressed
//!    while `auto_close_sundays` is on
//!
//! Policy switches suppress stored data at read time and never rewrite it, so
//! toggling a policy off reveals the previously configured hours unchanged.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult, ValidationError};
use crate::models::{CalendarSettings, DayOfWeek, Holiday, StoreCalendarConfig, TimeSlot};

use super::validation::validate_override;

/// The effective status of a store on a date.
///
/// # Example
///
/// ```
/// use store_calendar::calendar::DayStatus;
///
/// assert!(DayStatus::OverrideOpen.is_open());
/// assert!(!DayStatus::HolidayClosed.is_open());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// Open according to the weekly rule.
    Open,
    /// Closed according to the weekly rule or the Sunday policy.
    Closed,
    /// Closed because of an auto-closing holiday.
    HolidayClosed,
    /// Open according to a per-date override.
    OverrideOpen,
    /// Closed according to a per-date override.
    OverrideClosed,
}

impl DayStatus {
    /// Returns true if the store opens on the date.
    pub fn is_open(&self) -> bool {
        matches!(self, DayStatus::Open | DayStatus::OverrideOpen)
    }
}

impl std::fmt::Display for DayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayStatus::Open => write!(f, "open"),
            DayStatus::Closed => write!(f, "closed"),
            DayStatus::HolidayClosed => write!(f, "holiday_closed"),
            DayStatus::OverrideOpen => write!(f, "override_open"),
            DayStatus::OverrideClosed => write!(f, "override_closed"),
        }
    }
}

/// The resolved state of a store on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayResolution {
    /// The resolved date.
    pub date: NaiveDate,
    /// The date's day of the week.
    pub day_of_week: DayOfWeek,
    /// The effective status.
    pub status: DayStatus,
    /// The effective open intervals; empty when closed.
    pub time_slots: Vec<TimeSlot>,
    /// The holiday on this date, if any, even when it does not close the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday_name: Option<String>,
    /// The override's reason, if an override decided the status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Resolves the effective status of a store on a date.
///
/// # Arguments
///
/// * `date` - The date to resolve
/// * `config` - The store's calendar configuration
/// * `holidays` - The tenant's holidays covering `date`
///
/// # Errors
///
/// Returns [`CalendarError::DataIntegrity`] when the override for `date`
/// violates its invariants, or when the configuration has no rule for the
/// date's day of the week. Bad data is reported, never coerced.
///
/// # Example
///
/// ```
/// use store_calendar::calendar::{resolve, DayStatus};
/// use store_calendar::models::{Holiday, HolidayType, StoreCalendarConfig};
/// use chrono::NaiveDate;
///
/// let config = StoreCalendarConfig::new_default("store_001");
/// let holidays = vec![Holiday {
///     date: NaiveDate::from_ymd_opt(2026, 6, 2).unwrap(),
///     name: "Festa della Repubblica".to_string(),
///     holiday_type: HolidayType::National,
/// }];
///
/// // 2026-06-02 is a Tuesday, normally open
/// let day = resolve(NaiveDate::from_ymd_opt(2026, 6, 2).unwrap(), &config, &holidays).unwrap();
/// assert_eq!(day.status, DayStatus::HolidayClosed);
/// assert!(day.time_slots.is_empty());
///
/// let day = resolve(NaiveDate::from_ymd_opt(2026, 6, 3).unwrap(), &config, &holidays).unwrap();
/// assert_eq!(day.status, DayStatus::Open);
/// assert_eq!(day.time_slots.len(), 2);
/// ```
pub fn resolve(
    date: NaiveDate,
    config: &StoreCalendarConfig,
    holidays: &[Holiday],
) -> CalendarResult<DayResolution> {
    let day_of_week = DayOfWeek::from(date.weekday());
    let holiday = find_holiday(date, &config.settings, holidays);
    let holiday_name = holiday.as_ref().map(|h| h.name.clone());

    if let Some(entry) = config.override_for(date) {
        validate_override(entry).map_err(|e| CalendarError::DataIntegrity {
            date,
            message: e.to_string(),
        })?;
        let status = if entry.is_open {
            DayStatus::OverrideOpen
        } else {
            DayStatus::OverrideClosed
        };
        return Ok(DayResolution {
            date,
            day_of_week,
            status,
            time_slots: entry.time_slots.clone(),
            holiday_name: entry.holiday_name.clone().or(holiday_name),
            reason: entry.reason.clone(),
        });
    }

    if holiday
        .as_ref()
        .is_some_and(|h| config.settings.closes_on(h.holiday_type))
    {
        return Ok(DayResolution {
            date,
            day_of_week,
            status: DayStatus::HolidayClosed,
            time_slots: Vec::new(),
            holiday_name,
            reason: None,
        });
    }

    let rule = config
        .rule(day_of_week)
        .ok_or_else(|| CalendarError::DataIntegrity {
            date,
            message: ValidationError::MissingRule { day: day_of_week }.to_string(),
        })?;

    let suppressed = day_of_week == DayOfWeek::Sunday && config.settings.auto_close_sundays;
    let (status, time_slots) = if rule.is_open && !suppressed {
        (DayStatus::Open, rule.time_slots.clone())
    } else {
        (DayStatus::Closed, Vec::new())
    };

    Ok(DayResolution {
        date,
        day_of_week,
        status,
        time_slots,
        holiday_name,
        reason: None,
    })
}

/// Resolves every date from `from` to `to`, inclusive.
///
/// Used to drive a month grid or a week strip in one call.
///
/// # Errors
///
/// Returns a validation error if `to` is before `from`, or the first error
/// [`resolve`] reports for any date in the range.
pub fn resolve_range(
    from: NaiveDate,
    to: NaiveDate,
    config: &StoreCalendarConfig,
    holidays: &[Holiday],
) -> CalendarResult<Vec<DayResolution>> {
    if to < from {
        return Err(ValidationError::InvalidDateRange { from, to }.into());
    }
    from.iter_days()
        .take_while(|d| *d <= to)
        .map(|d| resolve(d, config, holidays))
        .collect()
}

/// Finds the holiday on `date`, including the store's patron saint's day.
///
/// When several holidays share a date, one the store closes on is preferred,
/// so a closing holiday is never hidden by an informational one.
fn find_holiday(
    date: NaiveDate,
    settings: &CalendarSettings,
    holidays: &[Holiday],
) -> Option<Holiday> {
    let mut matching: Vec<Holiday> = holidays
        .iter()
        .filter(|h| h.falls_on(date))
        .cloned()
        .collect();
    matching.extend(settings.patron_saint_holiday_on(date));
    if matching.is_empty() {
        return None;
    }

    let chosen = matching
        .iter()
        .position(|h| settings.closes_on(h.holiday_type))
        .unwrap_or(0);
    Some(matching.swap_remove(chosen))
}
