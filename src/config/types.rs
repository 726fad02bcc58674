//! Holiday table types.
//!
//! A holiday table is a list of recurring rules, either on a fixed month and
//! day or at an offset from Easter Sunday, deserialized from YAML and expanded
//! into concrete [`Holiday`] dates for a given year.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{Holiday, HolidayType};

/// A recurring holiday rule.
///
/// In YAML a fixed holiday carries `month` and `day`, an Easter-relative one
/// carries `easter_offset` (days after Easter Sunday; negative for before).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HolidayRule {
    /// A holiday on the same month and day every year.
    Fixed {
        /// Display name.
        name: String,
        /// Classification used by the auto-close policy.
        #[serde(rename = "type")]
        holiday_type: HolidayType,
        /// Month, 1 to 12.
        month: u32,
        /// Day of the month.
        day: u32,
    },
    /// A holiday that moves with Easter.
    Easter {
        /// Display name.
        name: String,
        /// Classification used by the auto-close policy.
        #[serde(rename = "type")]
        holiday_type: HolidayType,
        /// Days after Easter Sunday.
        easter_offset: i64,
    },
}

impl HolidayRule {
    /// The holiday's display name.
    pub fn name(&self) -> &str {
        match self {
            HolidayRule::Fixed { name, .. } | HolidayRule::Easter { name, .. } => name,
        }
    }

    /// The holiday's classification.
    pub fn holiday_type(&self) -> HolidayType {
        match self {
            HolidayRule::Fixed { holiday_type, .. } | HolidayRule::Easter { holiday_type, .. } => {
                *holiday_type
            }
        }
    }

    /// Returns the date the rule falls on in `year`.
    ///
    /// Returns `None` when the date does not exist that year, such as
    /// 29 February in a common year.
    pub fn date_in(&self, year: i32) -> Option<NaiveDate> {
        match self {
            HolidayRule::Fixed { month, day, .. } => NaiveDate::from_ymd_opt(year, *month, *day),
            HolidayRule::Easter { easter_offset, .. } => {
                let easter = easter_sunday(year)?;
                let days = Days::new(easter_offset.unsigned_abs());
                if *easter_offset >= 0 {
                    easter.checked_add_days(days)
                } else {
                    easter.checked_sub_days(days)
                }
            }
        }
    }

    /// Checks that a fixed rule names a real calendar day in some year.
    pub(crate) fn is_well_formed(&self) -> bool {
        match self {
            // 2024 is a leap year, so 29 February is accepted.
            HolidayRule::Fixed { month, day, .. } => {
                NaiveDate::from_ymd_opt(2024, *month, *day).is_some()
            }
            HolidayRule::Easter { easter_offset, .. } => easter_offset.abs() <= 366,
        }
    }

    fn fixed(name: &str, holiday_type: HolidayType, month: u32, day: u32) -> Self {
        HolidayRule::Fixed {
            name: name.to_string(),
            holiday_type,
            month,
            day,
        }
    }

    fn easter(name: &str, holiday_type: HolidayType, easter_offset: i64) -> Self {
        HolidayRule::Easter {
            name: name.to_string(),
            holiday_type,
            easter_offset,
        }
    }
}

/// A region's set of recurring holidays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayTable {
    /// A label for the region the table covers.
    pub region: String,
    /// The recurring holiday rules.
    #[serde(default)]
    pub holidays: Vec<HolidayRule>,
}

impl HolidayTable {
    /// Returns the built-in Italian holiday table.
    ///
    /// # Example
    ///
    /// ```
    /// use store_calendar::config::HolidayTable;
    /// use chrono::NaiveDate;
    ///
    /// let table = HolidayTable::italian();
    /// let holidays = table.holidays_for_year(2026);
    ///
    /// let easter_monday = holidays
    ///     .iter()
    ///     .find(|h| h.name == "Lunedì dell'Angelo")
    ///     .unwrap();
    /// assert_eq!(easter_monday.date, NaiveDate::from_ymd_opt(2026, 4, 6).unwrap());
    /// ```
    pub fn italian() -> Self {
        use HolidayType::{National, Religious};

        Self {
            region: "IT".to_string(),
            holidays: vec![
                HolidayRule::fixed("Capodanno", National, 1, 1),
                HolidayRule::fixed("Epifania", Religious, 1, 6),
                HolidayRule::easter("Pasqua", Religious, 0),
                HolidayRule::easter("Lunedì dell'Angelo", Religious, 1),
                HolidayRule::fixed("Festa della Liberazione", National, 4, 25),
                HolidayRule::fixed("Festa del Lavoro", National, 5, 1),
                HolidayRule::fixed("Festa della Repubblica", National, 6, 2),
                HolidayRule::fixed("Ferragosto", Religious, 8, 15),
                HolidayRule::fixed("Ognissanti", Religious, 11, 1),
                HolidayRule::fixed("Immacolata Concezione", Religious, 12, 8),
                HolidayRule::fixed("Natale", Religious, 12, 25),
                HolidayRule::fixed("Santo Stefano", Religious, 12, 26),
            ],
        }
    }

    /// Expands the table into the holidays of one year, sorted by date.
    pub fn holidays_for_year(&self, year: i32) -> Vec<Holiday> {
        let mut holidays: Vec<Holiday> = self
            .holidays
            .iter()
            .filter_map(|rule| {
                rule.date_in(year).map(|date| Holiday {
                    date,
                    name: rule.name().to_string(),
                    holiday_type: rule.holiday_type(),
                })
            })
            .collect();
        holidays.sort_by_key(|h| h.date);
        holidays
    }

    /// Returns the first rule that cannot produce a date, if any.
    pub(crate) fn first_malformed_rule(&self) -> Option<&HolidayRule> {
        self.holidays.iter().find(|rule| !rule.is_well_formed())
    }
}

/// Computes Easter Sunday for a Gregorian year.
///
/// Uses the anonymous Gregorian computus. Returns `None` only for years
/// outside chrono's supported range.
///
/// # Example
///
/// ```
/// use store_calendar::config::easter_sunday;
/// use chrono::NaiveDate;
///
/// assert_eq!(easter_sunday(2025), NaiveDate::from_ymd_opt(2025, 4, 20));
/// ```
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_easter_known_years() {
        assert_eq!(easter_sunday(2000), Some(date(2000, 4, 23)));
        assert_eq!(easter_sunday(2019), Some(date(2019, 4, 21)));
        assert_eq!(easter_sunday(2024), Some(date(2024, 3, 31)));
        assert_eq!(easter_sunday(2025), Some(date(2025, 4, 20)));
        assert_eq!(easter_sunday(2026), Some(date(2026, 4, 5)));
        assert_eq!(easter_sunday(2038), Some(date(2038, 4, 25)));
    }

    #[test]
    fn test_italian_table_has_twelve_holidays() {
        let holidays = HolidayTable::italian().holidays_for_year(2026);
        assert_eq!(holidays.len(), 12);
        assert!(holidays.windows(2).all(|w| w[0].date <= w[1].date));

        let national: Vec<&str> = holidays
            .iter()
            .filter(|h| h.holiday_type == HolidayType::National)
            .map(|h| h.name.as_str())
            .collect();
        assert_eq!(
            national,
            vec![
                "Capodanno",
                "Festa della Liberazione",
                "Festa del Lavoro",
                "Festa della Repubblica"
            ]
        );
    }

    #[test]
    fn test_easter_offsets() {
        let good_friday = HolidayRule::easter("Venerdì Santo", HolidayType::Religious, -2);
        assert_eq!(good_friday.date_in(2026), Some(date(2026, 4, 3)));

        let easter_monday = HolidayRule::easter("Pasquetta", HolidayType::Religious, 1);
        assert_eq!(easter_monday.date_in(2025), Some(date(2025, 4, 21)));
    }

    #[test]
    fn test_leap_day_rule_skipped_in_common_years() {
        let rule = HolidayRule::fixed("Leap", HolidayType::National, 2, 29);
        assert!(rule.is_well_formed());
        assert_eq!(rule.date_in(2024), Some(date(2024, 2, 29)));
        assert_eq!(rule.date_in(2025), None);
    }

    #[test]
    fn test_malformed_fixed_rule_detected() {
        let table = HolidayTable {
            region: "XX".to_string(),
            holidays: vec![HolidayRule::fixed("Nope", HolidayType::National, 2, 30)],
        };
        assert_eq!(table.first_malformed_rule().map(|r| r.name()), Some("Nope"));
    }

    #[test]
    fn test_yaml_rules_deserialize_both_shapes() {
        let yaml = r#"
region: IT-MI
holidays:
  - name: Sant'Ambrogio
    type: religious
    month: 12
    day: 7
  - name: Pasquetta
    type: religious
    easter_offset: 1
"#;
        let table: HolidayTable = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(table.region, "IT-MI");
        assert_eq!(
            table.holidays[0],
            HolidayRule::fixed("Sant'Ambrogio", HolidayType::Religious, 12, 7)
        );
        assert_eq!(
            table.holidays[1],
            HolidayRule::easter("Pasquetta", HolidayType::Religious, 1)
        );
    }
}
