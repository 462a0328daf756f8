//! Day categorisation for tariff splitting.
//!
//! This module determines which calendar-day override applies to a date:
//! Saturday hours and Sunday/holiday hours are paid from their own
//! buckets regardless of the time of day.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::config::TariffConfig;

/// The day-level tariff category of a calendar date.
///
/// Day categorisation takes precedence over time-of-day banding: all
/// hours on a Saturday belong to the Saturday bucket, and all hours on a
/// Sunday or recognized public holiday belong to the Sunday/holiday
/// bucket.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use grant_engine::config::TariffConfig;
/// use grant_engine::tariff::{DayCategory, categorize_day};
///
/// let config = TariffConfig::default();
/// // 2026-01-17 is a Saturday
/// let saturday = NaiveDate::from_ymd_opt(2026, 1, 17).unwrap();
/// assert_eq!(categorize_day(saturday, &config), DayCategory::Saturday);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayCategory {
    /// Monday through Friday - time-of-day bands apply.
    Weekday,
    /// Saturday - all hours go to the Saturday bucket.
    Saturday,
    /// Sunday or public holiday - all hours go to the Sunday/holiday
    /// bucket.
    SundayOrHoliday,
}

impl std::fmt::Display for DayCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayCategory::Weekday => write!(f, "Weekday"),
            DayCategory::Saturday => write!(f, "Saturday"),
            DayCategory::SundayOrHoliday => write!(f, "SundayOrHoliday"),
        }
    }
}

/// Determines the day category for a date.
///
/// The holiday calendar wins over the weekday: a public holiday falling
/// on a Saturday is categorised as Sunday/holiday.
pub fn categorize_day(date: NaiveDate, config: &TariffConfig) -> DayCategory {
    if config.is_holiday(date) {
        return DayCategory::SundayOrHoliday;
    }
    match date.weekday() {
        Weekday::Sat => DayCategory::Saturday,
        Weekday::Sun => DayCategory::SundayOrHoliday,
        _ => DayCategory::Weekday,
    }
}
