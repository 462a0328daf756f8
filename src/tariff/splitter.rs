//! Interval tariff splitting logic.
//!
//! This module partitions a worked interval into the five tariff
//! buckets: normal, evening and night by time-of-day band, with Saturday
//! and Sunday/holiday overrides at the day level. The splitter is a pure
//! function of its inputs plus the injected [`TariffConfig`]; it
//! performs no I/O.

use chrono::{NaiveDate, NaiveTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TariffConfig;
use crate::error::{EngineError, EngineResult};

use super::day_category::{DayCategory, categorize_day};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// An interval's hours partitioned into the five tariff buckets.
///
/// Invariants: all values are non-negative and `total_hours` equals the
/// sum of the five buckets, exactly — the total is built from the bucket
/// values, which are computed from an exact minute-level partition of
/// the interval.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
/// use grant_engine::config::TariffConfig;
/// use grant_engine::tariff::split_interval;
///
/// let config = TariffConfig::default();
/// // 2026-01-14 is a Wednesday; 15:00-19:00 straddles the evening boundary
/// let split = split_interval(
///     NaiveDate::from_ymd_opt(2026, 1, 14).unwrap(),
///     NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
///     &config,
/// ).unwrap();
///
/// assert_eq!(split.normal_hours, Decimal::from(2));
/// assert_eq!(split.evening_hours, Decimal::from(2));
/// assert_eq!(split.total_hours, Decimal::from(4));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffSplit {
    /// Hours in the normal (daytime) band.
    pub normal_hours: Decimal,
    /// Hours in the evening band.
    pub evening_hours: Decimal,
    /// Hours in the night band.
    pub night_hours: Decimal,
    /// Hours reclassified to the Saturday bucket.
    pub saturday_hours: Decimal,
    /// Hours reclassified to the Sunday/holiday bucket.
    pub sunday_holiday_hours: Decimal,
    /// Total hours; equals the sum of the five buckets.
    pub total_hours: Decimal,
}

/// One calendar day's share of a spanning interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySplit {
    /// The calendar day this share falls on.
    pub date: NaiveDate,
    /// The tariff split for the hours on this day.
    pub split: TariffSplit,
}

/// Splits a same-day interval into tariff buckets.
///
/// Classification works along two independent axes: the day category of
/// `date` (Saturday and Sunday/holiday override everything) and, for
/// ordinary weekdays, the configured time-of-day bands. Resolution is
/// one minute; seconds on the clock times are ignored.
///
/// # Arguments
///
/// * `date` - The calendar date of the interval
/// * `start` - The start clock time
/// * `end` - The end clock time; must be strictly after `start`
/// * `config` - The injected band boundaries and holiday calendar
///
/// # Errors
///
/// Returns [`EngineError::InvalidInterval`] when `end` is not strictly
/// after `start`. An interval that should cross midnight must be split
/// by the caller, or passed to [`split_spanning`].
pub fn split_interval(
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
    config: &TariffConfig,
) -> EngineResult<TariffSplit> {
    let start_m = minutes_of(start);
    let end_m = minutes_of(end);

    if end_m <= start_m {
        return Err(EngineError::InvalidInterval {
            message: format!(
                "end time {} must be strictly after start time {} on {}",
                end, start, date
            ),
        });
    }

    Ok(split_minutes(date, start_m, end_m, config))
}

/// Splits an interval that may cross midnight.
///
/// An interval with `end <= start` is taken to end on the following
/// calendar day. It is cut at midnight (the same policy the grant
/// evaluator's callers use for persisting entries): each side becomes a
/// same-day interval classified entirely by its own day's rules, so a
/// Friday-to-Saturday span earns Saturday hours from midnight onwards.
///
/// # Returns
///
/// One [`DaySplit`] per calendar day touched, in chronological order. A
/// span ending exactly at midnight yields a single entry.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInterval`] for a zero-length span
/// (`start == end`).
pub fn split_spanning(
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
    config: &TariffConfig,
) -> EngineResult<Vec<DaySplit>> {
    let start_m = minutes_of(start);
    let end_m = minutes_of(end);

    if start_m == end_m {
        return Err(EngineError::InvalidInterval {
            message: format!("zero-length interval at {} on {}", start, date),
        });
    }

    if start_m < end_m {
        return Ok(vec![DaySplit {
            date,
            split: split_minutes(date, start_m, end_m, config),
        }]);
    }

    let mut parts = vec![DaySplit {
        date,
        split: split_minutes(date, start_m, MINUTES_PER_DAY, config),
    }];

    if end_m > 0 {
        let next_day = date.succ_opt().expect("valid next calendar day");
        parts.push(DaySplit {
            date: next_day,
            split: split_minutes(next_day, 0, end_m, config),
        });
    }

    Ok(parts)
}

/// Splits a half-open minute range `[start_m, end_m)` within one day.
fn split_minutes(date: NaiveDate, start_m: u32, end_m: u32, config: &TariffConfig) -> TariffSplit {
    debug_assert!(start_m < end_m && end_m <= MINUTES_PER_DAY);
    let total_m = end_m - start_m;

    match categorize_day(date, config) {
        DayCategory::Saturday => {
            let hours = minutes_to_hours(total_m);
            TariffSplit {
                saturday_hours: hours,
                total_hours: hours,
                ..TariffSplit::default()
            }
        }
        DayCategory::SundayOrHoliday => {
            let hours = minutes_to_hours(total_m);
            TariffSplit {
                sunday_holiday_hours: hours,
                total_hours: hours,
                ..TariffSplit::default()
            }
        }
        DayCategory::Weekday => {
            let bands = config.bands();
            let day_m = minutes_of(bands.day_start);
            let evening_m = minutes_of(bands.evening_start);
            let night_m = minutes_of(bands.night_start);

            // The night band wraps past midnight: [night_start, 24:00)
            // plus [00:00, day_start).
            let normal = overlap(start_m, end_m, day_m, evening_m);
            let evening = overlap(start_m, end_m, evening_m, night_m);
            let night = overlap(start_m, end_m, 0, day_m)
                + overlap(start_m, end_m, night_m, MINUTES_PER_DAY);
            debug_assert_eq!(normal + evening + night, total_m);

            let normal_hours = minutes_to_hours(normal);
            let evening_hours = minutes_to_hours(evening);
            let night_hours = minutes_to_hours(night);
            TariffSplit {
                total_hours: normal_hours + evening_hours + night_hours,
                normal_hours,
                evening_hours,
                night_hours,
                ..TariffSplit::default()
            }
        }
    }
}

/// Minutes since midnight, at minute resolution.
fn minutes_of(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// The overlap in minutes between `[start, end)` and `[band_start, band_end)`.
fn overlap(start: u32, end: u32, band_start: u32, band_end: u32) -> u32 {
    end.min(band_end).saturating_sub(start.max(band_start))
}

/// Converts a minute count to hours.
fn minutes_to_hours(minutes: u32) -> Decimal {
    Decimal::new(i64::from(minutes), 0) / Decimal::new(60, 0)
}
