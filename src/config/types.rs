//! Configuration types for tariff splitting.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files: the clock boundaries
//! of the three time-of-day bands and the recognized public-holiday
//! calendar. Both are injected configuration, not hard-coded constants.

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// Clock boundaries for the three time-of-day tariff bands.
///
/// A weekday splits into `night` (midnight to `day_start`), `normal`
/// (`day_start` to `evening_start`), `evening` (`evening_start` to
/// `night_start`) and `night` again (`night_start` to midnight). The
/// boundaries must be strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TariffBands {
    /// When the normal (daytime) band begins.
    pub day_start: NaiveTime,
    /// When the evening band begins.
    pub evening_start: NaiveTime,
    /// When the night band begins.
    pub night_start: NaiveTime,
}

impl TariffBands {
    /// Checks that the band boundaries are strictly increasing.
    pub fn validate(&self) -> EngineResult<()> {
        if self.day_start < self.evening_start && self.evening_start < self.night_start {
            Ok(())
        } else {
            Err(EngineError::InvalidTariffConfig {
                message: format!(
                    "band boundaries must satisfy day_start < evening_start < night_start, \
                     got {} / {} / {}",
                    self.day_start, self.evening_start, self.night_start
                ),
            })
        }
    }
}

impl Default for TariffBands {
    /// The band boundaries used when no configuration file is supplied:
    /// day 06:00, evening 17:00, night 23:00.
    fn default() -> Self {
        Self {
            day_start: NaiveTime::from_hms_opt(6, 0, 0).expect("valid band boundary"),
            evening_start: NaiveTime::from_hms_opt(17, 0, 0).expect("valid band boundary"),
            night_start: NaiveTime::from_hms_opt(23, 0, 0).expect("valid band boundary"),
        }
    }
}

/// A recognized public holiday.
///
/// Hours worked on a holiday are reclassified to the Sunday/holiday
/// bucket regardless of the weekday.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday (e.g., "Juledag").
    pub name: String,
}

/// Tariff configuration file structure (`tariff.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct TariffFileConfig {
    /// The time-of-day band boundaries.
    pub bands: TariffBands,
}

/// Holiday calendar file structure (`holidays.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct HolidaysFileConfig {
    /// The recognized public holidays.
    pub holidays: Vec<Holiday>,
}

/// The complete tariff configuration.
///
/// Aggregates the band boundaries and the holiday calendar. The splitter
/// takes this by reference; it is the only configuration the engine
/// consumes.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use grant_engine::config::TariffConfig;
///
/// let config = TariffConfig::default();
/// assert!(!config.is_holiday(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TariffConfig {
    bands: TariffBands,
    holidays: Vec<Holiday>,
}

impl TariffConfig {
    /// Creates a configuration from validated parts.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTariffConfig`] when the band
    /// boundaries are not strictly increasing.
    pub fn new(bands: TariffBands, holidays: Vec<Holiday>) -> EngineResult<Self> {
        bands.validate()?;
        Ok(Self { bands, holidays })
    }

    /// Returns the band boundaries.
    pub fn bands(&self) -> &TariffBands {
        &self.bands
    }

    /// Returns the holiday calendar.
    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    /// Checks whether a date is a recognized public holiday.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.iter().any(|h| h.date == date)
    }
}
