//! Time entry model and review status.
//!
//! A time entry is one worked interval for one child on one calendar
//! date, with its hours already split into the five tariff buckets. The
//! engine reads entries through the usage aggregator; creating, approving
//! and rejecting them belongs to the external CRUD layer.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::tariff::TariffSplit;

/// The review status of a time entry.
///
/// Both `Pending` and `Approved` entries count toward grant usage;
/// `Rejected` entries never do.
///
/// # Example
///
/// ```
/// use grant_engine::models::EntryStatus;
///
/// assert!(EntryStatus::Pending.counts_toward_grant());
/// assert!(EntryStatus::Approved.counts_toward_grant());
/// assert!(!EntryStatus::Rejected.counts_toward_grant());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Submitted, awaiting review.
    Pending,
    /// Approved by an administrator.
    Approved,
    /// Rejected by an administrator.
    Rejected,
}

impl EntryStatus {
    /// Whether an entry with this status consumes grant hours.
    pub fn counts_toward_grant(&self) -> bool {
        matches!(self, EntryStatus::Pending | EntryStatus::Approved)
    }
}

/// A recorded worked interval with its tariff-bucketed hours.
///
/// Invariant: `total_hours` equals the sum of the five tariff-hour
/// fields. [`TimeEntry::from_split`] maintains this by construction;
/// entries arriving from the store can be checked with
/// [`TimeEntry::tariff_sum`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// The store's identifier for the entry.
    pub id: i64,
    /// The caregiver who worked the interval.
    pub caregiver_id: i64,
    /// The child the hours count against.
    pub child_id: i64,
    /// The calendar date of the interval.
    pub date: NaiveDate,
    /// The start clock time.
    pub start_time: NaiveTime,
    /// The end clock time.
    pub end_time: NaiveTime,
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
    /// The review status.
    pub status: EntryStatus,
}

impl TimeEntry {
    /// Builds a pending entry from a splitter result, keeping the
    /// total-equals-sum invariant by construction.
    pub fn from_split(
        id: i64,
        caregiver_id: i64,
        child_id: i64,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        split: &TariffSplit,
    ) -> Self {
        Self {
            id,
            caregiver_id,
            child_id,
            date,
            start_time,
            end_time,
            normal_hours: split.normal_hours,
            evening_hours: split.evening_hours,
            night_hours: split.night_hours,
            saturday_hours: split.saturday_hours,
            sunday_holiday_hours: split.sunday_holiday_hours,
            total_hours: split.total_hours,
            status: EntryStatus::Pending,
        }
    }

    /// Returns the sum of the five tariff-hour fields.
    ///
    /// For a well-formed entry this equals `total_hours`.
    pub fn tariff_sum(&self) -> Decimal {
        self.normal_hours
            + self.evening_hours
            + self.night_hours
            + self.saturday_hours
            + self.sunday_holiday_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_status_counts_toward_grant() {
        assert!(EntryStatus::Pending.counts_toward_grant());
        assert!(EntryStatus::Approved.counts_toward_grant());
        assert!(!EntryStatus::Rejected.counts_toward_grant());
    }

    #[test]
    fn test_status_serde_uses_snake_case() {
        assert_eq!(
            serde_json::to_string(&EntryStatus::Pending).unwrap(),
            "\"pending\""
        );
        let back: EntryStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(back, EntryStatus::Rejected);
    }

    #[test]
    fn test_from_split_keeps_total_invariant() {
        let split = TariffSplit {
            normal_hours: dec("2.0"),
            evening_hours: dec("1.5"),
            night_hours: Decimal::ZERO,
            saturday_hours: Decimal::ZERO,
            sunday_holiday_hours: Decimal::ZERO,
            total_hours: dec("3.5"),
        };

        let entry = TimeEntry::from_split(
            1,
            10,
            20,
            date("2026-01-14"),
            time("15:00"),
            time("18:30"),
            &split,
        );

        assert_eq!(entry.status, EntryStatus::Pending);
        assert_eq!(entry.total_hours, dec("3.5"));
        assert_eq!(entry.tariff_sum(), entry.total_hours);
    }

    #[test]
    fn test_entry_round_trips_through_serde() {
        let split = TariffSplit {
            normal_hours: dec("8.0"),
            evening_hours: Decimal::ZERO,
            night_hours: Decimal::ZERO,
            saturday_hours: Decimal::ZERO,
            sunday_holiday_hours: Decimal::ZERO,
            total_hours: dec("8.0"),
        };
        let entry = TimeEntry::from_split(
            2,
            11,
            21,
            date("2026-01-15"),
            time("08:00"),
            time("16:00"),
            &split,
        );

        let json = serde_json::to_string(&entry).unwrap();
        let back: TimeEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
