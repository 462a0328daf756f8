//! Usage aggregation over recorded time entries.
//!
//! The engine never owns storage: it reads previously recorded hours
//! through the [`UsageSource`] port, implemented by whatever persistence
//! layer stores time entries. An in-memory implementation ships with the
//! crate as the reference adapter and test double.

use chrono::{Datelike, Weekday};
use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{GrantPeriod, TimeEntry};

/// Read-only access to hours that count against a grant.
///
/// Contract: implementations sum the `total_hours` of every entry for
/// the child whose date lies within the period (inclusive on both ends)
/// and whose status counts toward the grant — `pending` and `approved`
/// entries count, `rejected` entries never do. Status filtering lives
/// here and nowhere else; the evaluator does not re-filter. When a
/// weekday filter is given, only entries falling on that weekday are
/// included. No rows means zero, not an error.
pub trait UsageSource {
    /// Sums the counted hours for a child within a period, optionally
    /// restricted to one weekday.
    fn used_hours(
        &self,
        child_id: i64,
        period: &GrantPeriod,
        weekday: Option<Weekday>,
    ) -> EngineResult<Decimal>;
}

/// An in-memory [`UsageSource`] over a list of time entries.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use grant_engine::grant::{InMemoryUsage, UsageSource};
/// use grant_engine::models::GrantPeriod;
///
/// let usage = InMemoryUsage::new();
/// let week = GrantPeriod {
///     start_date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 1, 18).unwrap(),
/// };
/// assert_eq!(usage.used_hours(1, &week, None).unwrap(), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryUsage {
    entries: Vec<TimeEntry>,
}

impl InMemoryUsage {
    /// Creates an empty usage source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a usage source over existing entries.
    pub fn with_entries(entries: Vec<TimeEntry>) -> Self {
        Self { entries }
    }

    /// Records an entry.
    pub fn push(&mut self, entry: TimeEntry) {
        self.entries.push(entry);
    }
}

impl UsageSource for InMemoryUsage {
    fn used_hours(
        &self,
        child_id: i64,
        period: &GrantPeriod,
        weekday: Option<Weekday>,
    ) -> EngineResult<Decimal> {
        let sum = self
            .entries
            .iter()
            .filter(|e| e.child_id == child_id)
            .filter(|e| e.status.counts_toward_grant())
            .filter(|e| period.contains(e.date))
            .filter(|e| weekday.is_none_or(|wd| e.date.weekday() == wd))
            .map(|e| e.total_hours)
            .sum();

        Ok(sum)
    }
}
