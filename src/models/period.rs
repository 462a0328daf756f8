//! Grant period model.
//!
//! This module contains the [`GrantPeriod`] type: the concrete calendar
//! date range a grant kind resolves to for a given reference date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A concrete calendar date range a grant applies to.
///
/// Both ends are inclusive. Periods are derived values: they are
/// recomputed on every evaluation and never persisted. Serde renders the
/// dates in the `YYYY-MM-DD` form the rest of the system exchanges.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use grant_engine::models::GrantPeriod;
///
/// let period = GrantPeriod {
///     start_date: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
/// };
///
/// assert!(period.contains(NaiveDate::from_ymd_opt(2026, 5, 10).unwrap()));
/// assert!(!period.contains(NaiveDate::from_ymd_opt(2026, 7, 1).unwrap()));
/// assert_eq!(period.days(), 91);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantPeriod {
    /// The first day of the period (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the period (inclusive).
    pub end_date: NaiveDate,
}

impl GrantPeriod {
    /// Creates a new period from its inclusive bounds.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Checks whether a date falls within this period.
    ///
    /// The check is inclusive of both start and end dates.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns the number of calendar days in the period, counting both
    /// ends.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_contains_is_inclusive_on_both_ends() {
        let period = GrantPeriod::new(date("2026-01-05"), date("2026-01-11"));

        assert!(period.contains(date("2026-01-05")));
        assert!(period.contains(date("2026-01-11")));
        assert!(period.contains(date("2026-01-08")));
        assert!(!period.contains(date("2026-01-04")));
        assert!(!period.contains(date("2026-01-12")));
    }

    #[test]
    fn test_days_counts_both_ends() {
        let week = GrantPeriod::new(date("2026-01-05"), date("2026-01-11"));
        assert_eq!(week.days(), 7);

        let single = GrantPeriod::new(date("2026-01-05"), date("2026-01-05"));
        assert_eq!(single.days(), 1);
    }

    #[test]
    fn test_serializes_as_calendar_date_strings() {
        let period = GrantPeriod::new(date("2026-04-01"), date("2026-06-30"));
        let json = serde_json::to_string(&period).unwrap();
        assert_eq!(
            json,
            r#"{"start_date":"2026-04-01","end_date":"2026-06-30"}"#
        );

        let back: GrantPeriod = serde_json::from_str(&json).unwrap();
        assert_eq!(back, period);
    }
}
