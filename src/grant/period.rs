//! Calendar period resolution.
//!
//! This module computes the concrete `[start, end]` date range a grant
//! kind covers for a given reference date. Dates are pure calendar
//! values: no timezone is involved, and the reference date always
//! belongs to the returned period.

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::models::{GrantKind, GrantPeriod};

/// Resolves the grant period containing a reference date.
///
/// Rules:
/// - `Week` / `SpecificWeekdays`: Monday through Sunday of the
///   reference date's week.
/// - `Month`: first through last calendar day of the reference month.
/// - `Quarter`: one of the four fixed three-month windows of the
///   reference year (Jan–Mar, Apr–Jun, Jul–Sep, Oct–Dec).
/// - `HalfYear`: Jan 1–Jun 30 or Jul 1–Dec 31.
/// - `Year`: Jan 1–Dec 31 of the reference year.
///
/// The function is total: [`GrantKind`] is a closed enum, so an unknown
/// kind cannot reach this point (it is rejected when the stored string
/// is parsed).
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use grant_engine::grant::resolve_period;
/// use grant_engine::models::GrantKind;
///
/// let reference = NaiveDate::from_ymd_opt(2026, 5, 10).unwrap();
/// let period = resolve_period(GrantKind::Quarter, reference);
///
/// assert_eq!(period.start_date, NaiveDate::from_ymd_opt(2026, 4, 1).unwrap());
/// assert_eq!(period.end_date, NaiveDate::from_ymd_opt(2026, 6, 30).unwrap());
/// ```
pub fn resolve_period(kind: GrantKind, reference: NaiveDate) -> GrantPeriod {
    match kind {
        GrantKind::Week | GrantKind::SpecificWeekdays => week_of(reference),
        GrantKind::Month => {
            let first = reference
                .with_day(1)
                .expect("day 1 exists in every month");
            let last = first + Months::new(1) - Duration::days(1);
            GrantPeriod::new(first, last)
        }
        GrantKind::Quarter => {
            let quarter_start_month = ((reference.month0() / 3) * 3) + 1;
            let first = NaiveDate::from_ymd_opt(reference.year(), quarter_start_month, 1)
                .expect("quarter start is a valid date");
            let last = first + Months::new(3) - Duration::days(1);
            GrantPeriod::new(first, last)
        }
        GrantKind::HalfYear => {
            let year = reference.year();
            if reference.month() < 7 {
                GrantPeriod::new(ymd(year, 1, 1), ymd(year, 6, 30))
            } else {
                GrantPeriod::new(ymd(year, 7, 1), ymd(year, 12, 31))
            }
        }
        GrantKind::Year => year_of(reference),
    }
}

/// The Monday-through-Sunday week containing a date.
pub fn week_of(reference: NaiveDate) -> GrantPeriod {
    let monday = reference - Duration::days(i64::from(reference.weekday().num_days_from_monday()));
    GrantPeriod::new(monday, monday + Duration::days(6))
}

/// The calendar year containing a date (used directly by the frame
/// grant, which is always annual).
pub fn year_of(reference: NaiveDate) -> GrantPeriod {
    GrantPeriod::new(ymd(reference.year(), 1, 1), ymd(reference.year(), 12, 31))
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixed calendar date")
}
