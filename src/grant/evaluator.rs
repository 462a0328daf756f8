//! Grant evaluation logic.
//!
//! This module orchestrates the period resolver and the usage
//! aggregator per grant variant and produces a structured usage verdict.
//! Evaluation is advisory: a verdict never blocks entry creation — the
//! caller persists the entry regardless and surfaces the verdict for
//! the review workflow. The evaluator issues exactly one read against
//! its [`UsageSource`] per verdict and never writes.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Child, ChildRecord, GrantKind, GrantPolicy, GrantScope, GrantSummary, GrantVerdict,
    WeekdayGrants, WeekdaySummary, WeekdayUsage, weekday_key, weekday_name_da,
};

use super::period::{resolve_period, week_of, year_of};
use super::usage::UsageSource;

/// Evaluates grant usage for children against an injected usage source.
///
/// The evaluator holds no state beyond its collaborator: every verdict
/// is a pure function of the child, the date, the candidate hours and
/// one read of recorded usage. Two concurrent evaluations for the same
/// child may both see the same recorded usage and both report validity;
/// enforcing a hard cap, if ever required, belongs to the persistence
/// layer.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use grant_engine::grant::{GrantEvaluator, InMemoryUsage};
/// use grant_engine::models::{Child, GrantKind, GrantPolicy};
///
/// let evaluator = GrantEvaluator::new(InMemoryUsage::new());
/// let child = Child {
///     id: 1,
///     policy: GrantPolicy::Fixed { kind: GrantKind::Week, hours: Decimal::from(10) },
/// };
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap();
/// let verdict = evaluator.evaluate(&child, date, Decimal::from(4)).unwrap();
/// assert!(verdict.valid);
/// assert_eq!(verdict.remaining_hours, Decimal::from(10));
/// ```
#[derive(Debug, Clone)]
pub struct GrantEvaluator<U: UsageSource> {
    usage: U,
}

impl<U: UsageSource> GrantEvaluator<U> {
    /// Creates an evaluator over a usage source.
    pub fn new(usage: U) -> Self {
        Self { usage }
    }

    /// Returns the underlying usage source.
    pub fn usage(&self) -> &U {
        &self.usage
    }

    /// Evaluates a candidate entry against the child's grant.
    ///
    /// Dispatch order, first match wins:
    /// 1. the annual frame grant when active (the grant kind is ignored
    ///    entirely),
    /// 2. per-weekday caps for the `specific_weekdays` kind,
    /// 3. the fixed-period cap otherwise.
    ///
    /// Business outcomes — including "registration not allowed on this
    /// weekday" — are carried inside the verdict.
    ///
    /// # Errors
    ///
    /// Only a failed usage read surfaces as `Err`.
    pub fn evaluate(
        &self,
        child: &Child,
        date: NaiveDate,
        new_hours: Decimal,
    ) -> EngineResult<GrantVerdict> {
        let verdict = match &child.policy {
            GrantPolicy::FrameOverride { hours } => {
                let period = year_of(date);
                let used = self.usage.used_hours(child.id, &period, None)?;
                GrantVerdict::against_cap(GrantScope::FrameGrant, *hours, used, new_hours, period)
            }
            GrantPolicy::PerWeekday { grants } => {
                self.evaluate_weekday(child.id, grants, date, new_hours)?
            }
            GrantPolicy::Fixed { kind, hours } => {
                let period = resolve_period(*kind, date);
                let used = self.usage.used_hours(child.id, &period, None)?;
                GrantVerdict::against_cap(GrantScope::from(*kind), *hours, used, new_hours, period)
            }
        };

        debug!(
            child_id = child.id,
            scope = ?verdict.scope,
            used_hours = %verdict.used_hours,
            cap_hours = %verdict.cap_hours,
            valid = verdict.valid,
            "Evaluated grant"
        );
        Ok(verdict)
    }

    /// Evaluates a raw persisted child record.
    ///
    /// This is the boundary entry point for callers holding the store's
    /// loosely-typed row. An absent or malformed weekday map yields an
    /// invalid verdict (so review screens can render the problem), while
    /// an unknown grant kind is a data fault and surfaces as an error.
    pub fn evaluate_record(
        &self,
        record: &ChildRecord,
        date: NaiveDate,
        new_hours: Decimal,
    ) -> EngineResult<GrantVerdict> {
        match Child::from_record(record) {
            Ok(child) => self.evaluate(&child, date, new_hours),
            Err(EngineError::InvalidWeekdayConfig { message }) => {
                Ok(GrantVerdict::invalid_weekday_config(message, week_of(date)))
            }
            Err(e) => Err(e),
        }
    }

    /// Produces the read-only usage summary for a child.
    ///
    /// For most grant kinds this is [`evaluate`](Self::evaluate) with
    /// zero candidate hours at `today`. The `specific_weekdays` kind
    /// instead reports one row per weekday with a positive cap — not
    /// just today's weekday — each computed over the current week.
    /// Summaries are idempotent given no intervening writes.
    pub fn summarize(&self, child: &Child, today: NaiveDate) -> EngineResult<GrantSummary> {
        match &child.policy {
            GrantPolicy::PerWeekday { grants } => {
                let period = resolve_period(GrantKind::SpecificWeekdays, today);
                let mut weekdays = Vec::new();
                for (weekday, cap) in grants.positive_entries() {
                    let used = self.usage.used_hours(child.id, &period, Some(weekday))?;
                    weekdays.push(WeekdayUsage {
                        weekday: weekday_key(weekday).to_string(),
                        weekday_name: weekday_name_da(weekday).to_string(),
                        cap_hours: cap,
                        used_hours: used,
                        remaining_hours: (cap - used).max(Decimal::ZERO),
                        exceeded: used > cap,
                    });
                }
                Ok(GrantSummary::PerWeekday(WeekdaySummary {
                    scope: GrantScope::SpecificWeekdays,
                    period,
                    weekdays,
                }))
            }
            _ => self
                .evaluate(child, today, Decimal::ZERO)
                .map(GrantSummary::Single),
        }
    }

    fn evaluate_weekday(
        &self,
        child_id: i64,
        grants: &WeekdayGrants,
        date: NaiveDate,
        new_hours: Decimal,
    ) -> EngineResult<GrantVerdict> {
        let weekday = date.weekday();
        let period = resolve_period(GrantKind::SpecificWeekdays, date);

        let cap = grants.hours_for(weekday).filter(|h| *h > Decimal::ZERO);
        let Some(cap) = cap else {
            let allowed = grants
                .allowed_days()
                .into_iter()
                .map(|wd| weekday_name_da(wd).to_string())
                .collect();
            return Ok(GrantVerdict::day_not_allowed(
                weekday_name_da(weekday).to_string(),
                allowed,
                period,
            ));
        };

        let used = self.usage.used_hours(child_id, &period, Some(weekday))?;
        let mut verdict =
            GrantVerdict::against_cap(GrantScope::SpecificWeekdays, cap, used, new_hours, period);
        verdict.weekday = Some(weekday_key(weekday).to_string());
        verdict.weekday_name = Some(weekday_name_da(weekday).to_string());
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grant::usage::InMemoryUsage;
    use crate::models::{EntryStatus, TimeEntry, VerdictError};
    use chrono::NaiveTime;
    use proptest::prelude::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry(child_id: i64, day: &str, hours: i64, status: EntryStatus) -> TimeEntry {
        let total = Decimal::from(hours);
        TimeEntry {
            id: 0,
            caregiver_id: 1,
            child_id,
            date: date(day),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            normal_hours: total,
            evening_hours: Decimal::ZERO,
            night_hours: Decimal::ZERO,
            saturday_hours: Decimal::ZERO,
            sunday_holiday_hours: Decimal::ZERO,
            total_hours: total,
            status,
        }
    }

    fn weekly_child(hours: i64) -> Child {
        Child {
            id: 1,
            policy: GrantPolicy::Fixed {
                kind: GrantKind::Week,
                hours: Decimal::from(hours),
            },
        }
    }

    fn weekday_child(json: &str) -> Child {
        Child {
            id: 1,
            policy: GrantPolicy::PerWeekday {
                grants: WeekdayGrants::from_json(json).unwrap(),
            },
        }
    }

    // ==========================================================================
    // GE-001: Weekly grant exceeded by a candidate entry
    // ==========================================================================
    #[test]
    fn test_ge_001_weekly_grant_exceeded() {
        // Six hours already used this week against a ten-hour grant.
        let usage = InMemoryUsage::with_entries(vec![entry(
            1,
            "2026-01-13",
            6,
            EntryStatus::Approved,
        )]);
        let evaluator = GrantEvaluator::new(usage);

        let verdict = evaluator
            .evaluate(&weekly_child(10), date("2026-01-15"), Decimal::from(6))
            .unwrap();

        assert_eq!(verdict.used_hours, Decimal::from(6));
        assert_eq!(verdict.new_hours, Decimal::from(6));
        assert_eq!(verdict.total_after_new, Decimal::from(12));
        assert!(verdict.exceeded);
        assert_eq!(verdict.exceeded_by, Decimal::from(2));
        assert!(!verdict.valid);
        assert_eq!(verdict.scope, GrantScope::Week);
    }

    // ==========================================================================
    // GE-002: Usage outside the period does not count
    // ==========================================================================
    #[test]
    fn test_ge_002_usage_outside_period_ignored() {
        // Hours in the previous week must not count against this week.
        let usage = InMemoryUsage::with_entries(vec![
            entry(1, "2026-01-09", 8, EntryStatus::Approved), // previous Friday
            entry(1, "2026-01-13", 2, EntryStatus::Approved), // this Tuesday
        ]);
        let evaluator = GrantEvaluator::new(usage);

        let verdict = evaluator
            .evaluate(&weekly_child(10), date("2026-01-15"), Decimal::from(3))
            .unwrap();

        assert_eq!(verdict.used_hours, Decimal::from(2));
        assert!(verdict.valid);
    }

    // ==========================================================================
    // GE-003: Frame override wins over the grant kind
    // ==========================================================================
    #[test]
    fn test_ge_003_frame_override_precedence() {
        // Forty hours this week would explode a weekly grant, but the
        // child is on a 400-hour annual frame.
        let usage = InMemoryUsage::with_entries(vec![
            entry(1, "2026-01-12", 20, EntryStatus::Approved),
            entry(1, "2026-01-13", 20, EntryStatus::Approved),
        ]);
        let evaluator = GrantEvaluator::new(usage);

        let child = Child {
            id: 1,
            policy: GrantPolicy::FrameOverride {
                hours: Decimal::from(400),
            },
        };

        let verdict = evaluator
            .evaluate(&child, date("2026-01-15"), Decimal::from(5))
            .unwrap();

        assert!(verdict.valid);
        assert!(verdict.is_frame_grant);
        assert_eq!(verdict.scope, GrantScope::FrameGrant);
        assert_eq!(verdict.cap_hours, Decimal::from(400));
        assert_eq!(verdict.period.start_date, date("2026-01-01"));
        assert_eq!(verdict.period.end_date, date("2026-12-31"));
    }

    // ==========================================================================
    // GE-004: Frame grant counts usage across the whole year
    // ==========================================================================
    #[test]
    fn test_ge_004_frame_counts_whole_year() {
        let usage = InMemoryUsage::with_entries(vec![
            entry(1, "2026-02-01", 50, EntryStatus::Approved),
            entry(1, "2026-11-30", 45, EntryStatus::Pending),
            entry(1, "2025-12-31", 99, EntryStatus::Approved), // previous year
        ]);
        let evaluator = GrantEvaluator::new(usage);

        let child = Child {
            id: 1,
            policy: GrantPolicy::FrameOverride {
                hours: Decimal::from(100),
            },
        };

        let verdict = evaluator
            .evaluate(&child, date("2026-06-15"), Decimal::from(10))
            .unwrap();

        assert_eq!(verdict.used_hours, Decimal::from(95));
        assert_eq!(verdict.total_after_new, Decimal::from(105));
        assert!(verdict.exceeded);
        assert_eq!(verdict.exceeded_by, Decimal::from(5));
    }

    // ==========================================================================
    // GE-005: Registration on a disallowed weekday
    // ==========================================================================
    #[test]
    fn test_ge_005_weekday_not_allowed() {
        let evaluator = GrantEvaluator::new(InMemoryUsage::new());
        let child = weekday_child(r#"{"monday": 3, "wednesday": 3, "friday": 4}"#);

        // 2026-01-13 is a Tuesday.
        let verdict = evaluator
            .evaluate(&child, date("2026-01-13"), Decimal::from(5))
            .unwrap();

        assert!(!verdict.valid);
        assert_eq!(
            verdict.allowed_days,
            vec!["Mandag", "Onsdag", "Fredag"]
        );
        let error = verdict.error.unwrap();
        assert!(matches!(error, VerdictError::WeekdayNotAllowed { .. }));
        assert_eq!(error.to_string(), "Registrering ikke tilladt på Tirsdag");
    }

    // ==========================================================================
    // GE-006: A zero cap rejects the weekday like a missing one
    // ==========================================================================
    #[test]
    fn test_ge_006_zero_cap_weekday_rejected() {
        let evaluator = GrantEvaluator::new(InMemoryUsage::new());
        let child = weekday_child(r#"{"monday": 0, "friday": 4}"#);

        // 2026-01-12 is a Monday.
        let verdict = evaluator
            .evaluate(&child, date("2026-01-12"), Decimal::ONE)
            .unwrap();

        assert!(!verdict.valid);
        assert_eq!(verdict.allowed_days, vec!["Fredag"]);
    }

    // ==========================================================================
    // GE-007: Allowed weekday is capped per weekday within the week
    // ==========================================================================
    #[test]
    fn test_ge_007_weekday_cap_filters_to_weekday() {
        let usage = InMemoryUsage::with_entries(vec![
            entry(1, "2026-01-12", 2, EntryStatus::Approved), // Monday
            entry(1, "2026-01-14", 3, EntryStatus::Approved), // Wednesday
            entry(1, "2026-01-05", 3, EntryStatus::Approved), // previous Monday
        ]);
        let evaluator = GrantEvaluator::new(usage);
        let child = weekday_child(r#"{"monday": 3, "wednesday": 3}"#);

        let verdict = evaluator
            .evaluate(&child, date("2026-01-12"), Decimal::from(2))
            .unwrap();

        // Only this week's Monday hours count against Monday's cap.
        assert_eq!(verdict.used_hours, Decimal::from(2));
        assert_eq!(verdict.cap_hours, Decimal::from(3));
        assert_eq!(verdict.total_after_new, Decimal::from(4));
        assert!(verdict.exceeded);
        assert_eq!(verdict.weekday.as_deref(), Some("monday"));
        assert_eq!(verdict.weekday_name.as_deref(), Some("Mandag"));
    }

    // ==========================================================================
    // GE-008: Raw record with a malformed weekday map yields an invalid
    // verdict instead of an error
    // ==========================================================================
    #[test]
    fn test_ge_008_record_with_malformed_map() {
        let evaluator = GrantEvaluator::new(InMemoryUsage::new());
        let record = ChildRecord {
            id: 1,
            grant_type: "specific_weekdays".to_string(),
            grant_hours: Decimal::ZERO,
            grant_weekdays: Some("{broken".to_string()),
            has_frame_grant: false,
            frame_hours: Decimal::ZERO,
        };

        let verdict = evaluator
            .evaluate_record(&record, date("2026-01-13"), Decimal::ONE)
            .unwrap();

        assert!(!verdict.valid);
        assert!(matches!(
            verdict.error,
            Some(VerdictError::InvalidWeekdayConfig { .. })
        ));
    }

    // ==========================================================================
    // GE-009: Raw record with an unknown grant kind is a hard error
    // ==========================================================================
    #[test]
    fn test_ge_009_record_with_unknown_kind() {
        let evaluator = GrantEvaluator::new(InMemoryUsage::new());
        let record = ChildRecord {
            id: 1,
            grant_type: "fortnight".to_string(),
            grant_hours: Decimal::from(10),
            grant_weekdays: None,
            has_frame_grant: false,
            frame_hours: Decimal::ZERO,
        };

        let err = evaluator
            .evaluate_record(&record, date("2026-01-13"), Decimal::ONE)
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownGrantKind { .. }));
    }

    // ==========================================================================
    // GE-010: Summary is evaluate with zero candidate hours
    // ==========================================================================
    #[test]
    fn test_ge_010_summary_single() {
        let usage = InMemoryUsage::with_entries(vec![entry(
            1,
            "2026-01-13",
            4,
            EntryStatus::Approved,
        )]);
        let evaluator = GrantEvaluator::new(usage);

        let summary = evaluator
            .summarize(&weekly_child(10), date("2026-01-15"))
            .unwrap();

        match summary {
            GrantSummary::Single(verdict) => {
                assert_eq!(verdict.new_hours, Decimal::ZERO);
                assert_eq!(verdict.used_hours, Decimal::from(4));
                assert_eq!(verdict.remaining_hours, Decimal::from(6));
                assert!(verdict.valid);
            }
            GrantSummary::PerWeekday(_) => panic!("Expected a single verdict"),
        }
    }

    // ==========================================================================
    // GE-011: Per-weekday summary reports every allowed weekday
    // ==========================================================================
    #[test]
    fn test_ge_011_summary_per_weekday() {
        let usage = InMemoryUsage::with_entries(vec![
            entry(1, "2026-01-12", 4, EntryStatus::Approved), // Monday, over cap
            entry(1, "2026-01-16", 1, EntryStatus::Pending),  // Friday
        ]);
        let evaluator = GrantEvaluator::new(usage);
        let child = weekday_child(r#"{"monday": 3, "wednesday": 3, "friday": 4}"#);

        // Queried on the Thursday; all three allowed days must appear.
        let summary = evaluator.summarize(&child, date("2026-01-15")).unwrap();

        let summary = match summary {
            GrantSummary::PerWeekday(s) => s,
            GrantSummary::Single(_) => panic!("Expected a per-weekday summary"),
        };

        assert_eq!(summary.period.start_date, date("2026-01-12"));
        assert_eq!(summary.weekdays.len(), 3);

        let monday = &summary.weekdays[0];
        assert_eq!(monday.weekday, "monday");
        assert_eq!(monday.weekday_name, "Mandag");
        assert_eq!(monday.used_hours, Decimal::from(4));
        assert_eq!(monday.remaining_hours, Decimal::ZERO);
        assert!(monday.exceeded);

        let wednesday = &summary.weekdays[1];
        assert_eq!(wednesday.weekday, "wednesday");
        assert_eq!(wednesday.used_hours, Decimal::ZERO);
        assert!(!wednesday.exceeded);

        let friday = &summary.weekdays[2];
        assert_eq!(friday.weekday, "friday");
        assert_eq!(friday.used_hours, Decimal::ONE);
        assert_eq!(friday.remaining_hours, Decimal::from(3));
    }

    // ==========================================================================
    // GE-012: Summaries are idempotent without intervening writes
    // ==========================================================================
    #[test]
    fn test_ge_012_summary_idempotent() {
        let usage = InMemoryUsage::with_entries(vec![entry(
            1,
            "2026-01-13",
            4,
            EntryStatus::Pending,
        )]);
        let evaluator = GrantEvaluator::new(usage);

        let first = evaluator
            .summarize(&weekly_child(10), date("2026-01-15"))
            .unwrap();
        let second = evaluator
            .summarize(&weekly_child(10), date("2026-01-15"))
            .unwrap();

        assert_eq!(first, second);
    }

    // ==========================================================================
    // GE-013: Exactly reaching the cap is still valid
    // ==========================================================================
    #[test]
    fn test_ge_013_exact_cap_is_valid() {
        let usage = InMemoryUsage::with_entries(vec![entry(
            1,
            "2026-01-13",
            6,
            EntryStatus::Approved,
        )]);
        let evaluator = GrantEvaluator::new(usage);

        let verdict = evaluator
            .evaluate(&weekly_child(10), date("2026-01-15"), Decimal::from(4))
            .unwrap();

        assert!(verdict.valid);
        assert!(!verdict.exceeded);
        assert_eq!(verdict.exceeded_by, Decimal::ZERO);
    }

    proptest! {
        // More candidate hours never lower the resulting total.
        #[test]
        fn prop_total_after_new_is_monotonic(h1 in 0u32..200, h2 in 0u32..200) {
            prop_assume!(h1 <= h2);

            let usage = InMemoryUsage::with_entries(vec![entry(
                1,
                "2026-01-13",
                6,
                EntryStatus::Approved,
            )]);
            let evaluator = GrantEvaluator::new(usage);

            let v1 = evaluator
                .evaluate(&weekly_child(10), date("2026-01-15"), Decimal::from(h1))
                .unwrap();
            let v2 = evaluator
                .evaluate(&weekly_child(10), date("2026-01-15"), Decimal::from(h2))
                .unwrap();

            prop_assert!(v1.total_after_new <= v2.total_after_new);
        }
    }
}
