//! Grant verdict models.
//!
//! This module contains the [`GrantVerdict`] type and its associated
//! structures: the structured result of evaluating recorded usage plus a
//! candidate entry against a child's grant cap, and the weekly summary
//! shape used by read-only overview screens.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::child::GrantKind;
use super::period::GrantPeriod;

/// The grant scope a verdict was computed against.
///
/// This is the closed set of [`GrantKind`] values plus `FrameGrant`,
/// which is not a kind a child can be configured with directly but the
/// scope reported when the frame override is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantScope {
    /// Weekly grant.
    Week,
    /// Monthly grant.
    Month,
    /// Quarterly grant.
    Quarter,
    /// Half-year grant.
    HalfYear,
    /// Annual grant.
    Year,
    /// Annual frame grant override.
    FrameGrant,
    /// Per-weekday grant.
    SpecificWeekdays,
}

impl From<GrantKind> for GrantScope {
    fn from(kind: GrantKind) -> Self {
        match kind {
            GrantKind::Week => GrantScope::Week,
            GrantKind::Month => GrantScope::Month,
            GrantKind::Quarter => GrantScope::Quarter,
            GrantKind::HalfYear => GrantScope::HalfYear,
            GrantKind::Year => GrantScope::Year,
            GrantKind::SpecificWeekdays => GrantScope::SpecificWeekdays,
        }
    }
}

/// An input problem carried inside a verdict instead of being raised.
///
/// These render as the Danish messages the review screens show. They are
/// expected outcomes, not faults: the caller persists the entry
/// regardless and surfaces the verdict for the approval workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum VerdictError {
    /// Registration is not allowed on the candidate date's weekday.
    WeekdayNotAllowed {
        /// The Danish name of the rejected weekday.
        weekday: String,
    },
    /// The stored per-weekday map was absent or malformed.
    InvalidWeekdayConfig {
        /// A description of the configuration problem.
        message: String,
    },
}

impl std::fmt::Display for VerdictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerdictError::WeekdayNotAllowed { weekday } => {
                write!(f, "Registrering ikke tilladt på {}", weekday)
            }
            VerdictError::InvalidWeekdayConfig { message } => {
                write!(f, "Ugyldig ugedags-konfiguration: {}", message)
            }
        }
    }
}

/// The structured result of one grant evaluation.
///
/// Every evaluation returns this shape, so review and export
/// collaborators can render a consistent result; input problems appear in
/// the `error` field rather than as exceptions. A verdict is advisory:
/// `valid == false` never blocks entry creation.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use grant_engine::models::{GrantPeriod, GrantScope, GrantVerdict};
///
/// let period = GrantPeriod {
///     start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 1, 11).unwrap(),
/// };
/// let verdict = GrantVerdict::against_cap(
///     GrantScope::Week,
///     Decimal::from(10),
///     Decimal::from(6),
///     Decimal::from(6),
///     period,
/// );
///
/// assert!(!verdict.valid);
/// assert!(verdict.exceeded);
/// assert_eq!(verdict.exceeded_by, Decimal::from(2));
/// assert_eq!(verdict.remaining_hours, Decimal::from(4));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrantVerdict {
    /// Whether the candidate entry stays within the cap.
    pub valid: bool,
    /// The scope the cap belongs to.
    pub scope: GrantScope,
    /// The hour cap that applied.
    pub cap_hours: Decimal,
    /// Hours already used before the candidate entry.
    pub used_hours: Decimal,
    /// Hours still available before the candidate entry
    /// (`max(0, cap - used)`).
    pub remaining_hours: Decimal,
    /// The candidate entry's hours.
    pub new_hours: Decimal,
    /// `used_hours + new_hours`.
    pub total_after_new: Decimal,
    /// Whether the resulting total exceeds the cap.
    pub exceeded: bool,
    /// The excess amount (`max(0, total_after_new - cap)`).
    pub exceeded_by: Decimal,
    /// The period the cap covers.
    pub period: GrantPeriod,
    /// Whether the annual frame grant supplied the cap.
    pub is_frame_grant: bool,
    /// The matched weekday's English key, for per-weekday verdicts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday: Option<String>,
    /// The matched weekday's Danish name, for per-weekday verdicts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday_name: Option<String>,
    /// Danish names of the weekdays with a positive cap, in map order.
    /// Populated when registration was rejected for the weekday.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_days: Vec<String>,
    /// An input problem, when the verdict could not be computed against
    /// a cap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<VerdictError>,
}

impl GrantVerdict {
    /// Computes a verdict from a cap, recorded usage and candidate
    /// hours.
    ///
    /// All derived figures (`valid`, `exceeded`, `exceeded_by`,
    /// `remaining_hours`, `total_after_new`) follow from the three
    /// inputs; the weekday fields stay empty and can be filled by the
    /// evaluator for per-weekday grants.
    pub fn against_cap(
        scope: GrantScope,
        cap_hours: Decimal,
        used_hours: Decimal,
        new_hours: Decimal,
        period: GrantPeriod,
    ) -> Self {
        let total_after_new = used_hours + new_hours;
        Self {
            valid: total_after_new <= cap_hours,
            scope,
            cap_hours,
            used_hours,
            remaining_hours: (cap_hours - used_hours).max(Decimal::ZERO),
            new_hours,
            total_after_new,
            exceeded: total_after_new > cap_hours,
            exceeded_by: (total_after_new - cap_hours).max(Decimal::ZERO),
            period,
            is_frame_grant: matches!(scope, GrantScope::FrameGrant),
            weekday: None,
            weekday_name: None,
            allowed_days: Vec::new(),
            error: None,
        }
    }

    /// Builds the invalid verdict for a weekday without a positive cap.
    pub fn day_not_allowed(
        weekday_name: String,
        allowed_days: Vec<String>,
        period: GrantPeriod,
    ) -> Self {
        Self {
            valid: false,
            scope: GrantScope::SpecificWeekdays,
            cap_hours: Decimal::ZERO,
            used_hours: Decimal::ZERO,
            remaining_hours: Decimal::ZERO,
            new_hours: Decimal::ZERO,
            total_after_new: Decimal::ZERO,
            exceeded: true,
            exceeded_by: Decimal::ZERO,
            period,
            is_frame_grant: false,
            weekday: None,
            weekday_name: None,
            allowed_days,
            error: Some(VerdictError::WeekdayNotAllowed {
                weekday: weekday_name,
            }),
        }
    }

    /// Builds the invalid verdict for an absent or malformed weekday
    /// map.
    pub fn invalid_weekday_config(message: String, period: GrantPeriod) -> Self {
        Self {
            valid: false,
            scope: GrantScope::SpecificWeekdays,
            cap_hours: Decimal::ZERO,
            used_hours: Decimal::ZERO,
            remaining_hours: Decimal::ZERO,
            new_hours: Decimal::ZERO,
            total_after_new: Decimal::ZERO,
            exceeded: false,
            exceeded_by: Decimal::ZERO,
            period,
            is_frame_grant: false,
            weekday: None,
            weekday_name: None,
            allowed_days: Vec::new(),
            error: Some(VerdictError::InvalidWeekdayConfig { message }),
        }
    }
}

/// One weekday's row in a per-weekday summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayUsage {
    /// The weekday's English key (as stored).
    pub weekday: String,
    /// The weekday's Danish display name.
    pub weekday_name: String,
    /// The configured cap for this weekday.
    pub cap_hours: Decimal,
    /// Hours used on this weekday within the current week.
    pub used_hours: Decimal,
    /// Hours still available (`max(0, cap - used)`).
    pub remaining_hours: Decimal,
    /// Whether recorded usage already exceeds the cap.
    pub exceeded: bool,
}

/// A weekly overview for a child on the `specific_weekdays` kind.
///
/// Contains one row per configured weekday with a positive cap, in map
/// order, each computed over the current week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdaySummary {
    /// Always [`GrantScope::SpecificWeekdays`].
    pub scope: GrantScope,
    /// The current week.
    pub period: GrantPeriod,
    /// Per-weekday usage rows, Monday first.
    pub weekdays: Vec<WeekdayUsage>,
}

/// The result of a read-only grant summary.
///
/// Most grant kinds summarize as a single zero-candidate verdict; the
/// `specific_weekdays` kind instead reports every allowed weekday of the
/// current week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GrantSummary {
    /// A single verdict with zero candidate hours.
    Single(GrantVerdict),
    /// One usage row per allowed weekday.
    PerWeekday(WeekdaySummary),
}
