//! Child and grant policy models.
//!
//! A child record arrives from the external store in a loosely-typed shape
//! ([`ChildRecord`]): the grant kind is a string and the per-weekday grant
//! map is a JSON-encoded text column. The engine validates that shape
//! exactly once at the boundary and works with the strongly-typed
//! [`Child`]/[`GrantPolicy`] form everywhere else, so evaluation dispatch
//! is exhaustive and checked at compile time.

use std::str::FromStr;

use chrono::Weekday;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::weekday::WEEK_ORDER;

/// The closed set of recurring grant periods.
///
/// Every child carries exactly one grant kind. The `SpecificWeekdays`
/// kind caps hours per weekday within a week instead of a single figure
/// for the whole period.
///
/// # Example
///
/// ```
/// use grant_engine::models::GrantKind;
///
/// let kind: GrantKind = "half_year".parse().unwrap();
/// assert_eq!(kind, GrantKind::HalfYear);
/// assert!("fortnight".parse::<GrantKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantKind {
    /// Monday through Sunday of the reference date's week.
    Week,
    /// The reference date's calendar month.
    Month,
    /// One of the four fixed quarters of the reference year.
    Quarter,
    /// January–June or July–December of the reference year.
    HalfYear,
    /// The reference date's calendar year.
    Year,
    /// Per-weekday caps within the reference date's week.
    SpecificWeekdays,
}

impl GrantKind {
    /// Returns the stored string form of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            GrantKind::Week => "week",
            GrantKind::Month => "month",
            GrantKind::Quarter => "quarter",
            GrantKind::HalfYear => "half_year",
            GrantKind::Year => "year",
            GrantKind::SpecificWeekdays => "specific_weekdays",
        }
    }
}

impl std::fmt::Display for GrantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GrantKind {
    type Err = EngineError;

    /// Parses a stored grant kind string.
    ///
    /// This is the single place where [`EngineError::UnknownGrantKind`]
    /// can arise: once a kind has parsed, every downstream match is
    /// exhaustive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(GrantKind::Week),
            "month" => Ok(GrantKind::Month),
            "quarter" => Ok(GrantKind::Quarter),
            "half_year" => Ok(GrantKind::HalfYear),
            "year" => Ok(GrantKind::Year),
            "specific_weekdays" => Ok(GrantKind::SpecificWeekdays),
            other => Err(EngineError::UnknownGrantKind {
                kind: other.to_string(),
            }),
        }
    }
}

/// Per-weekday hour caps, Monday first.
///
/// The external store keeps this map as a JSON text column keyed by
/// lowercase English weekday names; [`WeekdayGrants::from_json`] is the
/// one place that text is parsed. A missing key means the weekday is not
/// configured; a cap of zero means configured but not allowed — both
/// reject registrations on that day.
///
/// # Example
///
/// ```
/// use chrono::Weekday;
/// use rust_decimal::Decimal;
/// use grant_engine::models::WeekdayGrants;
///
/// let grants = WeekdayGrants::from_json(r#"{"monday": 3, "friday": 4}"#).unwrap();
/// assert_eq!(grants.hours_for(Weekday::Mon), Some(Decimal::from(3)));
/// assert_eq!(grants.hours_for(Weekday::Tue), None);
/// assert_eq!(grants.allowed_days(), vec![Weekday::Mon, Weekday::Fri]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayGrants {
    /// Hour cap for Mondays, if configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monday: Option<Decimal>,
    /// Hour cap for Tuesdays, if configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuesday: Option<Decimal>,
    /// Hour cap for Wednesdays, if configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<Decimal>,
    /// Hour cap for Thursdays, if configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thursday: Option<Decimal>,
    /// Hour cap for Fridays, if configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friday: Option<Decimal>,
    /// Hour cap for Saturdays, if configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturday: Option<Decimal>,
    /// Hour cap for Sundays, if configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunday: Option<Decimal>,
}

impl WeekdayGrants {
    /// Parses the JSON-encoded weekday map as stored by the external
    /// CRUD layer.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidWeekdayConfig`] when the text is not
    /// valid JSON for the expected shape. This is the fail-fast boundary:
    /// the map is never re-parsed on later calls.
    pub fn from_json(raw: &str) -> EngineResult<Self> {
        serde_json::from_str(raw).map_err(|e| EngineError::InvalidWeekdayConfig {
            message: e.to_string(),
        })
    }

    /// Returns the configured cap for a weekday, if any.
    pub fn hours_for(&self, weekday: Weekday) -> Option<Decimal> {
        match weekday {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }

    /// Lists every weekday with a positive cap, in map order
    /// (Monday first).
    pub fn allowed_days(&self) -> Vec<Weekday> {
        WEEK_ORDER
            .iter()
            .copied()
            .filter(|wd| self.hours_for(*wd).is_some_and(|h| h > Decimal::ZERO))
            .collect()
    }

    /// Returns `(weekday, cap)` pairs for every weekday with a positive
    /// cap, in map order.
    pub fn positive_entries(&self) -> Vec<(Weekday, Decimal)> {
        WEEK_ORDER
            .iter()
            .copied()
            .filter_map(|wd| {
                self.hours_for(wd)
                    .filter(|h| *h > Decimal::ZERO)
                    .map(|h| (wd, h))
            })
            .collect()
    }
}

/// A child record as persisted by the external CRUD layer.
///
/// The engine reads this shape but never writes it. Validation happens
/// once, in [`Child::from_record`]; the rest of the engine only sees the
/// validated [`Child`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildRecord {
    /// The store's identifier for the child.
    pub id: i64,
    /// The stored grant kind string (e.g. `"week"`).
    pub grant_type: String,
    /// The hour cap for the period; meaningful only for non-weekday kinds.
    pub grant_hours: Decimal,
    /// JSON-encoded per-weekday caps; present only for
    /// `specific_weekdays`.
    #[serde(default)]
    pub grant_weekdays: Option<String>,
    /// Whether the annual frame grant overrides the per-kind grant.
    pub has_frame_grant: bool,
    /// The annual cap used when the frame grant is active.
    #[serde(default)]
    pub frame_hours: Decimal,
}

/// The validated grant policy a child is evaluated against.
///
/// The variants mirror the three dispatch branches of the evaluator; the
/// frame override wins before the kind is even considered, so a frame
/// child keeps its stored kind fields but they never influence
/// evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum GrantPolicy {
    /// A single hour cap over a recurring fixed period.
    Fixed {
        /// The recurring period the cap applies to.
        kind: GrantKind,
        /// The hour cap for one period.
        hours: Decimal,
    },
    /// The annual frame grant, superseding the per-kind grant.
    FrameOverride {
        /// The annual hour cap.
        hours: Decimal,
    },
    /// Per-weekday caps within each week.
    PerWeekday {
        /// The validated weekday map.
        grants: WeekdayGrants,
    },
}

/// A child with a validated grant policy.
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use grant_engine::models::{Child, ChildRecord, GrantKind, GrantPolicy};
///
/// let record = ChildRecord {
///     id: 7,
///     grant_type: "week".to_string(),
///     grant_hours: Decimal::from(10),
///     grant_weekdays: None,
///     has_frame_grant: false,
///     frame_hours: Decimal::ZERO,
/// };
///
/// let child = Child::from_record(&record).unwrap();
/// assert_eq!(child.id, 7);
/// assert_eq!(
///     child.policy,
///     GrantPolicy::Fixed { kind: GrantKind::Week, hours: Decimal::from(10) },
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Child {
    /// The store's identifier for the child.
    pub id: i64,
    /// The validated grant policy.
    pub policy: GrantPolicy,
}

impl Child {
    /// Validates a raw persisted record into a typed [`Child`].
    ///
    /// The frame-grant flag overrides the grant kind entirely; for the
    /// `specific_weekdays` kind the JSON weekday map is parsed here,
    /// exactly once.
    ///
    /// # Errors
    ///
    /// - [`EngineError::UnknownGrantKind`] when the stored kind string is
    ///   outside the closed set.
    /// - [`EngineError::InvalidWeekdayConfig`] when the weekday map is
    ///   absent or malformed for a `specific_weekdays` child.
    pub fn from_record(record: &ChildRecord) -> EngineResult<Self> {
        if record.has_frame_grant {
            return Ok(Self {
                id: record.id,
                policy: GrantPolicy::FrameOverride {
                    hours: record.frame_hours,
                },
            });
        }

        let kind: GrantKind = record.grant_type.parse()?;
        let policy = match kind {
            GrantKind::SpecificWeekdays => {
                let raw = record.grant_weekdays.as_deref().ok_or_else(|| {
                    EngineError::InvalidWeekdayConfig {
                        message: "weekday grant map is missing".to_string(),
                    }
                })?;
                GrantPolicy::PerWeekday {
                    grants: WeekdayGrants::from_json(raw)?,
                }
            }
            kind => GrantPolicy::Fixed {
                kind,
                hours: record.grant_hours,
            },
        };

        Ok(Self {
            id: record.id,
            policy,
        })
    }
}

impl TryFrom<&ChildRecord> for Child {
    type Error = EngineError;

    fn try_from(record: &ChildRecord) -> Result<Self, Self::Error> {
        Child::from_record(record)
    }
}
