//! Core data models for the grant and tariff engine.
//!
//! This module contains all the domain models used throughout the engine.

mod child;
mod period;
mod time_entry;
mod verdict;
mod weekday;

pub use child::{Child, ChildRecord, GrantKind, GrantPolicy, WeekdayGrants};
pub use period::GrantPeriod;
pub use time_entry::{EntryStatus, TimeEntry};
pub use verdict::{GrantScope, GrantSummary, GrantVerdict, VerdictError, WeekdaySummary, WeekdayUsage};
pub use weekday::{WEEK_ORDER, weekday_key, weekday_name_da};
