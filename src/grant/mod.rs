//! Grant period and usage evaluation.
//!
//! Resolves the calendar period a grant covers, aggregates recorded
//! usage through the [`UsageSource`] port and evaluates candidate
//! entries against the child's grant policy.

mod evaluator;
mod period;
mod usage;

pub use evaluator::GrantEvaluator;
pub use period::{resolve_period, week_of, year_of};
pub use usage::{InMemoryUsage, UsageSource};
