//! Interval tariff splitting.
//!
//! This module classifies worked time into the five tariff buckets used
//! for pay purposes: day categorisation (Saturday and Sunday/holiday
//! overrides) and time-of-day banding (normal, evening, night) against
//! injected clock boundaries.

mod day_category;
mod splitter;

pub use day_category::{DayCategory, categorize_day};
pub use splitter::{DaySplit, TariffSplit, split_interval, split_spanning};
