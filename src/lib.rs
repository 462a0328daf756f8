//! Grant Period & Usage Engine for caregiver time registration
//!
//! This crate tracks caregiver hours against per-child recurring time
//! grants (weekly, monthly, quarterly, half-yearly, yearly, per-weekday
//! and annual frame grants) and splits worked intervals into the Danish
//! pay tariff buckets (normal, evening, night, Saturday, Sunday/holiday).

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod grant;
pub mod models;
pub mod tariff;
