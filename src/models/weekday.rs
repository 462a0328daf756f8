//! Weekday naming helpers.
//!
//! The external store keys per-weekday grants by the lowercase English
//! weekday name, while everything a caregiver or admin sees is rendered in
//! Danish. Both namings live here so the rest of the engine never
//! hand-rolls a weekday string.

use chrono::Weekday;

/// The seven weekdays in grant-map order (Monday first).
///
/// Per-weekday grants, allowed-day listings and weekly summaries all
/// iterate in this order.
pub const WEEK_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Returns the lowercase English key used for a weekday in stored data.
///
/// # Example
///
/// ```
/// use chrono::Weekday;
/// use grant_engine::models::weekday_key;
///
/// assert_eq!(weekday_key(Weekday::Mon), "monday");
/// assert_eq!(weekday_key(Weekday::Sun), "sunday");
/// ```
pub fn weekday_key(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Returns the Danish display name for a weekday.
///
/// # Example
///
/// ```
/// use chrono::Weekday;
/// use grant_engine::models::weekday_name_da;
///
/// assert_eq!(weekday_name_da(Weekday::Tue), "Tirsdag");
/// ```
pub fn weekday_name_da(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mandag",
        Weekday::Tue => "Tirsdag",
        Weekday::Wed => "Onsdag",
        Weekday::Thu => "Torsdag",
        Weekday::Fri => "Fredag",
        Weekday::Sat => "Lørdag",
        Weekday::Sun => "Søndag",
    }
}
