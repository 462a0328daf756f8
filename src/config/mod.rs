//! Configuration loading and types for the tariff splitter.
//!
//! The clock boundaries of the time-of-day bands and the public-holiday
//! calendar are external configuration: they are loaded from YAML files
//! (or built programmatically) and injected into the splitter.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{Holiday, HolidaysFileConfig, TariffBands, TariffConfig, TariffFileConfig};
