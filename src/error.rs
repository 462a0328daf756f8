//! Error types for the grant and tariff engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during grant evaluation and
//! interval splitting.

use thiserror::Error;

/// The main error type for the grant and tariff engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// Business outcomes such as "registration not allowed on this weekday"
/// are not errors: they are carried inside [`GrantVerdict`] so callers can
/// render them. `EngineError` is reserved for input problems the engine
/// cannot recover from and for collaborator failures.
///
/// [`GrantVerdict`]: crate::models::GrantVerdict
///
/// # Example
///
/// ```
/// use grant_engine::error::EngineError;
///
/// let error = EngineError::UnknownGrantKind {
///     kind: "fortnight".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown grant kind: fortnight");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A grant kind string was outside the closed set of known kinds.
    ///
    /// This is a programmer/data error at the boundary where persisted
    /// string data enters the engine; it is not recoverable inside the
    /// engine.
    #[error("Unknown grant kind: {kind}")]
    UnknownGrantKind {
        /// The grant kind string that was not recognized.
        kind: String,
    },

    /// The per-weekday grant map was absent or could not be parsed.
    #[error("Invalid weekday grant configuration: {message}")]
    InvalidWeekdayConfig {
        /// A description of what made the configuration invalid.
        message: String,
    },

    /// A time interval was invalid (end not strictly after start).
    #[error("Invalid interval: {message}")]
    InvalidInterval {
        /// A description of what made the interval invalid.
        message: String,
    },

    /// The tariff band configuration was inconsistent.
    #[error("Invalid tariff configuration: {message}")]
    InvalidTariffConfig {
        /// A description of what made the configuration invalid.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The usage aggregator failed to read previously recorded hours.
    #[error("Usage query failed: {message}")]
    UsageQuery {
        /// A description of the read failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
