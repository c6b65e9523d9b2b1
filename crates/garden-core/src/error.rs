//! Error types for garden-core.
//!
//! Generating synthetic data cannot fail, but the [`TelemetrySource`] seam is
//! shaped for real sensor back ends, which can. The variants below cover
//! what such a source and the refresh loop around it may report.
//!
//! ## Retry classification
//!
//! | Error Type | Strategy |
//! |------------|----------|
//! | [`Error::SensorUnavailable`] | Retry with backoff |
//! | [`Error::Timeout`] | Retry with backoff |
//! | [`Error::InvalidData`] | Do not retry |
//! | [`Error::InvalidConfig`] | Do not retry, fix configuration |
//! | [`Error::Cancelled`] | Do not retry |
//!
//! [`TelemetrySource`]: crate::source::TelemetrySource

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while refreshing dashboard data.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The telemetry source could not be reached or produced nothing.
    #[error("Sensor source '{source_name}' unavailable: {reason}")]
    SensorUnavailable {
        /// Name of the source that failed.
        source_name: String,
        /// Human-readable cause.
        reason: String,
    },

    /// Operation timed out.
    #[error("Operation '{operation}' timed out after {duration:?}")]
    Timeout {
        /// The operation that timed out.
        operation: String,
        /// The timeout duration.
        duration: Duration,
    },

    /// Data returned by a source failed validation.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Operation was cancelled.
    #[error("Operation cancelled")]
    Cancelled,
}

impl Error {
    /// Create a sensor-unavailable error for a named source.
    pub fn sensor_unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SensorUnavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a timeout error with operation context.
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

impl From<garden_types::ParseError> for Error {
    fn from(err: garden_types::ParseError) -> Self {
        Self::InvalidData(err.to_string())
    }
}

/// Result type alias using garden-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;
