//! Error types for data validation in garden-types.

use thiserror::Error;

/// Errors that can occur when building or parsing garden records.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// An optimal range whose lower bound exceeds its upper bound.
    #[error("Invalid range: min {min} is greater than max {max}")]
    InvalidRange {
        /// Lower bound as given.
        min: u8,
        /// Upper bound as given.
        max: u8,
    },

    /// A percentage outside 0-100.
    #[error("Invalid percentage: {0} (expected 0-100)")]
    InvalidPercentage(u8),

    /// Any other malformed value.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias using garden-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
