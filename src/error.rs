//! ATTRMAP - Conversion Error Types
//! Defines the error hierarchy for the strict conversion layer.
//!
//! The map surface itself is infallible: absent keys and bad input
//! degrade to zero values. These errors only surface through the
//! `parse_*` functions in [`crate::convert`].

use thiserror::Error;

/// Custom Result type for the strict conversion layer.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Error types for strict string-to-scalar conversion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// The input is not a recognized boolean token.
    #[error("invalid boolean token: {0:?}")]
    InvalidBool(String),

    /// The input is not a valid number for the requested type.
    #[error("invalid number: {0:?}")]
    InvalidNumber(String),

    /// The input parses as a number but does not fit the requested width.
    #[error("number out of range for target type: {0:?}")]
    OutOfRange(String),

    /// The input is not a recognized timestamp.
    #[error("invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    /// The input is not a recognized duration.
    #[error("invalid duration: {0:?}")]
    InvalidDuration(String),
}
