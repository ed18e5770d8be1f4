//! Error handling for FloorKit
//!
//! Shared error type for the lower layers (geometry and configuration).
//! Higher layers wrap it in their own `thiserror` enums.

use thiserror::Error;

/// Main error type for FloorKit
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A value is outside the range an operation accepts
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue {
        /// The offending parameter or setting.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl Error {
    /// Create an invalid value error
    pub fn invalid_value(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidValue {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
