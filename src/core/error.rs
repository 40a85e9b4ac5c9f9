//! Error types for the logger tree

use super::log_level::Level;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoggerError {
    /// Malformed logger name
    #[error("Invalid logger name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// Level mutation not allowed for this logger in the current mode
    #[error("Unsupported operation on logger '{logger}': {message}")]
    UnsupportedOperation { logger: String, message: String },

    /// Level name that matches none of the predefined levels
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),
}

impl LoggerError {
    /// Create an invalid name error
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        LoggerError::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an unsupported operation error
    pub fn unsupported(logger: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::UnsupportedOperation {
            logger: logger.into(),
            message: message.into(),
        }
    }

    /// Create an invalid level error
    pub fn invalid_level(name: impl Into<String>) -> Self {
        LoggerError::InvalidLevel(name.into())
    }
}

/// Placeholder error attached to records whose stack trace was captured
/// automatically and whose caller supplied no error of its own.
#[derive(Debug, Clone, thiserror::Error)]
#[error("autogenerated stack trace for {level} {message}")]
pub struct AutogeneratedTrace {
    pub level: Level,
    pub message: String,
}
