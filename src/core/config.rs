//! Registry configuration

use super::log_level::Level;
use serde::{Deserialize, Serialize};

/// Initial settings for a [`Registry`](super::registry::Registry).
///
/// Every field can be changed at runtime on the registry except
/// `default_level`, which only seeds the root and detached loggers.
///
/// # Example
///
/// ```
/// use logging_tree::{Level, LoggingConfig, Registry};
///
/// let config = LoggingConfig {
///     hierarchical_logging_enabled: true,
///     ..LoggingConfig::default()
/// };
/// let registry = Registry::with_config(config);
/// assert!(registry.hierarchical_logging_enabled());
/// assert_eq!(registry.root().effective_level(), Level::INFO);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Give every logger its own level override and channel
    pub hierarchical_logging_enabled: bool,

    /// Records at or above this level capture a stack trace automatically
    pub record_stack_trace_at_level: Level,

    /// Level given to the root logger and to detached loggers
    pub default_level: Level,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            hierarchical_logging_enabled: false,
            record_stack_trace_at_level: Level::OFF,
            default_level: Level::INFO,
        }
    }
}
