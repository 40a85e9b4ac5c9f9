//! Log level definitions
//!
//! A [`Level`] is a named severity with a numeric ordering key. Equality,
//! ordering and hashing look at the numeric value only, so two levels with
//! different names but the same value are interchangeable.

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    name: Cow<'static, str>,
    value: i32,
}

impl Level {
    /// Special key to turn on logging for all levels
    pub const ALL: Level = Level::new("ALL", 0);
    /// Highly detailed tracing
    pub const FINEST: Level = Level::new("FINEST", 300);
    /// Fairly detailed tracing
    pub const FINER: Level = Level::new("FINER", 400);
    /// Tracing information
    pub const FINE: Level = Level::new("FINE", 500);
    /// Static configuration messages
    pub const CONFIG: Level = Level::new("CONFIG", 700);
    /// Informational messages
    pub const INFO: Level = Level::new("INFO", 800);
    /// Potential problems
    pub const WARNING: Level = Level::new("WARNING", 900);
    /// Serious failures
    pub const SEVERE: Level = Level::new("SEVERE", 1000);
    /// Extra debugging loudness
    pub const SHOUT: Level = Level::new("SHOUT", 1200);
    /// Special key to turn off all logging
    pub const OFF: Level = Level::new("OFF", 2000);

    /// Predefined levels in ascending order
    pub const LEVELS: [Level; 10] = [
        Level::ALL,
        Level::FINEST,
        Level::FINER,
        Level::FINE,
        Level::CONFIG,
        Level::INFO,
        Level::WARNING,
        Level::SEVERE,
        Level::SHOUT,
        Level::OFF,
    ];

    pub const fn new(name: &'static str, value: i32) -> Self {
        Self {
            name: Cow::Borrowed(name),
            value,
        }
    }

    /// Create a level with a runtime-provided name.
    ///
    /// By convention custom values lie strictly between [`Level::ALL`] and
    /// [`Level::OFF`]; this is not enforced.
    pub fn custom(name: impl Into<String>, value: i32) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// Find the predefined level with the given value
    pub fn from_value(value: i32) -> Option<Level> {
        Self::LEVELS.iter().find(|level| level.value == value).cloned()
    }
}

impl PartialEq for Level {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Level {}

impl PartialOrd for Level {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Level {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Hash for Level {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::INFO
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::LEVELS
            .iter()
            .find(|level| level.name.eq_ignore_ascii_case(wanted))
            .cloned()
            .ok_or_else(|| LoggerError::invalid_level(s))
    }
}
