//! Logger registry
//!
//! A [`Registry`] owns one tree of loggers keyed by fully-qualified dotted
//! name, plus the settings shared by that tree. Most programs use the
//! process-wide [`Registry::global`]; tests and embedders can build isolated
//! registries with [`Registry::new`] or [`Registry::builder`].

use super::{
    config::LoggingConfig,
    error::{LoggerError, Result},
    log_level::Level,
    logger::{Logger, Shared},
    metrics::LoggingMetrics,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Separator between name segments
pub const SEPARATOR: char = '.';

static GLOBAL: OnceLock<Registry> = OnceLock::new();

pub struct Registry {
    shared: Arc<Shared>,
    root: Logger,
    loggers: RwLock<HashMap<String, Logger>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LoggingConfig::default())
    }

    #[must_use]
    pub fn with_config(config: LoggingConfig) -> Self {
        let shared = Shared::new(config);
        let root = Logger::new_parentless(String::new(), Arc::clone(&shared));
        let mut loggers = HashMap::new();
        loggers.insert(String::new(), root.clone());
        Self {
            shared,
            root,
            loggers: RwLock::new(loggers),
        }
    }

    /// Create a builder for Registry
    ///
    /// # Example
    /// ```
    /// use logging_tree::prelude::*;
    ///
    /// let registry = Registry::builder()
    ///     .hierarchical(true)
    ///     .record_stack_trace_at(Level::SEVERE)
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// The process-wide registry, created with default settings on first use
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(Registry::new)
    }

    /// The root logger (empty name)
    pub fn root(&self) -> Logger {
        self.root.clone()
    }

    /// Get the logger registered under `name`, creating it and any missing
    /// ancestors on first use.
    ///
    /// The empty name resolves to the root. Names starting with `.` are
    /// rejected.
    ///
    /// # Example
    ///
    /// ```
    /// use logging_tree::Registry;
    ///
    /// let registry = Registry::new();
    /// let first = registry.logger("app.http").unwrap();
    /// let second = registry.logger("app.http").unwrap();
    /// assert_eq!(first, second);
    /// assert!(registry.contains("app"));
    /// assert!(registry.logger(".app").is_err());
    /// ```
    pub fn logger(&self, name: &str) -> Result<Logger> {
        if name.starts_with(SEPARATOR) {
            return Err(LoggerError::invalid_name(
                name,
                format!("logger names must not start with '{}'", SEPARATOR),
            ));
        }

        if let Some(logger) = self.loggers.read().get(name) {
            return Ok(logger.clone());
        }

        let mut loggers = self.loggers.write();
        Ok(Self::get_or_create_locked(&mut loggers, &self.root, name))
    }

    /// Resolve `name` while holding the write lock so each name maps to
    /// exactly one node even under concurrent creation.
    fn get_or_create_locked(
        loggers: &mut HashMap<String, Logger>,
        root: &Logger,
        name: &str,
    ) -> Logger {
        if let Some(logger) = loggers.get(name) {
            return logger.clone();
        }

        let (parent, simple) = match name.rsplit_once(SEPARATOR) {
            Some((parent_name, simple)) => {
                (Self::get_or_create_locked(loggers, root, parent_name), simple)
            }
            None => (root.clone(), name),
        };

        let logger = Logger::new_child(simple, &parent, root);
        loggers.insert(name.to_string(), logger.clone());
        logger
    }

    /// Create a logger outside the tree.
    ///
    /// It has no parent, is never registered, keeps its own level and
    /// channel, and lives only as long as the caller holds it.
    pub fn detached(&self, name: impl Into<String>) -> Logger {
        Logger::new_parentless(name.into(), Arc::clone(&self.shared))
    }

    /// Snapshot of every registered logger, root included, in no particular order
    pub fn attached_loggers(&self) -> Vec<Logger> {
        self.loggers.read().values().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loggers.read().contains_key(name)
    }

    /// Number of registered loggers, root included
    pub fn attached_count(&self) -> usize {
        self.loggers.read().len()
    }

    pub fn hierarchical_logging_enabled(&self) -> bool {
        self.shared.hierarchical()
    }

    /// Switch between per-logger configuration and root-only configuration
    pub fn set_hierarchical_logging_enabled(&self, enabled: bool) {
        self.shared.set_hierarchical(enabled);
    }

    pub fn record_stack_trace_at_level(&self) -> Level {
        self.shared.stack_trace_level()
    }

    /// Records at or above `level` capture a stack trace when none is given
    pub fn set_record_stack_trace_at_level(&self, level: Level) {
        self.shared.set_stack_trace_level(level);
    }

    pub fn metrics(&self) -> &LoggingMetrics {
        &self.shared.metrics
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a Registry with a fluent API
///
/// # Example
/// ```
/// use logging_tree::prelude::*;
///
/// let registry = Registry::builder()
///     .hierarchical(true)
///     .default_level(Level::FINE)
///     .build();
/// assert_eq!(registry.root().effective_level(), Level::FINE);
/// ```
pub struct RegistryBuilder {
    config: LoggingConfig,
}

impl RegistryBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggingConfig::default(),
        }
    }

    /// Start from a complete configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggingConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn hierarchical(mut self, enabled: bool) -> Self {
        self.config.hierarchical_logging_enabled = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn record_stack_trace_at(mut self, level: Level) -> Self {
        self.config.record_stack_trace_at_level = level;
        self
    }

    /// Level for the root logger and for detached loggers
    #[must_use = "builder methods return a new value"]
    pub fn default_level(mut self, level: Level) -> Self {
        self.config.default_level = level;
        self
    }

    /// Build the Registry
    pub fn build(self) -> Registry {
        Registry::with_config(self.config)
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
