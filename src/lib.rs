//! # Logging Tree
//!
//! A hierarchical, level-filtered logging facility: a tree of named loggers
//! that share configuration by inheritance, route immutable records to any
//! number of subscribers, and change verbosity at runtime.
//!
//! ## Features
//!
//! - **Dotted namespaces**: `registry.logger("app.db")` creates `app` and `app.db` on demand
//! - **Two modes**: a single root-controlled level, or per-logger overrides with inheritance
//! - **Broadcast subscriptions**: channel streams or synchronous callbacks on any node
//! - **Cheap filtering**: rejected calls never build their message
//!
//! ```
//! use logging_tree::prelude::*;
//!
//! let registry = Registry::builder().hierarchical(true).build();
//! let db = registry.logger("app.db")?;
//! let app_records = registry.logger("app")?.subscribe();
//!
//! db.set_level(Level::FINE)?;
//! db.fine("connection pool warmed up");
//!
//! let record = app_records.try_recv().expect("delivered to ancestor");
//! assert_eq!(record.to_string(), "[FINE] app.db: connection pool warmed up");
//! # Ok::<(), LoggerError>(())
//! ```

pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        lazy, ContextGuard, FieldValue, IntoMessage, Level, Listener, LogContext, LogExtras,
        LogRecord, Logger, LoggerError, LoggingConfig, LoggingMetrics, Message, Registry,
        RegistryBuilder, Result, Subscription,
    };
}

pub use crate::core::{
    lazy, AutogeneratedTrace, ContextGuard, FieldValue, IntoMessage, Lazy, Level, Listener,
    LogContext, LogExtras, LogObject, LogRecord, Logger, LoggerError, LoggingConfig,
    LoggingMetrics, Message, Registry, RegistryBuilder, Result, SharedError, Subscription,
    SEPARATOR,
};

/// Get or create a logger in the process-wide registry
pub fn logger(name: &str) -> Result<Logger> {
    Registry::global().logger(name)
}

/// The root logger of the process-wide registry
pub fn root() -> Logger {
    Registry::global().root()
}
