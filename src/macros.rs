//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. Formatting is
//! deferred: the arguments are only formatted when the logger accepts the
//! level.
//!
//! # Examples
//!
//! ```
//! use logging_tree::prelude::*;
//! use logging_tree::info;
//!
//! let registry = Registry::new();
//! let logger = registry.logger("server")?;
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! # Ok::<(), LoggerError>(())
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use logging_tree::prelude::*;
/// # let logger = Registry::new().root();
/// use logging_tree::log;
/// log!(logger, Level::INFO, "Simple message");
/// log!(logger, Level::SEVERE, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, $crate::lazy(|| format!($($arg)+)))
    };
}

/// Log a finest-level message.
///
/// # Examples
///
/// ```
/// # use logging_tree::prelude::*;
/// # let logger = Registry::new().root();
/// # logger.set_level(Level::ALL).unwrap();
/// use logging_tree::finest;
/// finest!(logger, "Entering function: calculate()");
/// finest!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! finest {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::FINEST, $($arg)+)
    };
}

/// Log a finer-level message.
///
/// # Examples
///
/// ```
/// # use logging_tree::prelude::*;
/// # let logger = Registry::new().root();
/// # logger.set_level(Level::ALL).unwrap();
/// use logging_tree::finer;
/// finer!(logger, "Cache probe");
/// finer!(logger, "Probe {} of {}", 1, 3);
/// ```
#[macro_export]
macro_rules! finer {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::FINER, $($arg)+)
    };
}

/// Log a fine-level message.
///
/// # Examples
///
/// ```
/// # use logging_tree::prelude::*;
/// # let logger = Registry::new().root();
/// # logger.set_level(Level::ALL).unwrap();
/// use logging_tree::fine;
/// fine!(logger, "Debug information");
/// fine!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! fine {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::FINE, $($arg)+)
    };
}

/// Log a config-level message.
///
/// # Examples
///
/// ```
/// # use logging_tree::prelude::*;
/// # let logger = Registry::new().root();
/// # logger.set_level(Level::ALL).unwrap();
/// use logging_tree::config;
/// config!(logger, "Loaded settings");
/// config!(logger, "Pool size: {}", 16);
/// ```
#[macro_export]
macro_rules! config {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::CONFIG, $($arg)+)
    };
}

/// Log a info-level message.
///
/// # Examples
///
/// ```
/// # use logging_tree::prelude::*;
/// # let logger = Registry::new().root();
/// # logger.set_level(Level::ALL).unwrap();
/// use logging_tree::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::INFO, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use logging_tree::prelude::*;
/// # let logger = Registry::new().root();
/// # logger.set_level(Level::ALL).unwrap();
/// use logging_tree::warning;
/// warning!(logger, "Low disk space");
/// warning!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::WARNING, $($arg)+)
    };
}

/// Log a severe-level message.
///
/// # Examples
///
/// ```
/// # use logging_tree::prelude::*;
/// # let logger = Registry::new().root();
/// # logger.set_level(Level::ALL).unwrap();
/// use logging_tree::severe;
/// severe!(logger, "Failed to connect to database");
/// severe!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! severe {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::SEVERE, $($arg)+)
    };
}

/// Log a shout-level message.
///
/// # Examples
///
/// ```
/// # use logging_tree::prelude::*;
/// # let logger = Registry::new().root();
/// # logger.set_level(Level::ALL).unwrap();
/// use logging_tree::shout;
/// shout!(logger, "Critical system failure");
/// shout!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! shout {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::SHOUT, $($arg)+)
    };
}
