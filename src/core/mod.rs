//! Core logger tree types

pub mod broadcast;
pub mod config;
pub mod error;
pub mod log_context;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod message;
pub mod metrics;
pub mod registry;

pub use broadcast::{Listener, Subscription};
pub use config::LoggingConfig;
pub use error::{AutogeneratedTrace, LoggerError, Result};
pub use log_context::{ContextGuard, FieldValue, LogContext};
pub use log_level::Level;
pub use log_record::{LogExtras, LogRecord, SharedError};
pub use logger::Logger;
pub use message::{lazy, IntoMessage, Lazy, LogObject, Message};
pub use metrics::LoggingMetrics;
pub use registry::{Registry, RegistryBuilder, SEPARATOR};
