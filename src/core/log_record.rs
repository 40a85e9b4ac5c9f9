//! Log record structure

use super::log_context::LogContext;
use super::log_level::Level;
use super::message::LogObject;
use chrono::{DateTime, Utc};
use std::backtrace::Backtrace;
use std::cell::RefCell;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Error attached to a record
pub type SharedError = Arc<dyn Error + Send + Sync>;

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<Arc<str>>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<Arc<str>>>> = const { RefCell::new(None) };
}

/// Get cached thread ID, computing and caching it on first access
fn get_thread_id() -> Arc<str> {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| Arc::from(format!("{:?}", std::thread::current().id())))
            .clone()
    })
}

/// Get cached thread name, computing and caching it on first access
fn get_thread_name() -> Option<Arc<str>> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(Arc::from))
            .clone()
    })
}

/// Immutable record produced by an accepted logging call.
///
/// Subscribers receive it as `Arc<LogRecord>`; every channel a call reaches
/// sees the same allocation.
pub struct LogRecord {
    pub level: Level,
    pub message: String,
    /// Un-stringified payload, present when the message was not plain text
    pub object: Option<Arc<dyn LogObject>>,
    /// Fully-qualified name of the logger that emitted the record
    pub logger_name: Arc<str>,
    pub time: DateTime<Utc>,
    pub sequence_number: u64,
    pub error: Option<SharedError>,
    pub stack_trace: Option<Arc<Backtrace>>,
    pub context: Option<Arc<LogContext>>,
    pub thread_id: Arc<str>,
    pub thread_name: Option<Arc<str>>,
    /// Ordering stamp shared with subscriber registration
    pub(crate) epoch: u64,
}

impl LogRecord {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        level: Level,
        message: String,
        object: Option<Arc<dyn LogObject>>,
        logger_name: Arc<str>,
        sequence_number: u64,
        epoch: u64,
        extras: LogExtras,
    ) -> Self {
        Self {
            level,
            message,
            object,
            logger_name,
            time: Utc::now(),
            sequence_number,
            error: extras.error,
            stack_trace: extras.stack_trace,
            context: extras.context,
            thread_id: get_thread_id(),
            thread_name: get_thread_name(),
            epoch,
        }
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.logger_name, self.message)
    }
}

impl fmt::Debug for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogRecord")
            .field("level", &self.level)
            .field("message", &self.message)
            .field("has_object", &self.object.is_some())
            .field("logger_name", &self.logger_name)
            .field("time", &self.time)
            .field("sequence_number", &self.sequence_number)
            .field("error", &self.error.as_ref().map(|e| e.to_string()))
            .field("has_stack_trace", &self.stack_trace.is_some())
            .field("context", &self.context)
            .field("thread_id", &self.thread_id)
            .field("thread_name", &self.thread_name)
            .finish()
    }
}

/// Optional parts of a logging call
///
/// # Example
///
/// ```
/// use logging_tree::{Level, LogContext, LogExtras, Registry};
///
/// let registry = Registry::new();
/// let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
/// registry.root().log_with(
///     Level::SEVERE,
///     "write failed",
///     LogExtras::new()
///         .error(io_err)
///         .context(LogContext::new().with_field("path", "/tmp/out")),
/// );
/// ```
#[derive(Default, Clone)]
pub struct LogExtras {
    pub(crate) error: Option<SharedError>,
    pub(crate) stack_trace: Option<Arc<Backtrace>>,
    pub(crate) context: Option<Arc<LogContext>>,
}

impl LogExtras {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn error<E: Error + Send + Sync + 'static>(mut self, error: E) -> Self {
        self.error = Some(Arc::new(error));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn shared_error(mut self, error: SharedError) -> Self {
        self.error = Some(error);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn stack_trace(mut self, stack_trace: Backtrace) -> Self {
        self.stack_trace = Some(Arc::new(stack_trace));
        self
    }

    /// Use this context instead of the thread's current one
    #[must_use = "builder methods return a new value"]
    pub fn context(mut self, context: LogContext) -> Self {
        self.context = Some(Arc::new(context));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn shared_context(mut self, context: Arc<LogContext>) -> Self {
        self.context = Some(context);
        self
    }
}
