//! Capture context attached to log records
//!
//! This module provides:
//! - `LogContext`: key-value fields describing the execution a record came from
//! - an ambient per-thread "current" context, captured automatically when a
//!   logging call does not pass one explicitly
//! - `ContextGuard`: RAII guard that restores the previous context on drop

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

thread_local! {
    static CURRENT: RefCell<Option<Arc<LogContext>>> = const { RefCell::new(None) };
}

/// Value type for context fields
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

/// Execution context captured alongside a record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogContext {
    fields: HashMap<String, FieldValue>,
}

impl LogContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Add a field to the context
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a field to the context (mutable version)
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Get all fields
    pub fn fields(&self) -> &HashMap<String, FieldValue> {
        &self.fields
    }

    /// Check if context has any fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Format fields as key=value pairs, sorted by key
    pub fn format_fields(&self) -> String {
        let mut pairs: Vec<_> = self.fields.iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The context installed on the current thread, if any
    pub fn current() -> Option<Arc<LogContext>> {
        CURRENT.with(|current| current.borrow().clone())
    }

    /// Install this context as the current one until the guard is dropped.
    ///
    /// Guards nest: dropping one restores whatever was current before it.
    ///
    /// # Example
    ///
    /// ```
    /// use logging_tree::LogContext;
    ///
    /// {
    ///     let _guard = LogContext::new().with_field("request_id", "abc-123").enter();
    ///     assert!(LogContext::current().is_some());
    /// }
    /// assert!(LogContext::current().is_none());
    /// ```
    #[must_use = "the context is uninstalled as soon as the guard is dropped"]
    pub fn enter(self) -> ContextGuard {
        Arc::new(self).enter_shared()
    }

    /// Shared-ownership variant of [`LogContext::enter`]
    #[must_use = "the context is uninstalled as soon as the guard is dropped"]
    pub fn enter_shared(self: Arc<Self>) -> ContextGuard {
        let previous = CURRENT.with(|current| current.borrow_mut().replace(self));
        ContextGuard {
            previous,
            _not_send: PhantomData,
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

/// RAII guard for a scoped current context
///
/// Not `Send`: the guard must be dropped on the thread that created it.
pub struct ContextGuard {
    previous: Option<Arc<LogContext>>,
    _not_send: PhantomData<*const ()>,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT.with(|current| *current.borrow_mut() = previous);
    }
}
