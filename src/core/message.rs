//! Log message payloads
//!
//! A logging call accepts anything implementing [`IntoMessage`]: plain text,
//! an arbitrary displayable object, or a deferred producer wrapped with
//! [`lazy`]. Conversion happens only after the level check has passed, so a
//! filtered call never runs the producer and never allocates.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Object that can be attached to a record as its un-stringified payload
pub trait LogObject: fmt::Display + Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T> LogObject for T
where
    T: fmt::Display + Any + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl dyn LogObject {
    /// Downcast the retained object to its concrete type
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Resolved message payload
#[derive(Clone)]
pub enum Message {
    Text(String),
    Object(Arc<dyn LogObject>),
}

impl Message {
    /// Wrap a non-textual value; the record keeps it alongside its text form
    pub fn object<T: LogObject>(value: T) -> Self {
        Message::Object(Arc::new(value))
    }

    /// Split into the record's text and the retained original object
    pub(crate) fn into_parts(self) -> (String, Option<Arc<dyn LogObject>>) {
        match self {
            Message::Text(text) => (text, None),
            Message::Object(object) => (object.to_string(), Some(object)),
        }
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Message::Object(object) => f.debug_tuple("Object").field(&object.to_string()).finish(),
        }
    }
}

/// Anything a logging call accepts as its message
pub trait IntoMessage {
    fn into_message(self) -> Message;
}

impl IntoMessage for Message {
    fn into_message(self) -> Message {
        self
    }
}

impl IntoMessage for String {
    fn into_message(self) -> Message {
        Message::Text(self)
    }
}

impl IntoMessage for &str {
    fn into_message(self) -> Message {
        Message::Text(self.to_owned())
    }
}

impl IntoMessage for &String {
    fn into_message(self) -> Message {
        Message::Text(self.clone())
    }
}

impl IntoMessage for Cow<'_, str> {
    fn into_message(self) -> Message {
        Message::Text(self.into_owned())
    }
}

impl IntoMessage for fmt::Arguments<'_> {
    fn into_message(self) -> Message {
        Message::Text(self.to_string())
    }
}

macro_rules! impl_into_message_for_values {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoMessage for $ty {
                fn into_message(self) -> Message {
                    Message::object(self)
                }
            }
        )*
    };
}

// Non-textual values keep the original alongside their text form
impl_into_message_for_values!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);

/// Deferred message producer, evaluated only for loggable calls
pub struct Lazy<F>(F);

/// Defer building a message until the logger knows it will be used.
///
/// ```
/// use logging_tree::{lazy, Registry};
///
/// let registry = Registry::new();
/// let logger = registry.logger("db").unwrap();
/// logger.fine(lazy(|| format!("expensive dump: {:?}", vec![1, 2, 3])));
/// ```
pub fn lazy<F, M>(producer: F) -> Lazy<F>
where
    F: FnOnce() -> M,
    M: IntoMessage,
{
    Lazy(producer)
}

impl<F, M> IntoMessage for Lazy<F>
where
    F: FnOnce() -> M,
    M: IntoMessage,
{
    fn into_message(self) -> Message {
        (self.0)().into_message()
    }
}
