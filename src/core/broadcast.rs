//! Broadcast channel owned by each logger node
//!
//! Publishing is immediate: every attached subscriber gets the item before
//! `publish` returns. Stream subscribers receive it through a
//! `crossbeam-channel` queue, unbounded unless a capacity was requested;
//! callback subscribers are invoked in place. Nothing is buffered for
//! subscribers that do not exist yet.
//!
//! The subscriber list is copy-on-write. A publish works on the snapshot it
//! took, so attaching or detaching never disturbs a delivery in progress.

use super::metrics::LoggingMetrics;
use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TrySendError};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

enum Sink<T> {
    Channel(Sender<T>),
    Callback(Callback<T>),
}

impl<T> Clone for Sink<T> {
    fn clone(&self) -> Self {
        match self {
            Sink::Channel(sender) => Sink::Channel(sender.clone()),
            Sink::Callback(callback) => Sink::Callback(Arc::clone(callback)),
        }
    }
}

struct Subscriber<T> {
    id: u64,
    /// Items stamped at or before this epoch predate the subscriber
    since: u64,
    sink: Sink<T>,
}

impl<T> Clone for Subscriber<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            since: self.since,
            sink: self.sink.clone(),
        }
    }
}

/// Removal hook shared by subscription handles
trait Detach: Send + Sync {
    fn detach(&self, id: u64);
}

pub(crate) struct Broadcast<T> {
    subscribers: RwLock<Arc<Vec<Subscriber<T>>>>,
    next_id: AtomicU64,
}

impl<T: Clone + Send + 'static> Broadcast<T> {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            subscribers: RwLock::new(Arc::new(Vec::new())),
            next_id: AtomicU64::new(0),
        })
    }

    /// Attach a stream subscriber that only sees items stamped after `since`.
    ///
    /// With a `capacity`, items arriving while the queue is full are dropped
    /// for that subscriber only.
    pub(crate) fn subscribe(
        self: &Arc<Self>,
        since: u64,
        capacity: Option<usize>,
    ) -> Subscription<T> {
        let (sender, receiver) = match capacity {
            Some(capacity) => bounded(capacity),
            None => unbounded(),
        };
        let id = self.attach(since, Sink::Channel(sender));
        let channel: Weak<dyn Detach> = Arc::downgrade(self) as Weak<dyn Detach>;
        Subscription {
            receiver,
            id,
            channel,
        }
    }

    /// Attach a callback invoked synchronously for each later item
    pub(crate) fn listen(self: &Arc<Self>, since: u64, callback: Callback<T>) -> Listener {
        let id = self.attach(since, Sink::Callback(callback));
        let channel: Weak<dyn Detach> = Arc::downgrade(self) as Weak<dyn Detach>;
        Listener { id, channel }
    }

    fn attach(&self, since: u64, sink: Sink<T>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut subscribers = self.subscribers.write();
        let mut updated = Vec::with_capacity(subscribers.len() + 1);
        updated.extend(subscribers.iter().cloned());
        updated.push(Subscriber { id, since, sink });
        *subscribers = Arc::new(updated);
        id
    }

    fn remove_all(&self, ids: &[u64]) {
        let mut subscribers = self.subscribers.write();
        if !subscribers.iter().any(|s| ids.contains(&s.id)) {
            return;
        }
        let updated: Vec<_> = subscribers
            .iter()
            .filter(|s| !ids.contains(&s.id))
            .cloned()
            .collect();
        *subscribers = Arc::new(updated);
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    /// Drop every subscriber; stream receivers see a disconnect once drained
    pub(crate) fn close(&self) {
        *self.subscribers.write() = Arc::new(Vec::new());
    }

    /// Deliver `item` to every subscriber attached before `epoch`.
    ///
    /// Returns the number of successful deliveries. A panicking callback is
    /// isolated so the remaining subscribers still receive the item.
    pub(crate) fn publish(&self, item: &T, epoch: u64, owner: &str, metrics: &LoggingMetrics) -> u64 {
        let snapshot = Arc::clone(&self.subscribers.read());
        let mut delivered = 0;
        let mut disconnected = Vec::new();

        for subscriber in snapshot.iter() {
            if subscriber.since >= epoch {
                continue;
            }
            match &subscriber.sink {
                Sink::Channel(sender) => match sender.try_send(item.clone()) {
                    Ok(()) => delivered += 1,
                    Err(TrySendError::Full(_)) => {
                        metrics.record_dropped();
                    }
                    Err(TrySendError::Disconnected(_)) => disconnected.push(subscriber.id),
                },
                Sink::Callback(callback) => {
                    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                        callback(item)
                    }));

                    match result {
                        Ok(()) => delivered += 1,
                        Err(panic_info) => {
                            let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                                s.to_string()
                            } else if let Some(s) = panic_info.downcast_ref::<String>() {
                                s.clone()
                            } else {
                                "Unknown panic".to_string()
                            };
                            eprintln!(
                                "[LOGGER CRITICAL] Listener #{} on logger '{}' panicked: {}. \
                                 Other subscribers continue to receive records.",
                                subscriber.id, owner, panic_msg
                            );
                            metrics.record_listener_panic();
                        }
                    }
                }
            }
        }

        if !disconnected.is_empty() {
            self.remove_all(&disconnected);
        }

        delivered
    }
}

impl<T: Clone + Send + 'static> Detach for Broadcast<T> {
    fn detach(&self, id: u64) {
        self.remove_all(&[id]);
    }
}

/// Stream of items published on a logger channel.
///
/// Dropping the subscription detaches it. When the channel is closed with
/// `unsubscribe_all`, already-delivered items can still be drained and the
/// blocking iterators then end.
pub struct Subscription<T> {
    receiver: Receiver<T>,
    id: u64,
    channel: Weak<dyn Detach>,
}

impl<T> Subscription<T> {
    /// Block until the next item arrives; `None` once the channel is closed and drained
    pub fn recv(&self) -> Option<T> {
        self.receiver.recv().ok()
    }

    /// Take the next item if one is already waiting
    pub fn try_recv(&self) -> Option<T> {
        self.receiver.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<T> {
        self.receiver.recv_timeout(timeout).ok()
    }

    /// Iterate over items already waiting, without blocking
    pub fn try_iter(&self) -> crossbeam_channel::TryIter<'_, T> {
        self.receiver.try_iter()
    }

    /// Blocking iterator that ends when the channel is closed
    pub fn iter(&self) -> crossbeam_channel::Iter<'_, T> {
        self.receiver.iter()
    }

    /// Number of items waiting to be received
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Underlying receiver, for use with `crossbeam_channel::select!`
    pub fn receiver(&self) -> &Receiver<T> {
        &self.receiver
    }
}

impl<'a, T> IntoIterator for &'a Subscription<T> {
    type Item = T;
    type IntoIter = crossbeam_channel::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.receiver.iter()
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(channel) = self.channel.upgrade() {
            channel.detach(self.id);
        }
    }
}

/// Handle for a callback subscriber; dropping it detaches the callback
#[must_use = "the callback is detached as soon as the listener is dropped"]
pub struct Listener {
    id: u64,
    channel: Weak<dyn Detach>,
}

impl Listener {
    /// Detach the callback now
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Some(channel) = self.channel.upgrade() {
            channel.detach(self.id);
        }
    }
}
