//! Delivery metrics for observability
//!
//! Counters describing how records move through a registry: how many were
//! built, how many subscriber deliveries happened, how many records
//! reached no subscriber at all, and how many were dropped at full
//! bounded queues.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for a logger registry
///
/// # Example
///
/// ```
/// use logging_tree::LoggingMetrics;
///
/// let metrics = LoggingMetrics::new();
/// metrics.record_published();
/// metrics.record_undelivered();
///
/// assert_eq!(metrics.records_published(), 1);
/// assert_eq!(metrics.undelivered(), 1);
/// ```
#[derive(Debug)]
pub struct LoggingMetrics {
    /// Records constructed by accepted logging calls
    records_published: AtomicU64,

    /// Individual record hand-offs to subscribers
    deliveries: AtomicU64,

    /// Records that found no subscriber on any channel they were routed to
    undelivered: AtomicU64,

    /// Callback subscribers that panicked during delivery
    listener_panics: AtomicU64,

    /// Items discarded because a bounded subscription was full
    dropped: AtomicU64,
}

impl LoggingMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            records_published: AtomicU64::new(0),
            deliveries: AtomicU64::new(0),
            undelivered: AtomicU64::new(0),
            listener_panics: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn records_published(&self) -> u64 {
        self.records_published.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn deliveries(&self) -> u64 {
        self.deliveries.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn undelivered(&self) -> u64 {
        self.undelivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn listener_panics(&self) -> u64 {
        self.listener_panics.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_published(&self) -> u64 {
        self.records_published.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_deliveries(&self, count: u64) -> u64 {
        self.deliveries.fetch_add(count, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_undelivered(&self) -> u64 {
        self.undelivered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_listener_panic(&self) -> u64 {
        self.listener_panics.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of published records that reached nobody (0.0 - 100.0)
    pub fn undelivered_rate(&self) -> f64 {
        let published = self.records_published() as f64;
        if published == 0.0 {
            0.0
        } else {
            (self.undelivered() as f64 / published) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.records_published.store(0, Ordering::Relaxed);
        self.deliveries.store(0, Ordering::Relaxed);
        self.undelivered.store(0, Ordering::Relaxed);
        self.listener_panics.store(0, Ordering::Relaxed);
        self.dropped.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggingMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggingMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            records_published: AtomicU64::new(self.records_published()),
            deliveries: AtomicU64::new(self.deliveries()),
            undelivered: AtomicU64::new(self.undelivered()),
            listener_panics: AtomicU64::new(self.listener_panics()),
            dropped: AtomicU64::new(self.dropped()),
        }
    }
}
