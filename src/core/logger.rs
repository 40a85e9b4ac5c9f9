//! Logger tree nodes
//!
//! A [`Logger`] is a cheap handle to a node in a registry's tree. Handles to
//! the same node compare equal. Each node may override its level and owns a
//! lazily created broadcast channel of [`LogRecord`]s.
//!
//! While hierarchical logging is disabled, level resolution, subscriptions
//! and record delivery all collapse onto the root logger.

use super::{
    broadcast::{Broadcast, Listener, Subscription},
    config::LoggingConfig,
    error::{AutogeneratedTrace, LoggerError, Result},
    log_context::LogContext,
    log_level::Level,
    log_record::{LogExtras, LogRecord},
    message::IntoMessage,
    metrics::LoggingMetrics,
};
use parking_lot::{Mutex, RwLock};
use std::backtrace::Backtrace;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

type RecordChannel = Arc<Broadcast<Arc<LogRecord>>>;
type LevelChannel = Arc<Broadcast<Option<Level>>>;

/// Settings and counters shared by every node of one registry
pub(crate) struct Shared {
    hierarchical: AtomicBool,
    stack_trace_level: RwLock<Level>,
    default_level: Level,
    /// Orders records against subscriber registration
    clock: AtomicU64,
    sequence: AtomicU64,
    pub(crate) metrics: LoggingMetrics,
}

impl Shared {
    pub(crate) fn new(config: LoggingConfig) -> Arc<Self> {
        Arc::new(Self {
            hierarchical: AtomicBool::new(config.hierarchical_logging_enabled),
            stack_trace_level: RwLock::new(config.record_stack_trace_at_level),
            default_level: config.default_level,
            clock: AtomicU64::new(1),
            sequence: AtomicU64::new(0),
            metrics: LoggingMetrics::new(),
        })
    }

    #[inline]
    pub(crate) fn hierarchical(&self) -> bool {
        self.hierarchical.load(Ordering::Acquire)
    }

    pub(crate) fn set_hierarchical(&self, enabled: bool) {
        self.hierarchical.store(enabled, Ordering::Release);
    }

    pub(crate) fn stack_trace_level(&self) -> Level {
        self.stack_trace_level.read().clone()
    }

    pub(crate) fn set_stack_trace_level(&self, level: Level) {
        *self.stack_trace_level.write() = level;
    }

    fn captures_stack_trace(&self, level: &Level) -> bool {
        *level >= *self.stack_trace_level.read()
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::AcqRel)
    }

    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed)
    }
}

struct Node {
    name: String,
    full_name: Arc<str>,
    parent: Option<Logger>,
    /// Registry root; `None` for the root itself and for detached loggers
    root: Option<Logger>,
    children: RwLock<BTreeMap<String, Weak<Node>>>,
    level: RwLock<Option<Level>>,
    records: Mutex<Option<RecordChannel>>,
    level_changes: Mutex<Option<LevelChannel>>,
    shared: Arc<Shared>,
}

/// Handle to a named node of the logger tree
#[derive(Clone)]
pub struct Logger {
    node: Arc<Node>,
}

impl Logger {
    fn from_node(node: Node) -> Self {
        Self {
            node: Arc::new(node),
        }
    }

    /// A parentless logger: the registry root or a detached logger
    pub(crate) fn new_parentless(name: String, shared: Arc<Shared>) -> Self {
        let level = Some(shared.default_level.clone());
        Self::from_node(Node {
            full_name: Arc::from(name.as_str()),
            name,
            parent: None,
            root: None,
            children: RwLock::new(BTreeMap::new()),
            level: RwLock::new(level),
            records: Mutex::new(None),
            level_changes: Mutex::new(None),
            shared,
        })
    }

    /// Create a child of `parent` and link it into the parent's children
    pub(crate) fn new_child(name: &str, parent: &Logger, root: &Logger) -> Self {
        let full_name = if parent.node.full_name.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", parent.node.full_name, name)
        };
        let child = Self::from_node(Node {
            name: name.to_string(),
            full_name: Arc::from(full_name),
            parent: Some(parent.clone()),
            root: Some(root.clone()),
            children: RwLock::new(BTreeMap::new()),
            level: RwLock::new(None),
            records: Mutex::new(None),
            level_changes: Mutex::new(None),
            shared: Arc::clone(&parent.node.shared),
        });
        parent
            .node
            .children
            .write()
            .insert(name.to_string(), Arc::downgrade(&child.node));
        child
    }

    /// Simple (last) segment of the name
    pub fn name(&self) -> &str {
        &self.node.name
    }

    /// Dotted name from the root; empty for the root logger
    pub fn full_name(&self) -> &str {
        &self.node.full_name
    }

    pub fn parent(&self) -> Option<&Logger> {
        self.node.parent.as_ref()
    }

    /// Snapshot of the direct children, keyed by simple name
    pub fn children(&self) -> BTreeMap<String, Logger> {
        self.node
            .children
            .read()
            .iter()
            .filter_map(|(name, child)| {
                child.upgrade().map(|node| (name.clone(), Logger { node }))
            })
            .collect()
    }

    pub fn child(&self, name: &str) -> Option<Logger> {
        self.node
            .children
            .read()
            .get(name)
            .and_then(Weak::upgrade)
            .map(|node| Logger { node })
    }

    /// The level override set on this node, if any
    pub fn level(&self) -> Option<Level> {
        self.node.level.read().clone()
    }

    /// The level that actually gates this logger's calls
    pub fn effective_level(&self) -> Level {
        self.with_effective_level(Level::clone)
    }

    /// Whether a call at `level` would produce a record
    #[inline]
    pub fn is_loggable(&self, level: &Level) -> bool {
        self.with_effective_level(|effective| level >= effective)
    }

    fn with_effective_level<R>(&self, f: impl FnOnce(&Level) -> R) -> R {
        let node = &self.node;
        if node.parent.is_some() && !node.shared.hierarchical() {
            if let Some(root) = &node.root {
                return root.with_effective_level(f);
            }
        }

        let mut current = self;
        loop {
            let level = current.node.level.read();
            if let Some(level) = level.as_ref() {
                return f(level);
            }
            drop(level);
            match &current.node.parent {
                Some(parent) => current = parent,
                None => return f(&current.node.shared.default_level),
            }
        }
    }

    /// Set or clear this logger's level override.
    ///
    /// Non-root levels can only change while hierarchical logging is enabled,
    /// and a logger without a parent can never have its level cleared.
    ///
    /// # Example
    ///
    /// ```
    /// use logging_tree::{Level, Registry};
    ///
    /// let registry = Registry::builder().hierarchical(true).build();
    /// let db = registry.logger("app.db").unwrap();
    /// db.set_level(Level::FINE).unwrap();
    /// assert_eq!(db.effective_level(), Level::FINE);
    ///
    /// db.set_level(None).unwrap();
    /// assert_eq!(db.effective_level(), Level::INFO);
    /// ```
    pub fn set_level(&self, level: impl Into<Option<Level>>) -> Result<()> {
        let level = level.into();
        let node = &self.node;

        if node.parent.is_some() && !node.shared.hierarchical() {
            return Err(LoggerError::unsupported(
                &*node.full_name,
                "enable hierarchical logging to change the level of a non-root logger",
            ));
        }
        if node.parent.is_none() && level.is_none() {
            return Err(LoggerError::unsupported(
                &*node.full_name,
                "a logger without a parent must keep a concrete level",
            ));
        }

        let mut current = node.level.write();
        if *current == level {
            return Ok(());
        }
        *current = level;

        // notify under the write guard so notifications follow write order
        let channel = node.level_changes.lock().clone();
        if let Some(channel) = channel {
            channel.publish(&*current, node.shared.tick(), &node.full_name, &node.shared.metrics);
        }
        Ok(())
    }

    /// Stream of level overrides set on this node (never delegated to root)
    pub fn on_level_changed(&self) -> Subscription<Option<Level>> {
        let channel = {
            let mut slot = self.node.level_changes.lock();
            Arc::clone(slot.get_or_insert_with(Broadcast::new))
        };
        channel.subscribe(self.node.shared.tick(), None)
    }

    /// Node whose record channel serves this logger in the current mode
    fn channel_owner(&self) -> &Logger {
        match &self.node.root {
            Some(root) if !self.node.shared.hierarchical() => root,
            _ => self,
        }
    }

    fn record_channel(&self) -> RecordChannel {
        let mut slot = self.node.records.lock();
        Arc::clone(slot.get_or_insert_with(Broadcast::new))
    }

    /// Subscribe to the records this logger publishes.
    ///
    /// In hierarchical mode this also covers every descendant's records. With
    /// hierarchical mode off, all named loggers share the root's channel.
    ///
    /// The queue is unbounded: records pile up for as long as the
    /// subscription stays attached without being drained. Use
    /// [`Logger::subscribe_bounded`] to cap it.
    pub fn subscribe(&self) -> Subscription<Arc<LogRecord>> {
        let owner = self.channel_owner();
        owner.record_channel().subscribe(owner.node.shared.tick(), None)
    }

    /// Like [`Logger::subscribe`], but holds at most `capacity` undrained
    /// records. Records arriving at a full queue are dropped for this
    /// subscriber and counted in [`LoggingMetrics::dropped`].
    pub fn subscribe_bounded(&self, capacity: usize) -> Subscription<Arc<LogRecord>> {
        let owner = self.channel_owner();
        owner
            .record_channel()
            .subscribe(owner.node.shared.tick(), Some(capacity))
    }

    /// Invoke `callback` synchronously for each record published on this
    /// logger's channel (same routing rules as [`Logger::subscribe`]).
    pub fn listen<F>(&self, callback: F) -> Listener
    where
        F: Fn(&Arc<LogRecord>) + Send + Sync + 'static,
    {
        let owner = self.channel_owner();
        owner
            .record_channel()
            .listen(owner.node.shared.tick(), Arc::new(callback))
    }

    /// Close the record channel and detach all of its subscribers.
    ///
    /// A fresh channel is created by the next subscription. With hierarchical
    /// mode off this closes the root's channel.
    pub fn unsubscribe_all(&self) {
        let owner = self.channel_owner();
        let channel = owner.node.records.lock().take();
        if let Some(channel) = channel {
            channel.close();
        }
    }

    /// Number of subscribers on the channel serving this logger
    pub fn subscriber_count(&self) -> usize {
        let owner = self.channel_owner();
        let channel = owner.node.records.lock().clone();
        channel.map_or(0, |channel| channel.subscriber_count())
    }

    /// Log `message` at `level`
    #[inline]
    pub fn log<M: IntoMessage>(&self, level: Level, message: M) {
        self.log_with(level, message, LogExtras::default());
    }

    /// Log with an optional error, stack trace or explicit context
    pub fn log_with<M: IntoMessage>(&self, level: Level, message: M, extras: LogExtras) {
        if !self.is_loggable(&level) {
            return;
        }

        let (message, object) = message.into_message().into_parts();
        let shared = &self.node.shared;

        let mut extras = extras;
        if extras.stack_trace.is_none() && shared.captures_stack_trace(&level) {
            extras.stack_trace = Some(Arc::new(Backtrace::force_capture()));
            if extras.error.is_none() {
                extras.error = Some(Arc::new(AutogeneratedTrace {
                    level: level.clone(),
                    message: message.clone(),
                }));
            }
        }
        if extras.context.is_none() {
            extras.context = LogContext::current();
        }

        let record = Arc::new(LogRecord::new(
            level,
            message,
            object,
            Arc::clone(&self.node.full_name),
            shared.next_sequence(),
            shared.tick(),
            extras,
        ));
        shared.metrics.record_published();

        let delivered = self.deliver(&record);
        if delivered == 0 {
            shared.metrics.record_undelivered();
        } else {
            shared.metrics.record_deliveries(delivered);
        }
    }

    fn deliver(&self, record: &Arc<LogRecord>) -> u64 {
        let node = &self.node;
        if node.parent.is_none() {
            return self.publish(record);
        }
        if !node.shared.hierarchical() {
            return node.root.as_ref().map_or(0, |root| root.publish(record));
        }

        let mut delivered = 0;
        let mut target = Some(self);
        while let Some(logger) = target {
            delivered += logger.publish(record);
            target = logger.node.parent.as_ref();
        }
        delivered
    }

    fn publish(&self, record: &Arc<LogRecord>) -> u64 {
        let channel = self.node.records.lock().clone();
        channel.map_or(0, |channel| {
            channel.publish(
                record,
                record.epoch,
                &self.node.full_name,
                &self.node.shared.metrics,
            )
        })
    }

    #[inline]
    pub fn finest<M: IntoMessage>(&self, message: M) {
        self.log(Level::FINEST, message);
    }

    #[inline]
    pub fn finer<M: IntoMessage>(&self, message: M) {
        self.log(Level::FINER, message);
    }

    #[inline]
    pub fn fine<M: IntoMessage>(&self, message: M) {
        self.log(Level::FINE, message);
    }

    #[inline]
    pub fn config<M: IntoMessage>(&self, message: M) {
        self.log(Level::CONFIG, message);
    }

    #[inline]
    pub fn info<M: IntoMessage>(&self, message: M) {
        self.log(Level::INFO, message);
    }

    #[inline]
    pub fn warning<M: IntoMessage>(&self, message: M) {
        self.log(Level::WARNING, message);
    }

    #[inline]
    pub fn severe<M: IntoMessage>(&self, message: M) {
        self.log(Level::SEVERE, message);
    }

    #[inline]
    pub fn shout<M: IntoMessage>(&self, message: M) {
        self.log(Level::SHOUT, message);
    }
}

impl PartialEq for Logger {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}

impl Eq for Logger {}

impl Hash for Logger {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.node), state);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("full_name", &self.node.full_name)
            .field("level", &*self.node.level.read())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::Registry;
    use crate::lazy;
    use std::sync::atomic::AtomicUsize;

    fn hierarchical() -> Registry {
        Registry::builder().hierarchical(true).build()
    }

    #[test]
    fn test_full_names() {
        let registry = Registry::new();
        let root = registry.root();
        assert_eq!(root.full_name(), "");
        assert_eq!(root.name(), "");

        let leaf = registry.logger("a.b.c").unwrap();
        assert_eq!(leaf.name(), "c");
        assert_eq!(leaf.full_name(), "a.b.c");
        assert_eq!(leaf.parent().map(Logger::full_name), Some("a.b"));
    }

    #[test]
    fn test_effective_level_walks_ancestors() {
        let registry = hierarchical();
        let leaf = registry.logger("a.b.c").unwrap();
        let ab = registry.logger("a.b").unwrap();
        let sibling = registry.logger("a.x").unwrap();
        assert_eq!(leaf.effective_level(), Level::INFO);

        registry.root().set_level(Level::WARNING).unwrap();
        assert_eq!(leaf.effective_level(), Level::WARNING);

        ab.set_level(Level::FINE).unwrap();
        assert_eq!(leaf.effective_level(), Level::FINE);
        assert_eq!(sibling.effective_level(), Level::WARNING);
    }

    #[test]
    fn test_global_mode_uses_root_level() {
        let registry = Registry::new();
        let leaf = registry.logger("a.b").unwrap();

        registry.root().set_level(Level::SEVERE).unwrap();
        assert_eq!(leaf.effective_level(), Level::SEVERE);
        assert!(!leaf.is_loggable(&Level::WARNING));
        assert!(leaf.is_loggable(&Level::SHOUT));
    }

    #[test]
    fn test_override_ignored_after_leaving_hierarchical_mode() {
        let registry = hierarchical();
        let leaf = registry.logger("svc").unwrap();
        leaf.set_level(Level::FINEST).unwrap();
        assert_eq!(leaf.effective_level(), Level::FINEST);

        registry.set_hierarchical_logging_enabled(false);
        assert_eq!(leaf.effective_level(), Level::INFO);
        assert_eq!(leaf.level(), Some(Level::FINEST));
    }

    #[test]
    fn test_set_level_rejected_in_global_mode() {
        let registry = Registry::new();
        let leaf = registry.logger("a").unwrap();
        assert!(matches!(
            leaf.set_level(Level::FINE),
            Err(LoggerError::UnsupportedOperation { .. })
        ));
        assert!(matches!(
            leaf.set_level(None),
            Err(LoggerError::UnsupportedOperation { .. })
        ));
    }

    #[test]
    fn test_parentless_level_cannot_be_cleared() {
        let registry = hierarchical();
        assert!(matches!(
            registry.root().set_level(None),
            Err(LoggerError::UnsupportedOperation { .. })
        ));

        let detached = registry.detached("scratch");
        assert!(matches!(
            detached.set_level(None),
            Err(LoggerError::UnsupportedOperation { .. })
        ));
        detached.set_level(Level::ALL).unwrap();
        assert_eq!(detached.effective_level(), Level::ALL);
    }

    #[test]
    fn test_filtered_call_skips_lazy_message() {
        let registry = Registry::new();
        let logger = registry.logger("quiet").unwrap();
        let sub = logger.subscribe();
        let evaluations = AtomicUsize::new(0);

        logger.fine(lazy(|| {
            evaluations.fetch_add(1, Ordering::Relaxed);
            "never built"
        }));
        assert_eq!(evaluations.load(Ordering::Relaxed), 0);
        assert!(sub.try_recv().is_none());

        logger.info(lazy(|| {
            evaluations.fetch_add(1, Ordering::Relaxed);
            "built"
        }));
        assert_eq!(evaluations.load(Ordering::Relaxed), 1);
        assert_eq!(sub.try_recv().map(|r| r.message.clone()), Some("built".to_string()));
    }

    #[test]
    fn test_global_mode_routes_to_root() {
        let registry = Registry::new();
        let leaf = registry.logger("a.b").unwrap();
        let root_sub = registry.root().subscribe();
        let leaf_sub = leaf.subscribe();

        leaf.warning("careful");

        let seen_by_root = root_sub.try_recv().expect("root receives");
        let seen_by_leaf = leaf_sub.try_recv().expect("leaf view of root channel");
        assert!(Arc::ptr_eq(&seen_by_root, &seen_by_leaf));
        assert_eq!(&*seen_by_root.logger_name, "a.b");
        assert!(root_sub.try_recv().is_none());
    }

    #[test]
    fn test_hierarchical_delivery_reaches_ancestors() {
        let registry = hierarchical();
        let leaf = registry.logger("a.b.c").unwrap();
        let mid = registry.logger("a.b").unwrap();
        let other = registry.logger("x").unwrap();

        let leaf_sub = leaf.subscribe();
        let mid_sub = mid.subscribe();
        let root_sub = registry.root().subscribe();
        let other_sub = other.subscribe();

        leaf.info("hello");

        for sub in [&leaf_sub, &mid_sub, &root_sub] {
            let record = sub.try_recv().expect("delivered");
            assert_eq!(&*record.logger_name, "a.b.c");
            assert!(sub.try_recv().is_none());
        }
        assert!(other_sub.try_recv().is_none());
        assert_eq!(registry.metrics().deliveries(), 3);
    }

    #[test]
    fn test_detached_publishes_only_to_itself() {
        let registry = hierarchical();
        let detached = registry.detached("scratch");
        let root_sub = registry.root().subscribe();
        let own_sub = detached.subscribe();

        detached.info("private");

        assert_eq!(own_sub.try_recv().map(|r| r.message.clone()), Some("private".to_string()));
        assert!(root_sub.try_recv().is_none());
    }

    #[test]
    fn test_unsubscribe_all_in_global_mode_closes_root() {
        let registry = Registry::new();
        let leaf = registry.logger("a").unwrap();
        let root_sub = registry.root().subscribe();
        assert_eq!(registry.root().subscriber_count(), 1);

        leaf.unsubscribe_all();

        assert_eq!(registry.root().subscriber_count(), 0);
        assert_eq!(root_sub.iter().count(), 0);

        let fresh = registry.root().subscribe();
        leaf.info("again");
        assert!(fresh.try_recv().is_some());
    }

    #[test]
    fn test_auto_stack_trace() {
        let registry = Registry::builder()
            .record_stack_trace_at(Level::SEVERE)
            .build();
        let root = registry.root();
        let sub = root.subscribe();

        root.severe("boom");
        let record = sub.try_recv().expect("severe delivered");
        assert!(record.stack_trace.is_some());
        assert_eq!(
            record.error.as_ref().map(|e| e.to_string()),
            Some("autogenerated stack trace for SEVERE boom".to_string())
        );

        root.info("calm");
        let record = sub.try_recv().expect("info delivered");
        assert!(record.stack_trace.is_none());
        assert!(record.error.is_none());
    }

    #[test]
    fn test_explicit_error_kept_with_auto_trace() {
        let registry = Registry::builder()
            .record_stack_trace_at(Level::WARNING)
            .build();
        let root = registry.root();
        let sub = root.subscribe();

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        root.log_with(Level::WARNING, "lookup", LogExtras::new().error(io_err));

        let record = sub.try_recv().expect("delivered");
        assert!(record.stack_trace.is_some());
        assert_eq!(record.error.as_ref().map(|e| e.to_string()), Some("missing".to_string()));
    }

    #[test]
    fn test_context_capture() {
        let registry = Registry::new();
        let root = registry.root();
        let sub = root.subscribe();

        {
            let _guard = LogContext::new().with_field("request_id", "r-1").enter();
            root.info("ambient");
            root.log_with(
                Level::INFO,
                "explicit",
                LogExtras::new().context(LogContext::new().with_field("request_id", "r-2")),
            );
        }
        root.info("none");

        let ids: Vec<_> = sub
            .try_iter()
            .map(|r| r.context.as_ref().and_then(|c| c.get("request_id").map(|v| v.to_string())))
            .collect();
        assert_eq!(ids, vec![Some("r-1".to_string()), Some("r-2".to_string()), None]);
    }

    #[test]
    fn test_level_change_notifications() {
        let registry = hierarchical();
        let logger = registry.logger("net").unwrap();
        let changes = logger.on_level_changed();

        logger.set_level(Level::FINE).unwrap();
        logger.set_level(Level::custom("ALSO_FINE", 500)).unwrap();
        logger.set_level(None).unwrap();

        assert_eq!(changes.try_iter().collect::<Vec<_>>(), vec![Some(Level::FINE), None]);
    }

    #[test]
    fn test_listener_runs_synchronously() {
        let registry = Registry::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let listener = registry.root().listen(move |record| {
            seen_clone.lock().push(record.message.clone());
        });

        registry.root().info("one");
        assert_eq!(*seen.lock(), vec!["one".to_string()]);

        drop(listener);
        registry.root().info("two");
        assert_eq!(seen.lock().len(), 1);
    }

    #[test]
    fn test_sequence_numbers_increase() {
        let registry = Registry::new();
        let sub = registry.root().subscribe();
        registry.root().info("first");
        registry.root().info("second");

        let first = sub.try_recv().unwrap();
        let second = sub.try_recv().unwrap();
        assert!(second.sequence_number > first.sequence_number);
    }

    #[test]
    fn test_subscriber_added_mid_walk_misses_record() {
        let registry = hierarchical();
        let leaf = registry.logger("a.b.c").unwrap();
        let mid = registry.logger("a.b").unwrap();
        let root = registry.root();

        let late: Arc<Mutex<Option<Subscription<Arc<LogRecord>>>>> = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&late);
        let root_handle = root.clone();
        let _hook = mid.listen(move |record| {
            if record.message == "in flight" {
                *slot.lock() = Some(root_handle.subscribe());
            }
        });

        leaf.info("in flight");
        let sub = late.lock().take().expect("subscribed during delivery");
        assert!(sub.try_recv().is_none(), "record predates the subscription");

        leaf.info("next");
        assert_eq!(sub.try_recv().map(|r| r.message.clone()), Some("next".to_string()));
    }

    #[test]
    fn test_listener_removed_mid_delivery_gets_current_record() {
        let registry = Registry::new();
        let root = registry.root();
        let victim_hits = Arc::new(AtomicUsize::new(0));
        let victim_slot: Arc<Mutex<Option<Listener>>> = Arc::new(Mutex::new(None));

        let slot = Arc::clone(&victim_slot);
        let _remover = root.listen(move |_| {
            let victim = slot.lock().take();
            drop(victim);
        });
        let hits = Arc::clone(&victim_hits);
        *victim_slot.lock() = Some(root.listen(move |_| {
            hits.fetch_add(1, Ordering::Relaxed);
        }));
        let bystander = root.subscribe();

        root.info("first");
        assert_eq!(victim_hits.load(Ordering::Relaxed), 1);
        assert_eq!(root.subscriber_count(), 2);

        root.info("second");
        assert_eq!(victim_hits.load(Ordering::Relaxed), 1);
        assert_eq!(bystander.try_iter().count(), 2);
    }

    #[test]
    fn test_bounded_subscription() {
        let registry = Registry::new();
        let logger = registry.logger("bursty").unwrap();
        let small = logger.subscribe_bounded(1);

        logger.info("kept");
        logger.info("dropped");

        assert_eq!(small.try_recv().map(|r| r.message.clone()), Some("kept".to_string()));
        assert!(small.try_recv().is_none());
        assert_eq!(registry.metrics().dropped(), 1);
        assert_eq!(registry.root().subscriber_count(), 1);
    }

    #[test]
    fn test_number_message_keeps_value() {
        let registry = Registry::new();
        let root = registry.root();
        let sub = root.subscribe();

        root.info(42);

        let record = sub.try_recv().expect("delivered");
        assert_eq!(record.message, "42");
        assert_eq!(
            record.object.as_deref().and_then(|o| o.downcast_ref::<i32>()),
            Some(&42)
        );
    }
}
