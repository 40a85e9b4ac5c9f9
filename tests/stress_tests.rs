//! Concurrency stress tests
//!
//! These tests verify:
//! - Concurrent lookups of one name yield a single node
//! - Concurrent first subscriptions share one channel
//! - Subscribing and unsubscribing while other threads publish
//! - Level change notifications follow the order of racing writes
//! - Logging from async tasks

use logging_tree::prelude::*;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

const THREADS: usize = 8;

#[test]
fn test_concurrent_creation_same_path() {
    let registry = Arc::new(Registry::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                registry.logger("svc.worker.pool.task").unwrap()
            })
        })
        .collect();

    let loggers: HashSet<Logger> = handles
        .into_iter()
        .map(|h| h.join().expect("thread panicked"))
        .collect();

    assert_eq!(loggers.len(), 1, "one node per name");
    assert_eq!(registry.attached_count(), 5);
    let pool = registry.logger("svc.worker.pool").unwrap();
    assert_eq!(pool.children().len(), 1);
}

#[test]
fn test_concurrent_distinct_children() {
    let registry = Arc::new(Registry::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for j in 0..50 {
                    registry.logger(&format!("shared.t{}.n{}", i, j)).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread panicked");
    }

    let shared = registry.logger("shared").unwrap();
    assert_eq!(shared.children().len(), THREADS);
    assert_eq!(registry.attached_count(), 1 + 1 + THREADS + THREADS * 50);
}

#[test]
fn test_concurrent_first_subscribers() {
    let registry = Arc::new(Registry::builder().hierarchical(true).build());
    let logger = registry.logger("hot").unwrap();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let logger = logger.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                logger.subscribe()
            })
        })
        .collect();

    let subs: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("thread panicked"))
        .collect();

    assert_eq!(logger.subscriber_count(), THREADS);
    logger.info("broadcast");
    for sub in &subs {
        assert_eq!(sub.try_recv().map(|r| r.message.clone()), Some("broadcast".to_string()));
    }
}

#[test]
fn test_subscribe_churn_while_publishing() {
    let registry = Arc::new(Registry::new());
    let root = registry.root();
    let stop = Arc::new(AtomicBool::new(false));
    let received = Arc::new(AtomicUsize::new(0));

    let publishers: Vec<_> = (0..4)
        .map(|i| {
            let root = root.clone();
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                let mut sent = 0u64;
                while !stop.load(Ordering::Relaxed) {
                    root.info(format!("publisher {} message {}", i, sent));
                    sent += 1;
                }
                sent
            })
        })
        .collect();

    let churners: Vec<_> = (0..4)
        .map(|_| {
            let root = root.clone();
            let received = Arc::clone(&received);
            thread::spawn(move || {
                for _ in 0..200 {
                    let sub = root.subscribe();
                    let counter = Arc::clone(&received);
                    let listener = root.listen(move |_| {
                        counter.fetch_add(1, Ordering::Relaxed);
                    });
                    received.fetch_add(sub.try_iter().count(), Ordering::Relaxed);
                    drop(listener);
                    drop(sub);
                }
            })
        })
        .collect();

    for churner in churners {
        churner.join().expect("churner panicked");
    }
    stop.store(true, Ordering::Relaxed);
    let sent: u64 = publishers
        .into_iter()
        .map(|p| p.join().expect("publisher panicked"))
        .sum();

    assert_eq!(root.subscriber_count(), 0, "every subscription detached");
    assert_eq!(registry.metrics().records_published(), sent);
    assert_eq!(registry.metrics().listener_panics(), 0);
}

#[test]
fn test_unsubscribe_all_during_publish() {
    let registry = Arc::new(Registry::builder().hierarchical(true).build());
    let logger = registry.logger("flappy").unwrap();
    let stop = Arc::new(AtomicBool::new(false));

    let publisher = {
        let logger = logger.clone();
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                logger.info("tick");
            }
        })
    };

    for _ in 0..100 {
        let sub = logger.subscribe();
        logger.unsubscribe_all();
        // a closed subscription drains and then ends
        sub.iter().for_each(drop);
    }

    stop.store(true, Ordering::Relaxed);
    publisher.join().expect("publisher panicked");
    assert_eq!(logger.subscriber_count(), 0);
}

#[test]
fn test_panicking_listener_isolated() {
    let registry = Registry::new();
    let root = registry.root();
    let _bad = root.listen(|_| panic!("listener failure"));
    let sub = root.subscribe();

    for i in 0..10 {
        root.info(format!("message {}", i));
    }

    assert_eq!(sub.try_iter().count(), 10);
    assert_eq!(registry.metrics().listener_panics(), 10);
}

#[test]
fn test_level_changes_while_logging() {
    let registry = Arc::new(Registry::builder().hierarchical(true).build());
    let logger = registry.logger("toggle.me").unwrap();
    let sub = logger.subscribe();
    let stop = Arc::new(AtomicBool::new(false));

    let toggler = {
        let logger = logger.clone();
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            let mut on = false;
            while !stop.load(Ordering::Relaxed) {
                let level = if on { Level::ALL } else { Level::OFF };
                logger.set_level(level).unwrap();
                on = !on;
            }
        })
    };

    for _ in 0..10_000 {
        logger.finest("maybe");
    }
    stop.store(true, Ordering::Relaxed);
    toggler.join().expect("toggler panicked");

    // every record that got through is complete
    for record in sub.try_iter() {
        assert_eq!(record.message, "maybe");
        assert_eq!(record.level, Level::FINEST);
    }
}

#[test]
fn test_racing_setters_notify_in_write_order() {
    let registry = Arc::new(Registry::builder().hierarchical(true).build());
    let logger = registry.logger("contended").unwrap();
    let changes = logger.on_level_changed();
    let barrier = Arc::new(Barrier::new(4));

    let setters: Vec<_> = [Level::FINE, Level::INFO, Level::WARNING, Level::SEVERE]
        .into_iter()
        .map(|level| {
            let logger = logger.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..2_000 {
                    let next = if i % 2 == 0 { Some(level.clone()) } else { None };
                    logger.set_level(next).unwrap();
                }
            })
        })
        .collect();

    for setter in setters {
        setter.join().expect("setter panicked");
    }

    let last = changes.try_iter().last().expect("at least one change");
    assert_eq!(last, logger.level(), "last notification matches the stored level");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_logging_from_tasks() {
    let registry = Arc::new(Registry::builder().hierarchical(true).build());
    let sub = registry.root().subscribe();

    let tasks: Vec<_> = (0..16)
        .map(|i| {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                let logger = registry.logger(&format!("tasks.t{}", i)).unwrap();
                for j in 0..100 {
                    logger.info(format!("task {} step {}", i, j));
                    tokio::task::yield_now().await;
                }
            })
        })
        .collect();

    for task in tasks {
        task.await.expect("task panicked");
    }

    let mut count = 0;
    while sub.recv_timeout(Duration::from_millis(50)).is_some() {
        count += 1;
    }
    assert_eq!(count, 16 * 100);
}
