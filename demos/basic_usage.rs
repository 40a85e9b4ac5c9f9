//! Basic logger usage example
//!
//! Demonstrates the root logger in global mode, printing records through a
//! listener, runtime level changes and lazy messages.
//!
//! Run with: cargo run --example basic_usage

use logging_tree::prelude::*;
use logging_tree::{info, warning};

fn main() -> Result<()> {
    println!("=== Logging Tree - Basic Usage Example ===\n");

    let registry = Registry::new();
    let root = registry.root();

    // Print every record that reaches the root channel
    let _printer = root.listen(|record| {
        println!("   {} {}", record.time.format("%H:%M:%S%.3f"), record);
    });

    let http = registry.logger("app.http")?;

    println!("1. Logging at different levels (root level INFO):");
    http.finest("This is a finest message (hidden)");
    http.fine("This is a fine message (hidden)");
    http.info("This is an info message");
    http.warning("This is a warning message");
    http.severe("This is a severe message");

    println!("\n2. Changing the root level to ALL:");
    root.set_level(Level::ALL)?;
    http.finest("Finest message (now visible)");

    println!("\n3. Named loggers cannot override levels in global mode:");
    match http.set_level(Level::OFF) {
        Err(e) => println!("   Rejected: {}", e),
        Ok(()) => println!("   Unexpectedly accepted"),
    }

    println!("\n4. Lazy messages are only built when accepted:");
    root.set_level(Level::WARNING)?;
    http.info(lazy(|| {
        println!("   (never printed)");
        "expensive"
    }));
    info!(http, "skipped {}", "formatting");
    warning!(http, "formatted only once: {}", 42);

    println!("\n5. Automatic stack traces:");
    registry.set_record_stack_trace_at_level(Level::SEVERE);
    let sub = root.subscribe();
    http.severe("Something broke");
    if let Some(record) = sub.try_recv() {
        println!(
            "   stack trace captured: {}, error: {}",
            record.stack_trace.is_some(),
            record.error.as_ref().map(|e| e.to_string()).unwrap_or_default()
        );
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
