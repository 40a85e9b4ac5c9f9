//! Hierarchical logging example
//!
//! Demonstrates per-logger levels, inheritance, subscriptions on inner nodes,
//! level change notifications and contextual fields.
//!
//! Run with: cargo run --example hierarchical

use logging_tree::prelude::*;

fn main() -> Result<()> {
    println!("=== Logging Tree - Hierarchical Example ===\n");

    let registry = Registry::builder().hierarchical(true).build();
    let root = registry.root();
    let db = registry.logger("app.db")?;
    let cache = registry.logger("app.cache")?;
    let app = registry.logger("app")?;

    let _printer = root.listen(|record| {
        let fields = record
            .context
            .as_ref()
            .map(|c| format!(" {}", c))
            .unwrap_or_default();
        println!("   [root] {}{}", record, fields);
    });

    println!("1. Inherited levels:");
    app.set_level(Level::WARNING)?;
    println!("   app.db    -> {}", db.effective_level());
    println!("   app.cache -> {}", cache.effective_level());
    db.info("db info (hidden, inherits WARNING)");
    cache.warning("cache warning (visible)");

    println!("\n2. Overriding a single branch:");
    let changes = db.on_level_changed();
    db.set_level(Level::FINE)?;
    db.fine("db fine (visible, own level)");
    cache.fine("cache fine (hidden)");
    db.set_level(None)?;
    for change in changes.try_iter() {
        match change {
            Some(level) => println!("   app.db level set to {}", level),
            None => println!("   app.db level cleared"),
        }
    }

    println!("\n3. Subscribing to a subtree:");
    let app_records = app.subscribe();
    db.severe("db failure");
    cache.severe("cache failure");
    registry.logger("other")?.severe("outside the app subtree");
    for record in app_records.try_iter() {
        println!("   [app] from {}", record.logger_name);
    }

    println!("\n4. Contextual fields:");
    {
        let _guard = LogContext::new()
            .with_field("request_id", "req-17")
            .with_field("attempt", 2)
            .enter();
        db.warning("slow query");
    }

    println!("\n5. Detached loggers stay out of the tree:");
    let scratch = registry.detached("scratch");
    let scratch_records = scratch.subscribe();
    scratch.info("only visible to scratch subscribers");
    println!("   scratch received {} record(s)", scratch_records.len());

    let metrics = registry.metrics();
    println!(
        "\nPublished {} records, {} deliveries, {} undelivered",
        metrics.records_published(),
        metrics.deliveries(),
        metrics.undelivered()
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
