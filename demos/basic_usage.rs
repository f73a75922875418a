//! Basic usage of the thread factory
//!
//! Run with: `RUST_LOG=debug cargo run --example basic_usage`

use rust_thread_factory::prelude::*;
use std::sync::Arc;
use std::thread::Thread;

fn main() -> Result<()> {
    env_logger::init();

    println!("=== Default factory ===");
    let factory = ExecutorThreadFactory::new("coordinator-event")?;
    let handles = (0..3)
        .map(|i| {
            factory
                .new_thread(move || {
                    let name = std::thread::current().name().unwrap_or("unnamed").to_string();
                    println!("{} handling event {}", name, i);
                    Ok(())
                })
                .start()
        })
        .collect::<Result<Vec<_>>>()?;
    for handle in handles {
        handle.join().expect("worker panicked");
    }

    println!("\n=== Builder with a non-terminating handler ===");
    let handler: SharedErrorHandler = Arc::new(|thread: &Thread, error: &UncaughtError| {
        println!("{} failed: {}", thread.name().unwrap_or("unnamed"), error);
    });
    let factory = ExecutorThreadFactory::builder()
        .pool_name("best-effort")
        .thread_priority(ThreadPriority::MIN)
        .error_handler(handler)
        .execution_context(ExecutionContext::new("best-effort-resources"))
        .build()?;

    factory
        .new_thread(|| {
            let context = ExecutionContext::current();
            let resources = context.as_ref().and_then(|c| c.downcast_ref::<&'static str>());
            println!("running with context {:?}", resources);
            Err(ThreadError::other("simulated failure"))
        })
        .start()?
        .join()
        .expect("handler runs on the failing thread");

    println!("\n=== Key Points ===");
    println!("1. Threads are named <pool>-thread-<n>, numbered per factory");
    println!("2. Without a custom handler an uncaught error terminates the process");
    println!("3. The executor owns every thread after new_thread returns it");
    Ok(())
}
