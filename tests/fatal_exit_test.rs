//! The default fail-fast policy, observed through a capturing logger and an
//! injected terminator instead of a real process exit.
//!
//! Lives in its own test binary because it installs the global logger.

use log::{Level, LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use rust_thread_factory::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

struct CapturingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records
            .lock()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

fn logger() -> &'static CapturingLogger {
    static LOGGER: OnceLock<&'static CapturingLogger> = OnceLock::new();
    LOGGER.get_or_init(|| {
        let logger: &'static CapturingLogger = Box::leak(Box::new(CapturingLogger {
            records: Mutex::new(Vec::new()),
        }));
        log::set_logger(logger).expect("logger installed once");
        log::set_max_level(LevelFilter::Trace);
        logger
    })
}

fn fatal_records_for(thread_name: &str) -> Vec<String> {
    logger()
        .records
        .lock()
        .iter()
        .filter(|(level, msg)| *level == Level::Error && msg.contains(thread_name))
        .map(|(_, msg)| msg.clone())
        .collect()
}

#[test]
fn test_fatal_handler_logs_then_terminates_on_panic() {
    logger();
    let terminations = Arc::new(AtomicUsize::new(0));
    let terminations_clone = Arc::clone(&terminations);

    let factory = ExecutorThreadFactory::builder()
        .pool_name("coordinator")
        .error_handler(Arc::new(FatalExitHandler::with_terminator(move |code| {
            assert_eq!(code, FatalExitHandler::EXIT_CODE);
            terminations_clone.fetch_add(1, Ordering::SeqCst);
        })))
        .build()
        .expect("Failed to build factory");

    factory
        .new_thread(|| -> Result<()> { panic!("leader epoch mismatch") })
        .start()
        .expect("Failed to start thread")
        .join()
        .expect("terminator hook returned instead of exiting");

    assert_eq!(terminations.load(Ordering::SeqCst), 1);

    let records = fatal_records_for("'coordinator-thread-1'");
    assert_eq!(records.len(), 1);
    assert!(records[0].starts_with("FATAL"));
    assert!(records[0].contains("leader epoch mismatch"));
}

#[test]
fn test_fatal_handler_logs_then_terminates_on_returned_error() {
    logger();
    let terminations = Arc::new(AtomicUsize::new(0));
    let terminations_clone = Arc::clone(&terminations);

    let factory = ExecutorThreadFactory::with_error_handler(
        "log-flusher",
        Arc::new(FatalExitHandler::with_terminator(move |_| {
            terminations_clone.fetch_add(1, Ordering::SeqCst);
        })),
    )
    .expect("Failed to create factory");

    factory
        .new_thread(|| Err(ThreadError::execution("Flush", "segment file vanished")))
        .start()
        .expect("Failed to start thread")
        .join()
        .expect("terminator hook returned instead of exiting");

    assert_eq!(terminations.load(Ordering::SeqCst), 1);

    let records = fatal_records_for("'log-flusher-thread-1'");
    assert_eq!(records.len(), 1);
    assert!(records[0].contains("segment file vanished"));
}

#[test]
fn test_successful_jobs_never_terminate() {
    logger();
    let terminations = Arc::new(AtomicUsize::new(0));
    let terminations_clone = Arc::clone(&terminations);

    let factory = ExecutorThreadFactory::builder()
        .pool_name("healthy")
        .error_handler(Arc::new(FatalExitHandler::with_terminator(move |_| {
            terminations_clone.fetch_add(1, Ordering::SeqCst);
        })))
        .build()
        .expect("Failed to build factory");

    let handles: Vec<_> = (0..4)
        .map(|_| factory.new_thread(|| Ok(())).start().expect("Failed to start thread"))
        .collect();
    for handle in handles {
        handle.join().expect("thread panicked");
    }

    assert_eq!(terminations.load(Ordering::SeqCst), 0);
    assert!(fatal_records_for("'healthy-thread-").is_empty());
}
