//! Factories built without an explicit handler stop the process when one of
//! their threads fails.
//!
//! Each test re-runs itself as a child process: the child builds a factory
//! through one construction path and lets a job panic, the parent checks the
//! exit status and what was logged.

use rust_thread_factory::prelude::*;
use std::env;
use std::process::Command;

const CHILD_MODE: &str = "RUST_THREAD_FACTORY_CHILD_MODE";

fn run_child(mode: &str) -> ! {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Error)
        .init();

    let factory = match mode {
        "new" => ExecutorThreadFactory::new("crit"),
        "context" => ExecutorThreadFactory::with_execution_context(
            "crit",
            ExecutionContext::new("coordinator"),
        ),
        "builder" => ExecutorThreadFactory::builder().pool_name("crit").build(),
        other => panic!("unknown child mode {other}"),
    }
    .expect("Failed to create factory");

    let joined = factory
        .new_thread(|| -> Result<()> { panic!("controller lost its session") })
        .start()
        .expect("Failed to start thread")
        .join();

    panic!("process survived a failed critical thread: {:?}", joined.is_ok());
}

fn assert_default_policy_stops_process(test_name: &str, mode: &str) {
    if let Ok(mode) = env::var(CHILD_MODE) {
        run_child(&mode);
    }

    let output = Command::new(env::current_exe().expect("test binary path"))
        .args([test_name, "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_MODE, mode)
        .output()
        .expect("Failed to run child process");
    let stderr = String::from_utf8_lossy(&output.stderr);

    let expected = if cfg!(unix) {
        FatalExitHandler::EXIT_CODE & 0xff
    } else {
        FatalExitHandler::EXIT_CODE
    };
    assert_eq!(output.status.code(), Some(expected), "stderr:\n{stderr}");
    assert!(
        stderr.contains("FATAL: Thread 'crit-thread-1' produced an uncaught error"),
        "stderr:\n{stderr}"
    );
    assert!(stderr.contains("controller lost its session"), "stderr:\n{stderr}");
    assert!(
        !stderr.contains("'crit-thread-1' panicked at"),
        "panic reported twice, stderr:\n{stderr}"
    );
}

#[test]
fn test_plain_constructor_stops_process() {
    assert_default_policy_stops_process("test_plain_constructor_stops_process", "new");
}

#[test]
fn test_context_constructor_stops_process() {
    assert_default_policy_stops_process("test_context_constructor_stops_process", "context");
}

#[test]
fn test_default_builder_stops_process() {
    assert_default_policy_stops_process("test_default_builder_stops_process", "builder");
}
