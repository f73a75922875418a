//! # Rust Thread Factory
//!
//! Named, policy-enforcing thread factory for the thread pools that back
//! critical coordination and data-processing work.
//!
//! ## Features
//!
//! - **Deterministic Names**: every thread is called `<pool-name>-thread-<n>`,
//!   numbered from 1 per factory instance
//! - **Fail-Fast Error Policy**: uncaught errors and panics are logged and terminate
//!   the process unless another handler is supplied
//! - **Execution Context**: an opaque per-thread handle visible to the thread's code
//! - **Priorities and Groups**: scheduling priority and thread group membership
//!   are copied onto every produced thread
//! - **Builder and Config**: fluent builder plus a serde-loadable settings section
//!
//! The factory only produces threads. Starting them, feeding them work and
//! joining them is up to the executor that asked for them.
//!
//! ## Quick Start
//!
//! ```rust
//! use rust_thread_factory::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let factory = ExecutorThreadFactory::new("coordinator-event")?;
//!
//! let handles = (0..3)
//!     .map(|_| factory.new_thread(|| Ok(())).start())
//!     .collect::<Result<Vec<_>>>()?;
//!
//! for handle in handles {
//!     handle.join().expect("worker panicked");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom Error Handler
//!
//! ```rust
//! use rust_thread_factory::prelude::*;
//! use std::sync::Arc;
//! use std::thread::Thread;
//!
//! # fn main() -> Result<()> {
//! let handler: SharedErrorHandler = Arc::new(|thread: &Thread, error: &UncaughtError| {
//!     log::warn!("{:?} failed: {}", thread.name(), error);
//! });
//!
//! let factory = ExecutorThreadFactory::builder()
//!     .pool_name("best-effort")
//!     .error_handler(handler)
//!     .build()?;
//!
//! factory
//!     .new_thread(|| Err(ThreadError::other("lost connection")))
//!     .start()?
//!     .join()
//!     .expect("handler runs on the failing thread");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod context;
pub mod core;
pub mod factory;
pub mod handler;
pub mod prelude;
pub mod tracing;

pub use crate::core::{BoxedJob, Job, Result, ThreadError, ThreadPriority};
pub use config::ThreadFactoryConfig;
pub use context::{ExecutionContext, ThreadGroup};
pub use factory::{
    ExecutorThreadFactory, ExecutorThreadFactoryBuilder, ProducedThread, ThreadFactory,
};
pub use handler::{FatalExitHandler, SharedErrorHandler, UncaughtError, UncaughtErrorHandler};
