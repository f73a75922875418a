//! Tracing integration for observability.
//!
//! With the `tracing` feature enabled, factories emit structured events when
//! they produce threads, produced threads run inside a `produced_thread` span,
//! and uncaught errors are recorded before the handler runs.
//!
//! # Example
//!
//! ```rust,ignore
//! use rust_thread_factory::prelude::*;
//! use tracing_subscriber::{fmt, prelude::*, EnvFilter};
//!
//! tracing_subscriber::registry()
//!     .with(fmt::layer())
//!     .with(EnvFilter::from_default_env()
//!         .add_directive("rust_thread_factory=debug".parse().unwrap()))
//!     .init();
//!
//! let factory = ExecutorThreadFactory::new("io-pool")?;
//! factory.new_thread(|| Ok(())).start()?;
//! ```

/// Event recording functions.
#[cfg(feature = "tracing")]
pub mod events {
    use crate::core::ThreadPriority;
    use crate::handler::UncaughtError;

    /// Span entered for the whole run body of a produced thread.
    #[inline]
    pub fn thread_span(name: &str, priority: ThreadPriority) -> tracing::Span {
        tracing::debug_span!("produced_thread", thread = name, priority = priority.value())
    }

    /// Records that a factory produced a thread.
    #[inline]
    pub fn record_thread_created(name: &str, number: u64) {
        tracing::trace!(
            counter.threads_created = 1,
            thread = name,
            number = number,
            "thread produced"
        );
    }

    /// Records that a produced thread started running.
    #[inline]
    pub fn record_thread_started(group: &str) {
        tracing::debug!(group = group, "produced thread started");
    }

    /// Records an uncaught failure of a produced thread.
    #[inline]
    pub fn record_uncaught_error(name: &str, error: &UncaughtError) {
        tracing::error!(
            thread = name,
            panicked = error.is_panic(),
            error = %error,
            "uncaught error on produced thread"
        );
    }
}
