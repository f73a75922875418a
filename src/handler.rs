//! Uncaught error handling for produced threads
//!
//! When a job running on a produced thread returns an error or panics, the
//! failure is wrapped in an [`UncaughtError`] and handed to the factory's
//! [`UncaughtErrorHandler`] on the failing thread itself.
//!
//! The default handler is [`FatalExitHandler`]: it logs the failure and
//! terminates the process. Threads from these factories back critical
//! coordination work, so a dead worker must not go unnoticed. Tests and
//! degraded-mode setups substitute their own handler instead.
//!
//! A panic routed to a handler is reported by that handler only. The first
//! time a handler-backed thread runs, a panic hook is installed that wraps the
//! hook already in place and skips it while such a job is running. Panics
//! raised by the handler itself, or by any other thread, still reach the
//! previous hook. A hook installed later with [`std::panic::set_hook`]
//! replaces this one and brings the default report back.

use crate::core::ThreadError;
use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::Cell;
use std::fmt;
use std::panic;
use std::sync::{Arc, Once};
use std::thread::Thread;

thread_local! {
    static HANDLED_BY_FACTORY: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

fn install_quiet_hook() {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !HANDLED_BY_FACTORY.with(Cell::get) {
                previous(info);
            }
        }));
    });
}

/// While alive, panics on the current thread skip the panic hook that was
/// installed before this crate's, since an [`UncaughtErrorHandler`] will
/// report them instead.
pub(crate) struct HandledPanicScope {
    _not_send: std::marker::PhantomData<*const ()>,
}

impl HandledPanicScope {
    pub(crate) fn enter() -> Self {
        install_quiet_hook();
        HANDLED_BY_FACTORY.with(|flag| flag.set(true));
        Self {
            _not_send: std::marker::PhantomData,
        }
    }
}

impl Drop for HandledPanicScope {
    fn drop(&mut self) {
        HANDLED_BY_FACTORY.with(|flag| flag.set(false));
    }
}

/// What went wrong on a produced thread
#[derive(Debug, thiserror::Error)]
pub enum UncaughtCause {
    /// The job returned an error
    #[error("job '{job_type}' failed: {source}")]
    Failed {
        /// Type name of the job
        job_type: String,
        /// Error returned by the job
        #[source]
        source: ThreadError,
    },

    /// The job panicked
    #[error("job '{job_type}' panicked: {message}")]
    Panicked {
        /// Type name of the job
        job_type: String,
        /// Panic payload rendered as text
        message: String,
    },
}

/// An uncaught failure of a produced thread, with the backtrace captured
/// where the failure was observed
pub struct UncaughtError {
    cause: UncaughtCause,
    backtrace: Backtrace,
}

impl UncaughtError {
    pub(crate) fn failed(job_type: &str, source: ThreadError) -> Self {
        Self {
            cause: UncaughtCause::Failed {
                job_type: job_type.to_string(),
                source,
            },
            backtrace: Backtrace::force_capture(),
        }
    }

    pub(crate) fn panicked(job_type: &str, payload: &(dyn Any + Send)) -> Self {
        Self {
            cause: UncaughtCause::Panicked {
                job_type: job_type.to_string(),
                message: panic_message(payload),
            },
            backtrace: Backtrace::force_capture(),
        }
    }

    /// The underlying cause
    pub fn cause(&self) -> &UncaughtCause {
        &self.cause
    }

    /// Returns true if the job panicked rather than returning an error
    pub fn is_panic(&self) -> bool {
        matches!(self.cause, UncaughtCause::Panicked { .. })
    }

    /// Backtrace captured on the failing thread
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }
}

impl fmt::Display for UncaughtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.cause, f)
    }
}

impl fmt::Debug for UncaughtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UncaughtError")
            .field("cause", &self.cause)
            .finish_non_exhaustive()
    }
}

impl std::error::Error for UncaughtError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Receives uncaught failures of produced threads.
///
/// Invoked on the failing thread, after the job has stopped running.
/// Any `Fn(&Thread, &UncaughtError) + Send + Sync` closure is a handler.
pub trait UncaughtErrorHandler: Send + Sync {
    /// Handle a failure of `thread`
    fn uncaught_error(&self, thread: &Thread, error: &UncaughtError);
}

impl<F> UncaughtErrorHandler for F
where
    F: Fn(&Thread, &UncaughtError) + Send + Sync,
{
    fn uncaught_error(&self, thread: &Thread, error: &UncaughtError) {
        self(thread, error)
    }
}

/// Shared handler as stored by factories and produced threads
pub type SharedErrorHandler = Arc<dyn UncaughtErrorHandler>;

type Terminator = Arc<dyn Fn(i32) + Send + Sync>;

/// Logs an uncaught failure and terminates the process.
///
/// This is the default handler of every factory.
#[derive(Clone)]
pub struct FatalExitHandler {
    exit_code: i32,
    terminate: Terminator,
}

impl FatalExitHandler {
    /// Exit code used when a critical thread dies
    pub const EXIT_CODE: i32 = -17;

    /// Handler that exits the process with [`Self::EXIT_CODE`]
    pub fn new() -> Self {
        Self {
            exit_code: Self::EXIT_CODE,
            terminate: Arc::new(|code| std::process::exit(code)),
        }
    }

    /// Handler that calls `terminate` instead of exiting the process.
    ///
    /// The hook receives the exit code. Used to observe termination in tests.
    pub fn with_terminator<F>(terminate: F) -> Self
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        Self {
            exit_code: Self::EXIT_CODE,
            terminate: Arc::new(terminate),
        }
    }

    /// The exit code passed to the terminator
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// This handler as a shareable handler value
    pub fn shared() -> SharedErrorHandler {
        Arc::new(Self::new())
    }
}

impl Default for FatalExitHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FatalExitHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FatalExitHandler")
            .field("exit_code", &self.exit_code)
            .finish_non_exhaustive()
    }
}

impl UncaughtErrorHandler for FatalExitHandler {
    fn uncaught_error(&self, thread: &Thread, error: &UncaughtError) {
        let name = thread.name().unwrap_or("<unnamed>");

        #[cfg(feature = "tracing")]
        crate::tracing::events::record_uncaught_error(name, error);

        log::error!(
            "FATAL: Thread '{}' produced an uncaught error: {}. Stopping the process...\n{}",
            name,
            error,
            error.backtrace()
        );

        (self.terminate)(self.exit_code);
    }
}
