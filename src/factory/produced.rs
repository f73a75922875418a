//! Threads produced by a factory, configured but not yet started

use crate::context::{ExecutionContext, ThreadGroup};
use crate::core::{BoxedJob, Result, ThreadError, ThreadPriority};
use crate::handler::{HandledPanicScope, SharedErrorHandler, UncaughtError};
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
use std::thread::{self, JoinHandle};

/// A configured thread that has not been started yet.
///
/// The executor that asked for it owns its lifecycle: it decides when to call
/// [`ProducedThread::start`] and whether to join the returned handle.
pub struct ProducedThread {
    name: String,
    priority: ThreadPriority,
    handler: Option<SharedErrorHandler>,
    context: Option<ExecutionContext>,
    group: ThreadGroup,
    job: BoxedJob,
}

impl ProducedThread {
    pub(crate) fn new(
        name: String,
        priority: ThreadPriority,
        handler: Option<SharedErrorHandler>,
        context: Option<ExecutionContext>,
        group: ThreadGroup,
        job: BoxedJob,
    ) -> Self {
        Self {
            name,
            priority,
            handler,
            context,
            group,
            job,
        }
    }

    /// Thread name, `<pool-name>-thread-<n>`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Always true: a running produced thread never keeps the process alive
    pub fn is_daemon(&self) -> bool {
        true
    }

    /// Scheduling priority applied when the thread starts
    pub fn priority(&self) -> ThreadPriority {
        self.priority
    }

    /// Handler receiving uncaught failures, if one is attached
    pub fn error_handler(&self) -> Option<&SharedErrorHandler> {
        self.handler.as_ref()
    }

    /// Execution context visible inside the thread, if one is attached
    pub fn execution_context(&self) -> Option<&ExecutionContext> {
        self.context.as_ref()
    }

    /// Group the thread joins when it starts
    pub fn thread_group(&self) -> &ThreadGroup {
        &self.group
    }

    /// Spawn the OS thread and start running the job.
    ///
    /// # Errors
    ///
    /// Returns [`ThreadError::SpawnError`] if the OS cannot create another
    /// thread. The failure is not retried.
    pub fn start(self) -> Result<JoinHandle<()>> {
        let name = self.name.clone();
        thread::Builder::new()
            .name(name.clone())
            .spawn(move || self.run())
            .map_err(|e| ThreadError::spawn_with_source(name, "Cannot create thread", e))
    }

    /// Run body of the produced thread
    fn run(self) {
        let ProducedThread {
            name,
            priority,
            handler,
            context,
            group,
            job,
        } = self;

        #[cfg(feature = "tracing")]
        let span = crate::tracing::events::thread_span(&name, priority);
        #[cfg(feature = "tracing")]
        let _guard = span.enter();
        #[cfg(feature = "tracing")]
        crate::tracing::events::record_thread_started(group.name());

        let _membership = group.join_current();
        ExecutionContext::install(context);
        priority.apply_to_current();

        let job_type = job.job_type().to_string();
        let outcome = {
            let _handled = handler.as_ref().map(|_| HandledPanicScope::enter());
            catch_unwind(AssertUnwindSafe(move || job.run()))
        };

        match (outcome, handler) {
            (Ok(Ok(())), _) => {}
            (Ok(Err(e)), Some(handler)) => {
                let error = UncaughtError::failed(&job_type, e);
                handler.uncaught_error(&thread::current(), &error);
            }
            (Err(payload), Some(handler)) => {
                let error = UncaughtError::panicked(&job_type, payload.as_ref());
                handler.uncaught_error(&thread::current(), &error);
            }
            (Ok(Err(e)), None) => {
                log::warn!("Thread '{}': job '{}' failed: {}", name, job_type, e);
            }
            (Err(payload), None) => resume_unwind(payload),
        }
    }
}

impl std::fmt::Debug for ProducedThread {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProducedThread")
            .field("name", &self.name)
            .field("daemon", &self.is_daemon())
            .field("priority", &self.priority)
            .field("error_handler", &self.handler.as_ref().map(|_| "<handler>"))
            .field("execution_context", &self.context)
            .field("thread_group", &self.group)
            .field("job", &self.job)
            .finish()
    }
}
