//! Named thread factory for critical thread pools

use crate::context::{ExecutionContext, ThreadGroup};
use crate::core::{BoxedJob, Job, Result, ThreadError, ThreadPriority};
use crate::factory::builder::ExecutorThreadFactoryBuilder;
use crate::factory::produced::ProducedThread;
use crate::handler::{FatalExitHandler, SharedErrorHandler};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Produces threads for an executor.
///
/// Executors call [`ThreadFactory::new_thread`] whenever they need another
/// worker and own the returned thread from then on.
pub trait ThreadFactory: Send + Sync {
    /// Produce a new, not yet started thread that will run `job`
    fn new_thread(&self, job: BoxedJob) -> ProducedThread;
}

/// A thread factory for thread pools that back critical coordination and
/// processing work, where a failing worker must never go unnoticed.
///
/// Threads are named `<pool-name>-thread-<n>` where `n` counts up from 1 per
/// factory instance. All produced threads are daemon threads with the
/// configured priority (normal by default).
///
/// Unless another handler is given, uncaught errors on produced threads go to
/// [`FatalExitHandler`], which logs them and terminates the process.
///
/// # Example
///
/// ```rust
/// use rust_thread_factory::prelude::*;
///
/// # fn main() -> Result<()> {
/// let factory = ExecutorThreadFactory::new("io-pool")?;
///
/// let thread = factory.new_thread(|| Ok(()));
/// assert_eq!(thread.name(), "io-pool-thread-1");
///
/// thread.start()?.join().expect("worker panicked");
/// # Ok(())
/// # }
/// ```
pub struct ExecutorThreadFactory {
    thread_number: AtomicU64,
    group: ThreadGroup,
    name_prefix: String,
    priority: ThreadPriority,
    handler: Option<SharedErrorHandler>,
    context: Option<ExecutionContext>,
}

impl std::fmt::Debug for ExecutorThreadFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutorThreadFactory")
            .field("name_prefix", &self.name_prefix)
            .field("priority", &self.priority)
            .field("thread_group", &self.group)
            .field("error_handler", &self.handler.as_ref().map(|_| "<handler>"))
            .field("execution_context", &self.context)
            .field("threads_created", &self.threads_created())
            .finish()
    }
}

impl ExecutorThreadFactory {
    /// Create a factory with the fail-fast default handler
    ///
    /// # Errors
    ///
    /// Returns [`ThreadError::InvalidConfig`] if `pool_name` is empty or
    /// contains a NUL byte.
    pub fn new(pool_name: impl Into<String>) -> Result<Self> {
        Self::from_parts(
            pool_name,
            ThreadPriority::NORM,
            Some(FatalExitHandler::shared()),
            None,
        )
    }

    /// Create a factory whose threads see `context` as their execution context.
    ///
    /// Passing `None` gives the same factory as [`ExecutorThreadFactory::new`].
    ///
    /// # Errors
    ///
    /// Returns [`ThreadError::InvalidConfig`] if `pool_name` is empty or
    /// contains a NUL byte.
    pub fn with_execution_context(
        pool_name: impl Into<String>,
        context: impl Into<Option<ExecutionContext>>,
    ) -> Result<Self> {
        Self::from_parts(
            pool_name,
            ThreadPriority::NORM,
            Some(FatalExitHandler::shared()),
            context.into(),
        )
    }

    /// Create a factory that routes uncaught errors to `handler`
    ///
    /// # Errors
    ///
    /// Returns [`ThreadError::InvalidConfig`] if `pool_name` is empty or
    /// contains a NUL byte.
    pub fn with_error_handler(
        pool_name: impl Into<String>,
        handler: SharedErrorHandler,
    ) -> Result<Self> {
        Self::from_parts(pool_name, ThreadPriority::NORM, Some(handler), None)
    }

    /// Start configuring a factory
    pub fn builder() -> ExecutorThreadFactoryBuilder {
        ExecutorThreadFactoryBuilder::new()
    }

    /// Create a factory from its individual parts.
    ///
    /// This is the only way to get a factory without an error handler; its
    /// threads let panics unwind and only log returned errors.
    pub(crate) fn from_parts(
        pool_name: impl Into<String>,
        priority: ThreadPriority,
        handler: Option<SharedErrorHandler>,
        context: Option<ExecutionContext>,
    ) -> Result<Self> {
        let pool_name = pool_name.into();
        validate_pool_name(&pool_name)?;

        Ok(Self {
            thread_number: AtomicU64::new(1),
            group: ThreadGroup::current(),
            name_prefix: format!("{}-thread-", pool_name),
            priority,
            handler,
            context,
        })
    }

    /// Produce a new, not yet started thread that will run `job`
    pub fn new_thread<J: Job>(&self, job: J) -> ProducedThread {
        self.produce(Box::new(job))
    }

    fn produce(&self, job: BoxedJob) -> ProducedThread {
        let number = self.thread_number.fetch_add(1, Ordering::Relaxed);
        let name = format!("{}{}", self.name_prefix, number);

        #[cfg(feature = "tracing")]
        crate::tracing::events::record_thread_created(&name, number);

        ProducedThread::new(
            name,
            self.priority,
            self.handler.clone(),
            self.context.clone(),
            self.group.clone(),
            job,
        )
    }

    /// Prefix of every produced thread name, `<pool-name>-thread-`
    pub fn name_prefix(&self) -> &str {
        &self.name_prefix
    }

    /// Priority given to produced threads
    pub fn priority(&self) -> ThreadPriority {
        self.priority
    }

    /// Group captured when the factory was constructed
    pub fn thread_group(&self) -> &ThreadGroup {
        &self.group
    }

    /// Execution context attached to produced threads
    pub fn execution_context(&self) -> Option<&ExecutionContext> {
        self.context.as_ref()
    }

    /// Returns true if produced threads get an error handler
    pub fn has_error_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Number of threads produced so far
    pub fn threads_created(&self) -> u64 {
        self.thread_number.load(Ordering::Relaxed) - 1
    }
}

/// Pool names end up in OS thread names, which cannot be empty here or carry NUL bytes.
pub(crate) fn validate_pool_name(pool_name: &str) -> Result<()> {
    if pool_name.is_empty() {
        return Err(ThreadError::invalid_config(
            "pool_name",
            "Pool name must not be empty",
        ));
    }
    if pool_name.contains('\0') {
        return Err(ThreadError::invalid_config(
            "pool_name",
            "Pool name must not contain NUL bytes",
        ));
    }
    Ok(())
}

impl ThreadFactory for ExecutorThreadFactory {
    fn new_thread(&self, job: BoxedJob) -> ProducedThread {
        self.produce(job)
    }
}

impl<F: ThreadFactory + ?Sized> ThreadFactory for Arc<F> {
    fn new_thread(&self, job: BoxedJob) -> ProducedThread {
        ThreadFactory::new_thread(&**self, job)
    }
}
