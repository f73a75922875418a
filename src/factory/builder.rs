//! Fluent configuration of an [`ExecutorThreadFactory`]

use crate::context::ExecutionContext;
use crate::core::{Result, ThreadError, ThreadPriority};
use crate::factory::thread_factory::{validate_pool_name, ExecutorThreadFactory};
use crate::handler::{FatalExitHandler, SharedErrorHandler};

/// Builder for [`ExecutorThreadFactory`].
///
/// Nothing is validated until [`build`](Self::build). Defaults match the
/// direct constructors: normal priority, [`FatalExitHandler`], no execution
/// context.
///
/// # Example
///
/// ```rust
/// use rust_thread_factory::prelude::*;
///
/// # fn main() -> Result<()> {
/// let factory = ExecutorThreadFactory::builder()
///     .pool_name("replica-fetcher")
///     .thread_priority(ThreadPriority::MAX)
///     .execution_context(ExecutionContext::new("fetcher-resources"))
///     .build()?;
///
/// assert_eq!(factory.name_prefix(), "replica-fetcher-thread-");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ExecutorThreadFactoryBuilder {
    pool_name: Option<String>,
    priority: ThreadPriority,
    handler: SharedErrorHandler,
    context: Option<ExecutionContext>,
}

impl std::fmt::Debug for ExecutorThreadFactoryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutorThreadFactoryBuilder")
            .field("pool_name", &self.pool_name)
            .field("priority", &self.priority)
            .field("execution_context", &self.context)
            .finish_non_exhaustive()
    }
}

impl Default for ExecutorThreadFactoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutorThreadFactoryBuilder {
    /// Create a builder with default settings and no pool name
    #[must_use]
    pub fn new() -> Self {
        Self {
            pool_name: None,
            priority: ThreadPriority::NORM,
            handler: FatalExitHandler::shared(),
            context: None,
        }
    }

    /// Set the pool name used as thread name prefix
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn pool_name<S: Into<String>>(mut self, pool_name: S) -> Self {
        self.pool_name = Some(pool_name.into());
        self
    }

    /// Set the scheduling priority of produced threads
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn thread_priority(mut self, priority: ThreadPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Replace the default fail-fast handler
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn error_handler(mut self, handler: SharedErrorHandler) -> Self {
        self.handler = handler;
        self
    }

    /// Attach an execution context to produced threads
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn execution_context(mut self, context: ExecutionContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        match self.pool_name.as_deref() {
            None => Err(ThreadError::invalid_config(
                "pool_name",
                "Pool name is required",
            )),
            Some(pool_name) => validate_pool_name(pool_name),
        }
    }

    /// Validate the configuration and freeze it into a factory
    ///
    /// # Errors
    ///
    /// Returns [`ThreadError::InvalidConfig`] if no pool name was set, or it is
    /// empty or contains a NUL byte.
    pub fn build(self) -> Result<ExecutorThreadFactory> {
        self.validate()?;
        let pool_name = self.pool_name.unwrap_or_default();
        ExecutorThreadFactory::from_parts(
            pool_name,
            self.priority,
            Some(self.handler),
            self.context,
        )
    }
}
