//! Factory settings loaded from configuration files
//!
//! A [`ThreadFactoryConfig`] is the serializable part of a factory: the pool
//! name and the thread priority. Handlers and execution contexts are runtime
//! values and are added on the builder returned by
//! [`ThreadFactoryConfig::into_builder`].

use crate::core::{Result, ThreadPriority};
use crate::factory::{ExecutorThreadFactory, ExecutorThreadFactoryBuilder};
use serde::{Deserialize, Serialize};

/// Serializable factory settings.
///
/// ```rust
/// use rust_thread_factory::config::ThreadFactoryConfig;
///
/// let config = ThreadFactoryConfig::new("coordinator-event").with_priority(8)?;
/// let factory = config.build()?;
/// assert_eq!(factory.priority().value(), 8);
/// # Ok::<(), rust_thread_factory::ThreadError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThreadFactoryConfig {
    /// Pool name, used as thread name prefix
    pub pool_name: String,
    /// Scheduling priority of produced threads
    #[serde(default)]
    pub priority: ThreadPriority,
}

impl ThreadFactoryConfig {
    /// Settings for `pool_name` with normal priority
    #[must_use]
    pub fn new<S: Into<String>>(pool_name: S) -> Self {
        Self {
            pool_name: pool_name.into(),
            priority: ThreadPriority::NORM,
        }
    }

    /// Set the priority from its numeric value
    ///
    /// # Errors
    ///
    /// Returns [`crate::ThreadError::InvalidConfig`] if `priority` is outside 1..=10.
    pub fn with_priority(mut self, priority: u8) -> Result<Self> {
        self.priority = ThreadPriority::new(priority)?;
        Ok(self)
    }

    /// Builder preloaded with these settings
    pub fn into_builder(self) -> ExecutorThreadFactoryBuilder {
        ExecutorThreadFactory::builder()
            .pool_name(self.pool_name)
            .thread_priority(self.priority)
    }

    /// Build a factory with the default error handler and no execution context
    pub fn build(self) -> Result<ExecutorThreadFactory> {
        self.into_builder().build()
    }
}
