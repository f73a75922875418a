//! Convenient re-exports for common types and traits

pub use crate::context::{ExecutionContext, ThreadGroup};
pub use crate::core::{BoxedJob, Job, Result, ThreadError, ThreadPriority};
pub use crate::factory::{
    ExecutorThreadFactory, ExecutorThreadFactoryBuilder, ProducedThread, ThreadFactory,
};
pub use crate::handler::{
    FatalExitHandler, SharedErrorHandler, UncaughtError, UncaughtErrorHandler,
};
