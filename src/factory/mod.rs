//! The thread factory, its builder and the threads it produces

pub mod builder;
pub mod produced;
pub mod thread_factory;

pub use builder::ExecutorThreadFactoryBuilder;
pub use produced::ProducedThread;
pub use thread_factory::{ExecutorThreadFactory, ThreadFactory};
