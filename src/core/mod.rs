//! Core types shared by the factory and the threads it produces

pub mod error;
pub mod job;
pub mod priority;

pub use error::{Result, ThreadError};
pub use job::{BoxedJob, Job};
pub use priority::ThreadPriority;
