//! The unit of work a produced thread runs

use crate::core::error::Result;
use std::fmt;

/// Work handed to a produced thread.
///
/// A thread runs exactly one job, so the job is consumed. Any closure
/// returning [`Result<()>`] is a job.
pub trait Job: Send + 'static {
    /// Run the job to completion
    ///
    /// # Errors
    ///
    /// A returned error is treated as an uncaught failure of the thread and
    /// routed to the factory's error handler.
    fn run(self: Box<Self>) -> Result<()>;

    /// Name used when the job shows up in logs and error reports
    fn job_type(&self) -> &str {
        "Job"
    }
}

impl<F> Job for F
where
    F: FnOnce() -> Result<()> + Send + 'static,
{
    fn run(self: Box<Self>) -> Result<()> {
        (*self)()
    }

    fn job_type(&self) -> &str {
        "Closure"
    }
}

impl fmt::Debug for dyn Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Job({})", self.job_type())
    }
}

/// A boxed job that can be sent across threads
pub type BoxedJob = Box<dyn Job>;
