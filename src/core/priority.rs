//! Scheduling priority for produced threads
//!
//! Priorities use a 1..=10 scale where 5 is the platform-normal priority.
//! [`ThreadPriority::NORM`] leaves the OS scheduling of a thread untouched;
//! any other value is applied on a best-effort basis when the thread starts.

use crate::core::error::{Result, ThreadError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scheduling priority of a produced thread (higher number = higher priority)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ThreadPriority(u8);

impl ThreadPriority {
    /// Lowest priority
    pub const MIN: ThreadPriority = ThreadPriority(1);
    /// Normal priority, the default for every factory
    pub const NORM: ThreadPriority = ThreadPriority(5);
    /// Highest priority
    pub const MAX: ThreadPriority = ThreadPriority(10);

    /// Create a priority, rejecting values outside `MIN..=MAX`
    pub fn new(value: u8) -> Result<Self> {
        if (Self::MIN.0..=Self::MAX.0).contains(&value) {
            Ok(ThreadPriority(value))
        } else {
            Err(ThreadError::invalid_config(
                "thread_priority",
                format!(
                    "priority {} is outside the range {}..={}",
                    value,
                    Self::MIN.0,
                    Self::MAX.0
                ),
            ))
        }
    }

    /// Get the numeric value of the priority
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns true for the platform-normal priority
    pub fn is_normal(&self) -> bool {
        *self == Self::NORM
    }

    /// Apply this priority to the calling OS thread.
    ///
    /// Normal priority is a no-op. The OS may refuse other values (for example
    /// raising priority without privileges); that is logged and otherwise ignored.
    pub(crate) fn apply_to_current(&self) {
        if self.is_normal() {
            return;
        }

        let os_priority = match *self {
            Self::MIN => thread_priority::ThreadPriority::Min,
            Self::MAX => thread_priority::ThreadPriority::Max,
            ThreadPriority(value) => {
                // Spread 1..=10 over the crate's 0..=99 cross-platform scale.
                match thread_priority::ThreadPriorityValue::try_from((value - 1) * 11) {
                    Ok(v) => thread_priority::ThreadPriority::Crossplatform(v),
                    Err(e) => {
                        log::debug!("Priority {} has no OS mapping: {}", value, e);
                        return;
                    }
                }
            }
        };

        if let Err(e) = thread_priority::set_current_thread_priority(os_priority) {
            log::debug!(
                "Thread '{}': priority {} not applied: {:?}",
                std::thread::current().name().unwrap_or("<unnamed>"),
                self.0,
                e
            );
        }
    }
}

impl Default for ThreadPriority {
    fn default() -> Self {
        Self::NORM
    }
}

impl TryFrom<u8> for ThreadPriority {
    type Error = ThreadError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ThreadPriority> for u8 {
    fn from(priority: ThreadPriority) -> Self {
        priority.0
    }
}

impl fmt::Display for ThreadPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
