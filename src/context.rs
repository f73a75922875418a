//! Per-thread handles attached to produced threads
//!
//! An [`ExecutionContext`] is an opaque value a factory hands to every thread it
//! produces, typically whatever the thread's code uses to resolve resources.
//! A [`ThreadGroup`] records which group a thread belongs to. Both are made
//! visible to code running on a produced thread through thread-locals.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

thread_local! {
    static CURRENT_CONTEXT: RefCell<Option<ExecutionContext>> = const { RefCell::new(None) };
    static CURRENT_GROUP: RefCell<Option<ThreadGroup>> = const { RefCell::new(None) };
}

/// Opaque handle attached to produced threads
#[derive(Clone)]
pub struct ExecutionContext {
    inner: Arc<dyn Any + Send + Sync>,
}

impl ExecutionContext {
    /// Wrap a value as an execution context
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }

    /// Wrap an already shared value without copying it
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self { inner: value }
    }

    /// Borrow the wrapped value if it has type `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Returns true if both handles point at the same value
    pub fn ptr_eq(&self, other: &ExecutionContext) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// The context attached to the calling thread, if it was produced with one
    pub fn current() -> Option<ExecutionContext> {
        CURRENT_CONTEXT.with(|current| current.borrow().clone())
    }

    pub(crate) fn install(context: Option<ExecutionContext>) {
        CURRENT_CONTEXT.with(|current| *current.borrow_mut() = context);
    }
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExecutionContext({:p})", Arc::as_ptr(&self.inner))
    }
}

struct GroupInner {
    name: String,
    active: AtomicUsize,
}

/// A named group of threads.
///
/// Factories capture the group of the thread that constructs them and every
/// thread they produce joins it. Threads that were not produced by a factory,
/// and have not entered a group explicitly, belong to the `main` group.
#[derive(Clone)]
pub struct ThreadGroup {
    inner: Arc<GroupInner>,
}

impl ThreadGroup {
    /// Create a new, empty group
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(GroupInner {
                name: name.into(),
                active: AtomicUsize::new(0),
            }),
        }
    }

    /// The process-wide group for threads that never joined another one
    pub fn main() -> Self {
        static MAIN: OnceLock<ThreadGroup> = OnceLock::new();
        MAIN.get_or_init(|| ThreadGroup::new("main")).clone()
    }

    /// The group of the calling thread
    pub fn current() -> Self {
        CURRENT_GROUP
            .with(|current| current.borrow().clone())
            .unwrap_or_else(Self::main)
    }

    /// Group name
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Number of produced threads of this group that are currently running
    pub fn active_count(&self) -> usize {
        self.inner.active.load(Ordering::Acquire)
    }

    /// Returns true if both handles refer to the same group
    pub fn ptr_eq(&self, other: &ThreadGroup) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Run `f` with this group as the calling thread's group.
    ///
    /// Factories constructed inside `f` capture this group.
    pub fn enter<R>(&self, f: impl FnOnce() -> R) -> R {
        let previous = CURRENT_GROUP.with(|current| current.replace(Some(self.clone())));
        let _restore = RestoreGroup(previous);
        f()
    }

    /// Make this group current for the rest of the calling thread's life and
    /// count the thread as active until the returned guard drops.
    pub(crate) fn join_current(&self) -> Membership {
        CURRENT_GROUP.with(|current| *current.borrow_mut() = Some(self.clone()));
        self.inner.active.fetch_add(1, Ordering::AcqRel);
        Membership(self.clone())
    }
}

impl fmt::Debug for ThreadGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadGroup")
            .field("name", &self.inner.name)
            .field("active", &self.active_count())
            .finish()
    }
}

struct RestoreGroup(Option<ThreadGroup>);

impl Drop for RestoreGroup {
    fn drop(&mut self) {
        let previous = self.0.take();
        CURRENT_GROUP.with(|current| *current.borrow_mut() = previous);
    }
}

/// Active membership of a running thread in its group
pub(crate) struct Membership(ThreadGroup);

impl Drop for Membership {
    fn drop(&mut self) {
        self.0.inner.active.fetch_sub(1, Ordering::AcqRel);
    }
}
