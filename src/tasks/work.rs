//! # Units of work accepted by the executor.
//!
//! A submission is either an already-pending future or an invocable that produces one.
//! [`Work`] is that tagged variant; it is normalised into a [`BoxTaskFuture`] exactly once,
//! at submission time, so the queue and the scheduler only ever see one shape.
//!
//! ## Example
//! ```rust
//! use taskpool::{TaskError, Work};
//!
//! // Already pending:
//! let a: Work<u32> = Work::pending(async { Ok::<_, TaskError>(1) });
//!
//! // Invocable with arguments, materialised when submitted:
//! let b: Work<u32> = Work::with_args(|(x, y): (u32, u32)| async move { Ok(x + y) }, (2, 3));
//! # let _ = (a, b);
//! ```

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;

use crate::error::{ExecutorError, TaskError, panic_message};

/// Boxed future of one unit of work.
pub type BoxTaskFuture<T> = Pin<Box<dyn Future<Output = Result<T, TaskError>> + Send + 'static>>;

/// Factory invoked once to materialise a pending unit.
type Factory<T> = Box<dyn FnOnce() -> BoxTaskFuture<T> + Send + 'static>;

/// A work item: a pending unit or an invocable producing one.
pub enum Work<T> {
    /// Future that is ready to be polled.
    Pending(BoxTaskFuture<T>),
    /// Invocable that yields the future when called.
    Invocable(Factory<T>),
}

impl<T> Work<T> {
    /// Wraps an already-pending future.
    pub fn pending<F>(fut: F) -> Self
    where
        F: Future<Output = Result<T, TaskError>> + Send + 'static,
    {
        Work::Pending(Box::pin(fut))
    }

    /// Wraps an invocable taking no arguments.
    pub fn invocable<F, Fut>(f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, TaskError>> + Send + 'static,
    {
        Work::Invocable(Box::new(move || Box::pin(f()) as BoxTaskFuture<T>))
    }

    /// Wraps an invocable together with the arguments it is called with.
    pub fn with_args<A, F, Fut>(f: F, args: A) -> Self
    where
        A: Send + 'static,
        F: FnOnce(A) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, TaskError>> + Send + 'static,
    {
        Work::Invocable(Box::new(move || Box::pin(f(args)) as BoxTaskFuture<T>))
    }

    /// True if this item still has to be invoked.
    pub fn is_invocable(&self) -> bool {
        matches!(self, Work::Invocable(_))
    }

    /// Normalises the item into a pending unit.
    ///
    /// An invocable that panics while being invoked did not produce a unit of work;
    /// it is rejected with [`ExecutorError::InvalidTask`].
    pub(crate) fn materialize(self) -> Result<BoxTaskFuture<T>, ExecutorError> {
        match self {
            Work::Pending(fut) => Ok(fut),
            Work::Invocable(factory) => panic::catch_unwind(AssertUnwindSafe(factory)).map_err(
                |payload| ExecutorError::InvalidTask {
                    reason: format!(
                        "invocable did not produce a unit of work: {}",
                        panic_message(payload.as_ref())
                    ),
                },
            ),
        }
    }
}

impl<T> std::fmt::Debug for Work<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Work::Pending(_) => f.write_str("Work::Pending"),
            Work::Invocable(_) => f.write_str("Work::Invocable"),
        }
    }
}
