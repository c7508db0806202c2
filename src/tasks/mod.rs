//! # Task records, queue, and outcomes.
//!
//! This module provides the data model of the executor:
//! - [`Work`] - submitted item (pending future or invocable), normalised on submission
//! - [`TaskId`], [`TaskRecord`] - submission index paired with its unit of work
//! - [`TaskQueue`] - FIFO of records awaiting execution
//! - [`Outcome`], [`TaskResult`], [`Report`] - what a run produces
//! - [`Completion`] - awaitable handle returned by submission, completed by the runner
//! - [`TaskHandle`] - awaitable handle of a dispatched, possibly unresolved task

mod completion;
mod handle;
mod outcome;
mod queue;
mod record;
mod work;

pub use completion::Completion;
pub(crate) use completion::Notify;
pub use handle::TaskHandle;
pub use outcome::{Outcome, Report, TaskResult};
pub use queue::TaskQueue;
pub use record::{TaskId, TaskRecord};
pub use work::{BoxTaskFuture, Work};
