//! # Task records: a submission index paired with its pending unit.

use std::fmt;

use super::{completion::Notify, work::BoxTaskFuture};

/// Submission index of a task within one cycle.
///
/// Carried by every [`Completion`](crate::Completion); use it to look the outcome up
/// in a [`Report`](crate::Report).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(usize);

impl TaskId {
    /// Creates an id from a raw index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw submission index.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Immutable pairing of a [`TaskId`] and the unit of work it runs.
///
/// Owned by the queue until dequeued, then by the runner until it finishes.
/// Dropping a record unrun resolves its [`Completion`](crate::Completion) as skipped.
pub struct TaskRecord<T> {
    id: TaskId,
    work: BoxTaskFuture<T>,
    notify: Notify<T>,
}

impl<T> TaskRecord<T> {
    pub(crate) fn new(id: TaskId, work: BoxTaskFuture<T>, notify: Notify<T>) -> Self {
        Self { id, work, notify }
    }

    /// Returns the submission id.
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Splits the record so the work can be driven to completion.
    pub(crate) fn into_parts(self) -> (TaskId, BoxTaskFuture<T>, Notify<T>) {
        (self.id, self.work, self.notify)
    }
}

impl<T> fmt::Debug for TaskRecord<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskRecord").field("id", &self.id).finish_non_exhaustive()
    }
}
