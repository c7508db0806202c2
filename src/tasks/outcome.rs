//! # Task outcomes and the per-run report.
//!
//! Every dispatched task resolves to exactly one [`Outcome`]. A run returns a
//! [`Report`] with two disjoint parts:
//! - `done`: resolved tasks, in completion order;
//! - `pending`: handles of tasks still unresolved when the wait ended
//!   (timeout or an early `ReturnWhen` condition).

use super::{handle::TaskHandle, record::TaskId};
use crate::error::TaskError;

/// Result of running one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The task produced a value.
    Value(T),
    /// The task failed and the failure was captured as a value.
    Captured(TaskError),
    /// The task failed and the failure was raised.
    Raised(TaskError),
    /// The task never ran: the cycle was cancelled before it started.
    Skipped,
}

impl<T> Outcome<T> {
    /// Returns the value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Consumes the outcome, returning the value if any.
    pub fn into_value(self) -> Option<T> {
        match self {
            Outcome::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the task error, captured or raised.
    pub fn error(&self) -> Option<&TaskError> {
        match self {
            Outcome::Captured(e) | Outcome::Raised(e) => Some(e),
            _ => None,
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            Outcome::Value(_) => "value",
            Outcome::Captured(_) => "captured",
            Outcome::Raised(_) => "raised",
            Outcome::Skipped => "skipped",
        }
    }

    /// True if the failure was raised rather than captured.
    pub fn is_raised(&self) -> bool {
        matches!(self, Outcome::Raised(_))
    }

    /// True if the task was skipped.
    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped)
    }

    /// Converts into a `Result`, treating skips as [`TaskError::Canceled`].
    pub fn into_result(self) -> Result<T, TaskError> {
        match self {
            Outcome::Value(v) => Ok(v),
            Outcome::Captured(e) | Outcome::Raised(e) => Err(e),
            Outcome::Skipped => Err(TaskError::Canceled),
        }
    }
}

/// Outcome of one task tagged with its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskResult<T> {
    /// Submission id.
    pub id: TaskId,
    /// What the task resolved to.
    pub outcome: Outcome<T>,
}

/// Outcome sets of one run.
#[derive(Debug)]
pub struct Report<T> {
    /// Resolved tasks, in completion order.
    pub done: Vec<TaskResult<T>>,
    /// Tasks that had not resolved when the wait ended. They keep running.
    pub pending: Vec<TaskHandle<T>>,
}

impl<T> Report<T> {
    pub(crate) fn new(done: Vec<TaskResult<T>>, pending: Vec<TaskHandle<T>>) -> Self {
        Self { done, pending }
    }

    /// True if every dispatched task resolved.
    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }

    /// Looks up the outcome of a resolved task.
    pub fn outcome(&self, id: TaskId) -> Option<&Outcome<T>> {
        self.done.iter().find(|r| r.id == id).map(|r| &r.outcome)
    }

    /// Iterates over produced values, in completion order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.done.iter().filter_map(|r| r.outcome.value())
    }

    /// Iterates over failed tasks and their errors.
    pub fn errors(&self) -> impl Iterator<Item = (TaskId, &TaskError)> {
        self.done
            .iter()
            .filter_map(|r| r.outcome.error().map(|e| (r.id, e)))
    }

    /// Returns the resolved tasks sorted by submission index.
    ///
    /// This is a view over `done`; unresolved tasks stay in `pending`.
    pub fn into_ordered(self) -> Vec<TaskResult<T>> {
        let mut done = self.done;
        done.sort_by_key(|r| r.id);
        done
    }
}
