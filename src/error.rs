//! Error types used by the executor and by the tasks it runs.
//!
//! This module defines two main error enums:
//!
//! - [`ExecutorError`]: configuration and lifecycle errors raised by the executor itself,
//!   plus the abort error of a sequential cycle.
//! - [`TaskError`]: errors raised by individual units of work.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.

use thiserror::Error;

use crate::tasks::{TaskId, TaskResult};

/// # Errors produced by the executor.
///
/// Configuration/lifecycle errors are always surfaced synchronously to the caller.
/// [`ExecutorError::TaskFailed`] is only produced when a task failure is raised
/// (not captured) and the strict sequential strategy aborts the cycle; it carries
/// the results of the tasks that resolved before the failure, hence the value
/// type parameter. Errors that never carry results use the default `()`.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ExecutorError<T = ()> {
    /// Submitted work could not be turned into a pending unit of work.
    #[error("invalid task: {reason}")]
    InvalidTask {
        /// Why the work item was rejected.
        reason: String,
    },

    /// `run` was invoked with an empty queue.
    #[error("no tasks to schedule")]
    EmptySchedule,

    /// `run` was invoked while a cycle is already in progress.
    #[error("executor is already running")]
    AlreadyRunning,

    /// `reset` was invoked while a cycle is in progress.
    #[error("executor is still running")]
    StillRunning,

    /// A task failed and the cycle was aborted.
    #[error("task {task} failed: {source}")]
    TaskFailed {
        /// The task whose failure aborted the cycle.
        task: TaskId,
        /// The task's own error.
        #[source]
        source: TaskError,
        /// Results of the tasks that resolved before the failure, in run order.
        done: Vec<TaskResult<T>>,
        /// Queued tasks that never started, in queue order.
        abandoned: Vec<TaskId>,
    },
}

impl<T> ExecutorError<T> {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use taskpool::ExecutorError;
    ///
    /// assert_eq!(ExecutorError::<()>::EmptySchedule.as_label(), "executor_empty_schedule");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ExecutorError::InvalidTask { .. } => "executor_invalid_task",
            ExecutorError::EmptySchedule => "executor_empty_schedule",
            ExecutorError::AlreadyRunning => "executor_already_running",
            ExecutorError::StillRunning => "executor_still_running",
            ExecutorError::TaskFailed { .. } => "executor_task_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ExecutorError::InvalidTask { reason } => format!("invalid task: {reason}"),
            ExecutorError::EmptySchedule => "nothing queued".to_string(),
            ExecutorError::AlreadyRunning => "cycle already in progress".to_string(),
            ExecutorError::StillRunning => "cannot reset during a cycle".to_string(),
            ExecutorError::TaskFailed {
                task,
                source,
                done,
                abandoned,
            } => format!(
                "task {task} failed ({}); completed={} abandoned={}",
                source.as_message(),
                done.len(),
                abandoned.len()
            ),
        }
    }

    /// Returns the failing task's error, if this is an aborted cycle.
    pub fn task_error(&self) -> Option<&TaskError> {
        match self {
            ExecutorError::TaskFailed { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Takes the results that resolved before an aborted cycle failed.
    ///
    /// Empty for every other variant.
    pub fn into_done(self) -> Vec<TaskResult<T>> {
        match self {
            ExecutorError::TaskFailed { done, .. } => done,
            _ => Vec::new(),
        }
    }
}

/// # Errors produced by task execution.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Task execution failed.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Task panicked while being polled.
    #[error("panicked: {reason}")]
    Panicked {
        /// Panic payload rendered as text.
        reason: String,
    },

    /// Task was aborted before it could finish.
    #[error("task cancelled")]
    Canceled,
}

impl TaskError {
    /// Shorthand for [`TaskError::Fail`].
    ///
    /// # Example
    /// ```
    /// use taskpool::TaskError;
    ///
    /// let err = TaskError::fail("boom");
    /// assert_eq!(err.to_string(), "execution failed: boom");
    /// ```
    pub fn fail(error: impl std::fmt::Display) -> Self {
        TaskError::Fail {
            error: error.to_string(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fail { .. } => "task_failed",
            TaskError::Panicked { .. } => "task_panicked",
            TaskError::Canceled => "task_canceled",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            TaskError::Fail { error } => format!("error: {error}"),
            TaskError::Panicked { reason } => format!("panic: {reason}"),
            TaskError::Canceled => "aborted".to_string(),
        }
    }

    /// Converts a caught panic payload into [`TaskError::Panicked`].
    pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        TaskError::Panicked {
            reason: panic_message(payload.as_ref()),
        }
    }
}

/// Renders a panic payload the way `std` does for `&str` and `String` payloads.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::Outcome;

    #[test]
    fn labels_are_stable() {
        assert_eq!(
            ExecutorError::<()>::AlreadyRunning.as_label(),
            "executor_already_running"
        );
        assert_eq!(ExecutorError::<()>::StillRunning.as_label(), "executor_still_running");
        assert_eq!(TaskError::Canceled.as_label(), "task_canceled");
        assert_eq!(TaskError::fail("x").as_label(), "task_failed");
    }

    #[test]
    fn task_failed_exposes_source_and_partial_results() {
        let err = ExecutorError::TaskFailed {
            task: TaskId::new(1),
            source: TaskError::fail("boom"),
            done: vec![TaskResult {
                id: TaskId::new(0),
                outcome: Outcome::Value(42_u32),
            }],
            abandoned: vec![TaskId::new(2)],
        };
        assert_eq!(err.task_error(), Some(&TaskError::fail("boom")));
        assert_eq!(err.to_string(), "task #1 failed: execution failed: boom");
        assert!(err.as_message().ends_with("completed=1 abandoned=1"));
        assert!(std::error::Error::source(&err).is_some());

        let done = err.into_done();
        assert_eq!(done[0].outcome.value(), Some(&42));
        assert!(ExecutorError::<u32>::EmptySchedule.into_done().is_empty());
    }

    #[test]
    fn panic_payloads_are_rendered() {
        let s: Box<dyn std::any::Any + Send> = Box::new("static");
        assert_eq!(
            TaskError::from_panic(s),
            TaskError::Panicked {
                reason: "static".into()
            }
        );
        let owned: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(owned.as_ref()), "owned");
        let other: Box<dyn std::any::Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(other.as_ref()), "unknown panic");
    }
}
