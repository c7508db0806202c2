//! # Handle to a dispatched task.
//!
//! [`TaskHandle`] wraps the tokio task that drives one admission-gated run.
//! It is a future resolving to the task's [`TaskResult`]; dropping it detaches the
//! task (it keeps running), [`TaskHandle::abort`] stops it.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::task::JoinHandle;

use super::{
    outcome::{Outcome, TaskResult},
    record::TaskId,
};
use crate::error::TaskError;

/// Awaitable handle of one dispatched task.
#[derive(Debug)]
pub struct TaskHandle<T> {
    id: TaskId,
    join: JoinHandle<Outcome<T>>,
}

impl<T> TaskHandle<T> {
    pub(crate) fn new(id: TaskId, join: JoinHandle<Outcome<T>>) -> Self {
        Self { id, join }
    }

    /// Submission id of the task.
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// True if the task has resolved.
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Aborts the task. Awaiting the handle afterwards yields [`TaskError::Canceled`].
    pub fn abort(&self) {
        self.join.abort();
    }
}

impl<T> Future for TaskHandle<T> {
    type Output = TaskResult<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        Pin::new(&mut this.join).poll(cx).map(|res| {
            let outcome = match res {
                Ok(outcome) => outcome,
                Err(e) if e.is_panic() => Outcome::Raised(TaskError::from_panic(e.into_panic())),
                Err(_) => Outcome::Raised(TaskError::Canceled),
            };
            TaskResult {
                id: this.id,
                outcome,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn resolves_to_tagged_outcome() {
        let handle = TaskHandle::new(TaskId::new(4), tokio::spawn(async { Outcome::Value(8_u32) }));
        assert_eq!(handle.id(), TaskId::new(4));
        let res = handle.await;
        assert_eq!(res.id, TaskId::new(4));
        assert_eq!(res.outcome, Outcome::Value(8));
    }

    #[tokio::test]
    async fn aborted_task_is_canceled() {
        let handle = TaskHandle::new(
            TaskId::new(0),
            tokio::spawn(async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Outcome::Value(())
            }),
        );
        handle.abort();
        assert_eq!(handle.await.outcome, Outcome::Raised(TaskError::Canceled));
    }
}
