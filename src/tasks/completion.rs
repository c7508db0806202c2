//! # Completion: awaitable handle of a submitted task.
//!
//! Every submission returns a [`Completion`]. It resolves once the task has run in a
//! cycle, independently of the [`Report`](crate::Report) that cycle produces, so callers
//! can compose or await individual tasks.
//!
//! ## Rules
//! - The runner completes the handle with the same [`Outcome`] it records in the report.
//! - A task dropped without running (cancelled, reset, abandoned after an abort,
//!   aborted while pending, executor dropped) resolves to [`Outcome::Skipped`].
//! - Dropping the handle does not affect the task.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use super::{
    outcome::{Outcome, TaskResult},
    record::TaskId,
};

/// Sending half kept with the task record.
pub(crate) type Notify<T> = oneshot::Sender<Outcome<T>>;

/// Awaitable handle returned by submission.
#[derive(Debug)]
pub struct Completion<T> {
    id: TaskId,
    rx: oneshot::Receiver<Outcome<T>>,
}

impl<T> Completion<T> {
    /// Creates a linked handle/notifier pair for task `id`.
    pub(crate) fn channel(id: TaskId) -> (Self, Notify<T>) {
        let (tx, rx) = oneshot::channel();
        (Self { id, rx }, tx)
    }

    /// Submission id of the task.
    pub fn id(&self) -> TaskId {
        self.id
    }
}

impl<T> Future for Completion<T> {
    type Output = TaskResult<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        Pin::new(&mut this.rx).poll(cx).map(|res| TaskResult {
            id: this.id,
            outcome: res.unwrap_or(Outcome::Skipped),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TaskError;

    #[tokio::test]
    async fn resolves_with_sent_outcome() {
        let (done, tx) = Completion::channel(TaskId::new(2));
        assert_eq!(done.id(), TaskId::new(2));
        tx.send(Outcome::Captured(TaskError::fail("x"))).unwrap();

        let res = done.await;
        assert_eq!(res.id, TaskId::new(2));
        assert_eq!(res.outcome, Outcome::<u8>::Captured(TaskError::fail("x")));
    }

    #[tokio::test]
    async fn dropped_notifier_means_skipped() {
        let (done, tx) = Completion::<u8>::channel(TaskId::new(0));
        drop(tx);
        assert!(done.await.outcome.is_skipped());
    }
}
