//! # Run a single task and notify around it.
//!
//! ## Flow
//! ```text
//! cycle cancelled? ── yes ──► Outcome::Skipped (no events)
//!        │ no
//!        ▼
//! trigger task.start ─► poll work to completion ─► FailurePolicy::outcome()
//!                                 │                         │
//!                         (panic → TaskError::Panicked)     ▼
//!                                                  trigger task.finish(outcome)
//!                                                           │
//!                                                           ▼
//!                                                  complete the submission handle
//! ```
//!
//! ## Rules
//! - `task.finish` is emitted for every task that emitted `task.start`, whatever the outcome.
//! - The submission handle resolves after `task.finish` handlers have returned.
//! - The runner holds no cross-task state; it is cloned into every dispatched task.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio_util::sync::CancellationToken;

use crate::{
    core::lifecycle::Cycle,
    error::TaskError,
    events::{Event, EventKind, Hooks},
    policies::FailurePolicy,
    tasks::{Outcome, TaskRecord},
};

/// Executes task records for one cycle.
pub(crate) struct Runner<T> {
    hooks: Arc<Hooks<T>>,
    cycle: u64,
    token: CancellationToken,
    failure: FailurePolicy,
}

impl<T> Clone for Runner<T> {
    fn clone(&self) -> Self {
        Self {
            hooks: Arc::clone(&self.hooks),
            cycle: self.cycle,
            token: self.token.clone(),
            failure: self.failure,
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Runner<T> {
    pub(crate) fn new(hooks: Arc<Hooks<T>>, cycle: &Cycle, failure: FailurePolicy) -> Self {
        Self {
            hooks,
            cycle: cycle.id(),
            token: cycle.token().clone(),
            failure,
        }
    }

    /// Cancellation token of the cycle this runner belongs to.
    pub(crate) fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// True once the cycle was cancelled.
    pub(crate) fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Runs `record` to completion and returns its outcome.
    pub(crate) async fn run(&self, record: TaskRecord<T>) -> Outcome<T> {
        if self.is_cancelled() {
            return Outcome::Skipped;
        }
        let (id, work, notify) = record.into_parts();

        self.hooks
            .trigger(Event::new(EventKind::TaskStart, self.cycle).with_task(id))
            .await;

        let res = match AssertUnwindSafe(work).catch_unwind().await {
            Ok(res) => res,
            Err(panic_err) => Err(TaskError::from_panic(panic_err)),
        };
        let outcome = self.failure.outcome(res);

        self.hooks
            .trigger(
                Event::new(EventKind::TaskFinish, self.cycle)
                    .with_task(id)
                    .with_outcome(&outcome),
            )
            .await;

        if !notify.is_closed() {
            let _ = notify.send(outcome.clone());
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::core::lifecycle::Lifecycle;
    use crate::tasks::{TaskId, TaskQueue};

    fn recording_hooks(seen: &Arc<Mutex<Vec<String>>>) -> Arc<Hooks<u32>> {
        let hooks = Arc::new(Hooks::new());
        for kind in [EventKind::TaskStart, EventKind::TaskFinish] {
            let seen = Arc::clone(seen);
            hooks.on(
                kind,
                Arc::new(crate::subscribers::HookFn::new(move |ev: &Event<'_, u32>| {
                    let label = ev.outcome.map_or("-", |o| o.as_label());
                    seen.lock()
                        .unwrap()
                        .push(format!("{}:{}:{}", ev.kind, ev.task.unwrap(), label));
                })),
            );
        }
        hooks
    }

    fn record(queue: &mut TaskQueue<u32>, res: Result<u32, TaskError>) -> TaskRecord<u32> {
        queue.push(Box::pin(async move { res }));
        queue.pop_front().unwrap()
    }

    #[tokio::test]
    async fn emits_start_and_finish_around_work() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let lc = Lifecycle::new();
        let cycle = lc.begin::<()>(|| 1).unwrap();
        let runner = Runner::new(recording_hooks(&seen), &cycle, FailurePolicy::Raise);

        let mut q = TaskQueue::new();
        let outcome = runner.run(record(&mut q, Ok(9))).await;
        assert_eq!(outcome, Outcome::Value(9));
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["task.start:#0:-", "task.finish:#0:value"]
        );
    }

    #[tokio::test]
    async fn failure_policy_shapes_outcome() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let lc = Lifecycle::new();
        let cycle = lc.begin::<()>(|| 1).unwrap();
        let mut q = TaskQueue::new();

        let capture = Runner::new(recording_hooks(&seen), &cycle, FailurePolicy::Capture);
        let captured = capture.run(record(&mut q, Err(TaskError::fail("x")))).await;
        assert_eq!(captured, Outcome::Captured(TaskError::fail("x")));

        let raise = Runner::new(recording_hooks(&seen), &cycle, FailurePolicy::Raise);
        let raised = raise.run(record(&mut q, Err(TaskError::fail("y")))).await;
        assert_eq!(raised, Outcome::Raised(TaskError::fail("y")));

        // finish is emitted even for raised failures
        assert!(seen.lock().unwrap().contains(&"task.finish:#1:raised".to_string()));
    }

    #[tokio::test]
    async fn panics_become_task_errors() {
        let lc = Lifecycle::new();
        let cycle = lc.begin::<()>(|| 1).unwrap();
        let runner: Runner<u32> = Runner::new(Arc::new(Hooks::new()), &cycle, FailurePolicy::Capture);

        async fn explode() -> Result<u32, TaskError> {
            panic!("kaboom")
        }

        let mut q = TaskQueue::new();
        q.push(Box::pin(explode()));
        let outcome = runner.run(q.pop_front().unwrap()).await;
        assert_eq!(
            outcome,
            Outcome::Captured(TaskError::Panicked {
                reason: "kaboom".into()
            })
        );
    }

    #[tokio::test]
    async fn cancelled_cycle_skips_without_events() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let lc = Lifecycle::new();
        let cycle = lc.begin::<()>(|| 1).unwrap();
        let runner = Runner::new(recording_hooks(&seen), &cycle, FailurePolicy::Raise);
        lc.cancel();

        let mut q = TaskQueue::new();
        let rec = record(&mut q, Ok(1));
        assert_eq!(rec.id(), TaskId::new(0));
        assert!(runner.run(rec).await.is_skipped());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn completion_resolves_after_task_finish() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let lc = Lifecycle::new();
        let cycle = lc.begin::<()>(|| 1).unwrap();
        let runner = Runner::new(recording_hooks(&seen), &cycle, FailurePolicy::Capture);

        let mut q = TaskQueue::new();
        let done = q.push(Box::pin(async { Err::<u32, _>(TaskError::fail("late")) }));
        runner.run(q.pop_front().unwrap()).await;

        let res = done.await;
        assert_eq!(res.id, TaskId::new(0));
        assert_eq!(res.outcome, Outcome::Captured(TaskError::fail("late")));
        assert_eq!(seen.lock().unwrap().len(), 2);
    }
}
