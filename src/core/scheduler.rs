//! # Scheduler: the two execution strategies.
//!
//! The strategy is chosen once per cycle from the configured limit:
//!
//! ```text
//! limit == 1  → run_sequential
//!   loop {
//!     ├─► pop next record (stop if queue empty or cycle cancelled)
//!     ├─► runner.run(record).await          (fully resolved before the next pop)
//!     └─► Raised failure → abort: Err(TaskFailed { done, abandoned }),
//!         rest of the queue never starts
//!   }
//!
//! limit != 1  → run_concurrent (0 = unbounded)
//!   ├─► drain the whole queue up front
//!   ├─► spawn per record: acquire slot → runner.run(record) → release slot
//!   └─► wait as a set until ReturnWhen is satisfied or the timeout fires;
//!       unresolved handles are returned as `pending` (not cancelled)
//! ```

use std::sync::Mutex;
use std::time::Duration;

use futures::{StreamExt, stream::FuturesUnordered};
use tokio::time::{self, Instant};
use tracing::debug;

use crate::{
    core::{lock, runner::Runner, throttle::Throttle},
    error::ExecutorError,
    policies::ReturnWhen,
    tasks::{Outcome, Report, TaskHandle, TaskQueue, TaskRecord, TaskResult},
};

/// Strict sequential strategy: one task at a time, FIFO, abort on raised failure.
pub(crate) async fn run_sequential<T: Clone + Send + Sync + 'static>(
    queue: &Mutex<TaskQueue<T>>,
    runner: &Runner<T>,
) -> Result<Report<T>, ExecutorError<T>> {
    let mut done = Vec::new();

    while !runner.is_cancelled() {
        let Some(record) = pop(queue) else {
            break;
        };
        let id = record.id();

        match runner.run(record).await {
            Outcome::Raised(source) => {
                let abandoned = lock(queue).ids();
                debug!(
                    task = %id,
                    completed = done.len(),
                    abandoned = abandoned.len(),
                    "sequential cycle aborted"
                );
                return Err(ExecutorError::TaskFailed {
                    task: id,
                    source,
                    done,
                    abandoned,
                });
            }
            outcome => done.push(TaskResult { id, outcome }),
        }
    }
    Ok(Report::new(done, Vec::new()))
}

fn pop<T>(queue: &Mutex<TaskQueue<T>>) -> Option<TaskRecord<T>> {
    lock(queue).pop_front()
}

/// Throttled concurrent strategy: dispatch everything, admit through `throttle`.
pub(crate) async fn run_concurrent<T: Clone + Send + Sync + 'static>(
    records: Vec<TaskRecord<T>>,
    throttle: Throttle,
    runner: Runner<T>,
    timeout: Option<Duration>,
    return_when: ReturnWhen,
) -> Report<T> {
    let mut inflight: FuturesUnordered<TaskHandle<T>> = records
        .into_iter()
        .map(|record| dispatch(record, &throttle, &runner))
        .collect();

    let deadline = timeout.map(|d| Instant::now() + d);
    let mut done = Vec::with_capacity(inflight.len());

    loop {
        let next = match deadline {
            Some(at) => match time::timeout_at(at, inflight.next()).await {
                Ok(next) => next,
                Err(_elapsed) => {
                    debug!(pending = inflight.len(), "cycle wait timed out");
                    break;
                }
            },
            None => inflight.next().await,
        };
        let Some(result) = next else {
            break;
        };

        let satisfied = return_when.is_satisfied_by(&result.outcome);
        done.push(result);
        if satisfied {
            break;
        }
    }

    Report::new(done, inflight.into_iter().collect())
}

/// Spawns one admission-gated run of `record`.
fn dispatch<T: Clone + Send + Sync + 'static>(
    record: TaskRecord<T>,
    throttle: &Throttle,
    runner: &Runner<T>,
) -> TaskHandle<T> {
    let id = record.id();
    let throttle = throttle.clone();
    let runner = runner.clone();

    let join = tokio::spawn(async move {
        let Some(slot) = throttle.acquire_until(runner.token()).await else {
            return Outcome::Skipped;
        };
        let outcome = runner.run(record).await;
        slot.release();
        outcome
    });
    TaskHandle::new(id, join)
}
