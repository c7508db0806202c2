//! # Executor: the public facade.
//!
//! The [`Executor`] owns configuration, lifecycle state, the task queue, the throttle
//! and the hook registry. It exposes submission, execution, cancellation and reset.
//!
//! ## Cycle
//! ```text
//! run(opts)
//!   ├─► lifecycle.begin()            Idle → Running (AlreadyRunning / EmptySchedule)
//!   ├─► trigger start(ExecutorInfo)
//!   ├─► limit == 1 ? run_sequential : run_concurrent
//!   ├─► trigger finish(ExecutorInfo) still Running (skipped if superseded)
//!   └─► lifecycle.finish()           Running → Idle + implicit reset (queue, hooks, throttle)
//! ```
//!
//! ## Rules
//! - Submission is allowed in any state; work queued during a cycle is not
//!   guaranteed to run in that cycle.
//! - Every submission returns a [`Completion`] that resolves with the task's outcome,
//!   or with `Skipped` if the task is dropped without running.
//! - `cancel()` never interrupts a running task. It discards queued work, forces
//!   `Idle` and wakes tasks still waiting for a slot so they are skipped.
//! - Lock order is lifecycle → queue.
//!
//! ## Example
//! ```rust
//! use taskpool::{Executor, RunOptions, TaskError};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let exec: Executor<u32> = Executor::new(2);
//!     for i in 0..4 {
//!         exec.add(async move { Ok::<_, TaskError>(i * 10) });
//!     }
//!
//!     let report = exec.run(RunOptions::new()).await?;
//!     let values: Vec<u32> = report
//!         .into_ordered()
//!         .into_iter()
//!         .filter_map(|r| r.outcome.into_value())
//!         .collect();
//!     assert_eq!(values, vec![0, 10, 20, 30]);
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crate::{
    config::{Config, RunOptions},
    core::{
        builder::ExecutorBuilder,
        lifecycle::{Lifecycle, State},
        lock,
        runner::Runner,
        scheduler,
        throttle::Throttle,
    },
    error::{ExecutorError, TaskError},
    events::{Event, EventKind, ExecutorInfo, Hooks},
    subscribers::{HookFn, Subscribe},
    tasks::{Completion, Report, TaskQueue, Work},
};

/// Bounded-concurrency executor for batches of async tasks producing `T`.
///
/// Share it behind an [`Arc`] to cancel or inspect it while a cycle is running.
///
/// Values are cloned once per task: one copy for the cycle's [`Report`], one for the
/// task's [`Completion`]. Wrap large values in an [`Arc`].
pub struct Executor<T> {
    cfg: Config,
    lifecycle: Lifecycle,
    queue: Mutex<TaskQueue<T>>,
    throttle: Mutex<Throttle>,
    hooks: Arc<Hooks<T>>,
}

impl<T: Clone + Send + Sync + 'static> Executor<T> {
    /// Creates an executor with the given limit and default settings otherwise.
    ///
    /// Negative limits are treated as `0` (unbounded).
    pub fn new(limit: isize) -> Self {
        Self::with_config(Config::with_limit(limit))
    }

    /// Creates an executor from a full configuration.
    pub fn with_config(cfg: Config) -> Self {
        let throttle = Throttle::new(cfg.limit);
        Self {
            cfg,
            lifecycle: Lifecycle::new(),
            queue: Mutex::new(TaskQueue::new()),
            throttle: Mutex::new(throttle),
            hooks: Arc::new(Hooks::new()),
        }
    }

    /// Returns a builder for an executor with initial tasks and subscribers.
    pub fn builder(cfg: Config) -> ExecutorBuilder<T> {
        ExecutorBuilder::new(cfg)
    }

    /// Executor configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Configured concurrency limit (`0` = unbounded).
    pub fn limit(&self) -> usize {
        self.cfg.limit
    }

    /// Number of queued, not yet dispatched tasks.
    pub fn len(&self) -> usize {
        lock(&self.queue).len()
    }

    /// True if nothing is queued.
    pub fn is_empty(&self) -> bool {
        lock(&self.queue).is_empty()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> State {
        self.lifecycle.state()
    }

    /// True while a cycle is in progress.
    pub fn is_running(&self) -> bool {
        self.state() == State::Running
    }

    /// Point-in-time snapshot carried by `start`/`finish` events.
    pub fn info(&self) -> ExecutorInfo {
        ExecutorInfo {
            limit: self.cfg.limit,
            queued: self.len(),
            running: self.is_running(),
        }
    }

    /// Queues one work item and returns the handle its outcome is delivered to.
    ///
    /// Invocables are called right away to obtain their pending unit; one that
    /// panics instead is rejected with [`ExecutorError::InvalidTask`] and nothing
    /// is queued.
    pub fn submit(&self, work: Work<T>) -> Result<Completion<T>, ExecutorError> {
        let fut = work.materialize()?;
        Ok(lock(&self.queue).push(fut))
    }

    /// Queues an already-pending future.
    pub fn add<F>(&self, fut: F) -> Completion<T>
    where
        F: Future<Output = Result<T, TaskError>> + Send + 'static,
    {
        lock(&self.queue).push(Box::pin(fut))
    }

    /// Queues the future produced by `f(args)`.
    pub fn add_fn<A, F, Fut>(&self, f: F, args: A) -> Result<Completion<T>, ExecutorError>
    where
        A: Send + 'static,
        F: FnOnce(A) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, TaskError>> + Send + 'static,
    {
        self.submit(Work::with_args(f, args))
    }

    /// Queues every item in order.
    ///
    /// Items are validated one by one; an invalid item stops the batch and the
    /// items before it stay queued.
    pub fn extend<I>(&self, items: I) -> Result<Vec<Completion<T>>, ExecutorError>
    where
        I: IntoIterator<Item = Work<T>>,
    {
        items.into_iter().map(|work| self.submit(work)).collect()
    }

    /// Registers a subscriber for one event kind.
    pub fn on(&self, kind: EventKind, sub: Arc<dyn Subscribe<T>>) {
        self.hooks.on(kind, sub);
    }

    /// Registers a synchronous closure for one event kind.
    pub fn on_fn<F>(&self, kind: EventKind, f: F)
    where
        F: Fn(&Event<'_, T>) + Send + Sync + 'static,
    {
        self.hooks.on(kind, Arc::new(HookFn::<T, F>::new(f)));
    }

    /// Removes every subscriber of `kind`; returns how many were removed.
    pub fn off(&self, kind: EventKind) -> usize {
        self.hooks.off(kind)
    }

    /// Runs every queued task and returns the outcome sets.
    ///
    /// # Errors
    /// - [`ExecutorError::AlreadyRunning`] if a cycle is in progress;
    /// - [`ExecutorError::EmptySchedule`] if nothing is queued;
    /// - [`ExecutorError::TaskFailed`] if the sequential strategy aborted on a
    ///   raised failure. It carries the results that resolved before the failure.
    ///   The cycle is still finalised and the executor reusable.
    pub async fn run(&self, opts: RunOptions) -> Result<Report<T>, ExecutorError<T>> {
        let cycle = self.lifecycle.begin(|| self.len())?;
        let resolved = opts.resolve(&self.cfg);
        let runner = Runner::new(Arc::clone(&self.hooks), &cycle, resolved.failure);

        debug!(
            cycle = cycle.id(),
            limit = self.cfg.limit,
            queued = self.len(),
            failure = ?resolved.failure,
            return_when = ?resolved.return_when,
            "cycle started"
        );
        self.hooks
            .trigger(Event::new(EventKind::Start, cycle.id()).with_executor(self.info()))
            .await;

        let res = if self.cfg.is_sequential() {
            scheduler::run_sequential(&self.queue, &runner).await
        } else {
            let records = lock(&self.queue).drain();
            let throttle = lock(&self.throttle).clone();
            Ok(scheduler::run_concurrent(
                records,
                throttle,
                runner,
                resolved.timeout,
                resolved.return_when,
            )
            .await)
        };

        // finish handlers still observe the cycle as running
        if self.lifecycle.is_current(&cycle) {
            match &res {
                Ok(report) => debug!(
                    cycle = cycle.id(),
                    done = report.done.len(),
                    pending = report.pending.len(),
                    "cycle finished"
                ),
                Err(err) => debug!(cycle = cycle.id(), error = %err, "cycle aborted"),
            }
            self.hooks
                .trigger(Event::new(EventKind::Finish, cycle.id()).with_executor(self.info()))
                .await;
        }
        if !self.lifecycle.finish(&cycle, || self.clear()) {
            debug!(cycle = cycle.id(), "cycle superseded, skipping reset");
        }
        res
    }

    /// Discards queued work and forces `Idle`. Returns `true` if a cycle was running.
    ///
    /// Tasks already executing are not interrupted.
    pub fn cancel(&self) -> bool {
        let cancelled = self.lifecycle.cancel();
        let dropped = {
            let mut queue = lock(&self.queue);
            let n = queue.len();
            queue.clear();
            n
        };
        match cancelled {
            Some(cycle) => info!(cycle, dropped, "cycle cancelled"),
            None => debug!(dropped, "cancel while idle"),
        }
        cancelled.is_some()
    }

    /// Clears the queue and the hooks and recreates the throttle.
    ///
    /// # Errors
    /// [`ExecutorError::StillRunning`] if a cycle is in progress.
    pub fn reset(&self) -> Result<(), ExecutorError> {
        self.lifecycle.when_idle(|| self.clear())
    }

    fn clear(&self) {
        lock(&self.queue).clear();
        self.hooks.clear();
        *lock(&self.throttle) = Throttle::new(self.cfg.limit);
    }
}

impl<T: Clone + Send + Sync + 'static> Default for Executor<T> {
    /// Executor with [`Config::default`] (limit 10).
    fn default() -> Self {
        Self::with_config(Config::default())
    }
}
