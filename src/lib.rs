//! # taskpool
//!
//! **Taskpool** is a bounded-concurrency executor for batches of async tasks.
//!
//! Callers queue units of work, then run them as one cycle under a concurrency
//! limit. The cycle resolves into two disjoint outcome sets: `done` and `pending`.
//! The executor is reusable; every cycle ends with an implicit reset.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   Work<T>    │   │   Work<T>    │   │   Work<T>    │
//!     │  (future)    │   │ (invocable)  │   │ (fn + args)  │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼ submit / add / extend (normalised to one TaskRecord shape)
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Executor<T> (facade)                                             │
//! │  - Lifecycle (Idle ⇄ Running, per-cycle CancellationToken)        │
//! │  - TaskQueue (FIFO of TaskRecord, indices 0..n per cycle)         │
//! │  - Throttle  (semaphore, limit 0 = unbounded)                     │
//! │  - Hooks     (start / finish / task.start / task.finish)          │
//! └──────┬────────────────────────────────────────────────────┬───────┘
//!        │ limit == 1                                         │ limit != 1
//!        ▼                                                    ▼
//! ┌──────────────────────────┐            ┌────────────────────────────────────┐
//! │ run_sequential           │            │ run_concurrent                     │
//! │ pop → Runner → next      │            │ drain → spawn(acquire→Runner→free) │
//! │ abort on raised failure  │            │ wait until ReturnWhen / timeout    │
//! └────────────┬─────────────┘            └──────────────────┬─────────────────┘
//!              └──────────────► Report { done, pending } ◄───┘
//! ```
//!
//! ### Lifecycle
//! ```text
//! run(opts)
//!   ├─► Idle → Running                  (AlreadyRunning / EmptySchedule)
//!   ├─► trigger start
//!   ├─► strategy
//!   │     └─ per task: task.start ─► poll ─► FailurePolicy ─► task.finish
//!   ├─► trigger finish                 (still Running)
//!   └─► Running → Idle + reset: queue, hooks, throttle
//! ```
//!
//! ## Features
//! | Area              | Description                                                    | Key types / traits                        |
//! |-------------------|----------------------------------------------------------------|-------------------------------------------|
//! | **Execution**     | Queue work and run it under a concurrency limit.               | [`Executor`], [`ExecutorBuilder`]         |
//! | **Admission**     | Semaphore-backed slot gate.                                    | [`Throttle`], [`Slot`]                    |
//! | **Policies**      | Raise or capture failures, choose when the wait resolves.      | [`FailurePolicy`], [`ReturnWhen`]         |
//! | **Results**       | Outcome sets, submission and unresolved-task handles.          | [`Report`], [`Completion`], [`TaskHandle`]|
//! | **Subscriber API**| Hook into cycle and task events.                               | [`Subscribe`], [`Event`], [`EventKind`]   |
//! | **Errors**        | Typed errors for the executor and the tasks it runs.           | [`ExecutorError`], [`TaskError`]          |
//! | **Configuration** | Executor defaults and per-run overrides.                       | [`Config`], [`RunOptions`]                |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use taskpool::{Executor, EventKind, RunOptions, TaskError, Work};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let exec: Executor<u64> = Executor::new(3);
//!
//!     exec.on_fn(EventKind::TaskFinish, |ev| {
//!         println!("{} -> {:?}", ev.task.map(|t| t.index()).unwrap_or_default(), ev.outcome);
//!     });
//!
//!     exec.extend((0..10u64).map(|i| {
//!         Work::with_args(
//!             |i| async move {
//!                 tokio::time::sleep(Duration::from_millis(5)).await;
//!                 Ok::<_, TaskError>(i * i)
//!             },
//!             i,
//!         )
//!     }))?;
//!
//!     let report = exec.run(RunOptions::new().return_exceptions(true)).await?;
//!     assert!(report.is_complete());
//!     assert_eq!(report.values().sum::<u64>(), 285);
//!     Ok(())
//! }
//! ```
mod config;
mod core;
mod error;
mod events;
mod policies;
mod subscribers;
mod tasks;

// ---- Public re-exports ----

pub use config::{Config, DEFAULT_LIMIT, RunOptions};
pub use crate::core::{Executor, ExecutorBuilder, Slot, State, Throttle};
pub use error::{ExecutorError, TaskError};
pub use events::{Event, EventKind, ExecutorInfo, Hooks};
pub use policies::{FailurePolicy, ReturnWhen};
pub use subscribers::Subscribe;
pub use tasks::{
    BoxTaskFuture, Completion, Outcome, Report, TaskHandle, TaskId, TaskQueue, TaskRecord, TaskResult,
    Work,
};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
