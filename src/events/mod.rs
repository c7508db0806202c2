//! Executor events: types and the hook registry.
//!
//! This module groups the event **data model** and the **registry** used to
//! deliver events emitted by the executor, the scheduler and the task runner.
//!
//! ## Contents
//! - [`EventKind`], [`Event`], [`ExecutorInfo`] event classification and payload
//! - [`Hooks`] ordered, awaited delivery to [`Subscribe`](crate::Subscribe) handlers
//!
//! ## Quick reference
//! - **Publishers**: `Executor::run` (`start`/`finish`), `core::runner::Runner`
//!   (`task.start`/`task.finish`).
//! - **Consumers**: handlers registered with `Executor::on` / `Executor::on_fn`.

mod event;
mod hooks;

pub use event::{Event, EventKind, ExecutorInfo};
pub use hooks::Hooks;
