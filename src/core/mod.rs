//! Runtime core: lifecycle, admission, scheduling.
//!
//! The only public entry points from this module are [`Executor`] and
//! [`ExecutorBuilder`], plus the [`Throttle`] primitive and [`State`].
//!
//! Internal modules:
//! - [`lifecycle`]: `Idle`/`Running` state machine with per-cycle cancellation tokens;
//! - [`throttle`]: semaphore-backed admission control;
//! - [`runner`]: runs one task, applies the failure policy, emits task events;
//! - [`scheduler`]: sequential and throttled concurrent strategies;
//! - [`executor`]: the facade tying the above together.

mod builder;
mod executor;
mod lifecycle;
mod runner;
mod scheduler;
mod throttle;

use std::sync::{Mutex, MutexGuard, PoisonError};

pub use builder::ExecutorBuilder;
pub use executor::Executor;
pub use lifecycle::State;
pub use throttle::{Slot, Throttle};

/// Locks `m`, recovering the guard if a previous holder panicked.
pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}
