//! # Executor lifecycle: the `Idle` ⇄ `Running` state machine.
//!
//! ```text
//!            begin()                     finish(cycle, reset)
//!   Idle ───────────────► Running ─────────────────────────► Idle
//!    ▲                       │
//!    └──────── cancel() ─────┘   (token cancelled, state forced to Idle)
//! ```
//!
//! ## Rules
//! - At most one cycle is active; `begin()` while running fails with `AlreadyRunning`.
//! - Each cycle gets a fresh id and [`CancellationToken`]; `cancel()` cancels it.
//! - A cycle still *owns* the executor until a newer cycle begins. Only the owner may
//!   emit `finish` and perform the implicit reset.
//! - `finish` releases ownership and resets under one lock, so no `begin()` can slip
//!   in between the state change and the reset.

use std::sync::{Mutex, PoisonError};

use tokio_util::sync::CancellationToken;

use crate::error::ExecutorError;

/// Lifecycle state of an executor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// No cycle in progress.
    Idle,
    /// A cycle is in progress.
    Running,
}

/// One execution cycle: id plus its cancellation token.
#[derive(Clone, Debug)]
pub(crate) struct Cycle {
    id: u64,
    token: CancellationToken,
}

impl Cycle {
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn token(&self) -> &CancellationToken {
        &self.token
    }
}

struct Inner {
    state: State,
    cycle: u64,
    token: CancellationToken,
}

/// Single-writer state machine guarding `run`/`reset`/`cancel`.
pub(crate) struct Lifecycle {
    inner: Mutex<Inner>,
}

impl Lifecycle {
    pub(crate) fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: State::Idle,
                cycle: 0,
                token: CancellationToken::new(),
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn state(&self) -> State {
        self.lock().state
    }

    /// Starts a cycle if idle and `queued()` reports work.
    pub(crate) fn begin<T>(&self, queued: impl FnOnce() -> usize) -> Result<Cycle, ExecutorError<T>> {
        let mut inner = self.lock();
        if inner.state == State::Running {
            return Err(ExecutorError::AlreadyRunning);
        }
        if queued() == 0 {
            return Err(ExecutorError::EmptySchedule);
        }

        inner.cycle += 1;
        inner.token = CancellationToken::new();
        inner.state = State::Running;
        Ok(Cycle {
            id: inner.cycle,
            token: inner.token.clone(),
        })
    }

    /// True while no newer cycle has taken over from `cycle`.
    pub(crate) fn is_current(&self, cycle: &Cycle) -> bool {
        self.lock().cycle == cycle.id
    }

    /// Ends `cycle`: sets `Idle` and runs `reset` under the state lock.
    ///
    /// Returns `false`, running nothing, if a newer cycle has taken over.
    pub(crate) fn finish(&self, cycle: &Cycle, reset: impl FnOnce()) -> bool {
        let mut inner = self.lock();
        if inner.cycle != cycle.id {
            return false;
        }
        inner.state = State::Idle;
        reset();
        true
    }

    /// Forces `Idle` and cancels the current cycle's token.
    ///
    /// Returns the id of the cycle that was running, if any.
    pub(crate) fn cancel(&self) -> Option<u64> {
        let mut inner = self.lock();
        let was_running = inner.state == State::Running;
        inner.state = State::Idle;
        inner.token.cancel();
        was_running.then_some(inner.cycle)
    }

    /// Runs `f` while holding the state lock, failing if a cycle is running.
    pub(crate) fn when_idle<R, T>(&self, f: impl FnOnce() -> R) -> Result<R, ExecutorError<T>> {
        let inner = self.lock();
        if inner.state == State::Running {
            return Err(ExecutorError::StillRunning);
        }
        let out = f();
        drop(inner);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Failure = ExecutorError<()>;

    #[test]
    fn begin_rejects_reentry_and_empty_queue() {
        let lc = Lifecycle::new();
        assert!(matches!(lc.begin::<()>(|| 0), Err(Failure::EmptySchedule)));
        assert_eq!(lc.state(), State::Idle);

        let cycle = lc.begin::<()>(|| 3).unwrap();
        assert_eq!(cycle.id(), 1);
        assert_eq!(lc.state(), State::Running);
        // running is checked before the queue
        assert!(matches!(lc.begin::<()>(|| 0), Err(Failure::AlreadyRunning)));

        assert!(lc.finish(&cycle, || {}));
        assert_eq!(lc.state(), State::Idle);
        assert_eq!(lc.begin::<()>(|| 1).unwrap().id(), 2);
    }

    #[test]
    fn cancel_forces_idle_and_cancels_token() {
        let lc = Lifecycle::new();
        let cycle = lc.begin::<()>(|| 1).unwrap();
        assert_eq!(lc.cancel(), Some(1));
        assert!(cycle.token().is_cancelled());
        assert_eq!(lc.state(), State::Idle);
        assert_eq!(lc.cancel(), None);
        // a cancelled cycle still owns the executor until a newer one begins
        assert!(lc.is_current(&cycle));
    }

    #[test]
    fn superseded_cycle_loses_ownership() {
        let lc = Lifecycle::new();
        let old = lc.begin::<()>(|| 1).unwrap();
        lc.cancel();
        let new = lc.begin::<()>(|| 1).unwrap();
        assert!(!lc.is_current(&old));
        assert!(lc.is_current(&new));

        let mut reset = 0;
        assert!(!lc.finish(&old, || reset += 1));
        assert_eq!(lc.state(), State::Running);
        assert!(!new.token().is_cancelled());

        assert!(lc.finish(&new, || reset += 1));
        assert_eq!(reset, 1);
        assert_eq!(lc.state(), State::Idle);
    }

    #[test]
    fn finish_resets_before_releasing_the_lock() {
        let lc = Lifecycle::new();
        let cycle = lc.begin::<()>(|| 1).unwrap();
        let mut seen = None;
        assert!(lc.finish(&cycle, || seen = Some(lc.inner.try_lock().is_err())));
        // the reset ran while the state lock was held
        assert_eq!(seen, Some(true));
    }

    #[test]
    fn when_idle_guards_reset() {
        let lc = Lifecycle::new();
        let cycle = lc.begin::<()>(|| 1).unwrap();
        assert!(matches!(lc.when_idle::<_, ()>(|| ()), Err(Failure::StillRunning)));
        lc.finish(&cycle, || {});
        assert_eq!(lc.when_idle::<_, ()>(|| 5).unwrap(), 5);
    }
}
