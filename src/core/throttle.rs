//! # Concurrency throttle: counting admission gate.
//!
//! [`Throttle`] bounds how many tasks are in flight at once. Each admitted task holds a
//! [`Slot`] for the duration of its own execution; dropping the slot releases it, so the
//! slot comes back on every exit path, including failures and panics.
//!
//! ```text
//! limit = 0  → unbounded: acquire() returns immediately, no semaphore
//! limit = n  → tokio Semaphore with n permits; acquire() suspends until one is free
//! ```
//!
//! Acquisition is a suspension point (an awaited semaphore permit), never a busy-wait.
//! Waiters are served by the semaphore's FIFO queue.

use std::sync::Arc;

use tokio::select;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;

/// Counting admission gate with a fixed capacity.
#[derive(Clone, Debug)]
pub struct Throttle {
    limit: usize,
    semaphore: Option<Arc<Semaphore>>,
}

impl Throttle {
    /// Creates a gate with `limit` slots (`0` = unbounded).
    ///
    /// Limits above [`Semaphore::MAX_PERMITS`] are clamped.
    pub fn new(limit: usize) -> Self {
        let limit = limit.min(Semaphore::MAX_PERMITS);
        let semaphore = match limit {
            0 => None,
            n => Some(Arc::new(Semaphore::new(n))),
        };
        Self { limit, semaphore }
    }

    /// Configured capacity; `None` when unbounded.
    pub fn capacity(&self) -> Option<usize> {
        self.semaphore.as_ref().map(|_| self.limit)
    }

    /// Currently free slots; `None` when unbounded.
    pub fn available(&self) -> Option<usize> {
        self.semaphore.as_ref().map(|s| s.available_permits())
    }

    /// True if the gate imposes no bound.
    pub fn is_unbounded(&self) -> bool {
        self.semaphore.is_none()
    }

    /// Suspends until a slot is free and takes it.
    ///
    /// Returns `None` only if the underlying semaphore was closed.
    pub async fn acquire(&self) -> Option<Slot> {
        match &self.semaphore {
            Some(sem) => sem.clone().acquire_owned().await.ok().map(Slot::bounded),
            None => Some(Slot::unbounded()),
        }
    }

    /// Like [`acquire`](Self::acquire), but gives up once `token` is cancelled.
    pub async fn acquire_until(&self, token: &CancellationToken) -> Option<Slot> {
        if token.is_cancelled() {
            return None;
        }
        let Some(sem) = &self.semaphore else {
            return Some(Slot::unbounded());
        };

        let permit_future = sem.clone().acquire_owned();
        tokio::pin!(permit_future);

        select! {
            biased;
            _ = token.cancelled() => None,
            res = &mut permit_future => res.ok().map(Slot::bounded),
        }
    }
}

/// A held admission slot. Released on drop.
#[derive(Debug)]
#[must_use = "the slot is released as soon as it is dropped"]
pub struct Slot {
    _permit: Option<OwnedSemaphorePermit>,
}

impl Slot {
    fn bounded(permit: OwnedSemaphorePermit) -> Self {
        Self {
            _permit: Some(permit),
        }
    }

    fn unbounded() -> Self {
        Self { _permit: None }
    }

    /// Gives the slot back explicitly.
    pub fn release(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn slots_are_counted_and_released() {
        let throttle = Throttle::new(2);
        assert_eq!(throttle.capacity(), Some(2));

        let a = throttle.acquire().await.unwrap();
        let b = throttle.acquire().await.unwrap();
        assert_eq!(throttle.available(), Some(0));

        a.release();
        assert_eq!(throttle.available(), Some(1));
        drop(b);
        assert_eq!(throttle.available(), Some(2));
    }

    #[tokio::test]
    async fn acquire_suspends_until_release() {
        let throttle = Throttle::new(1);
        let held = throttle.acquire().await.unwrap();

        let waiter = {
            let throttle = throttle.clone();
            tokio::spawn(async move { throttle.acquire().await.map(|_| ()) })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        held.release();
        assert_eq!(waiter.await.unwrap(), Some(()));
    }

    #[tokio::test]
    async fn zero_limit_is_unbounded() {
        let throttle = Throttle::new(0);
        assert!(throttle.is_unbounded());
        assert_eq!(throttle.capacity(), None);

        let slots: Vec<_> = futures::future::join_all((0..100).map(|_| throttle.acquire())).await;
        assert!(slots.iter().all(Option::is_some));
    }

    #[tokio::test]
    async fn cancelled_waiters_give_up() {
        let throttle = Throttle::new(1);
        let token = CancellationToken::new();
        let _held = throttle.acquire().await.unwrap();

        let waiter = {
            let throttle = throttle.clone();
            let token = token.clone();
            tokio::spawn(async move { throttle.acquire_until(&token).await.is_some() })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        token.cancel();
        assert!(!waiter.await.unwrap());
        assert!(throttle.acquire_until(&token).await.is_none());
    }

    #[test]
    fn huge_limits_are_clamped() {
        let throttle = Throttle::new(usize::MAX);
        assert_eq!(throttle.capacity(), Some(Semaphore::MAX_PERMITS));
    }
}
