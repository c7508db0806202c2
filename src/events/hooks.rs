//! # Hooks: per-executor registry of event subscribers.
//!
//! [`Hooks`] maps each [`EventKind`] to an ordered list of [`Subscribe`] handlers.
//! It is owned by one executor and cleared on every reset; there is no process-wide
//! registry.
//!
//! ## Rules
//! - `trigger()` awaits handlers **one by one, in registration order**; the caller
//!   resumes only after the last handler returns.
//! - Handlers registered or removed during a `trigger()` take effect from the next event.
//! - A panicking handler is caught and logged; the remaining handlers still run.
//! - Every triggered event is stamped with the next `seq` of this registry, so sequence
//!   numbers are scoped to one executor.
//!
//! ## Diagram
//! ```text
//! trigger(Event)
//!     │   (stamp seq, snapshot handlers for ev.kind)
//!     ├──► handler 1 .on_event().await
//!     ├──► handler 2 .on_event().await   (panic → warn!, continue)
//!     └──► handler N .on_event().await
//! ```

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use futures::FutureExt;
use tracing::warn;

use super::event::{Event, EventKind};
use crate::error::panic_message;
use crate::subscribers::Subscribe;

type Handlers<T> = HashMap<EventKind, Vec<Arc<dyn Subscribe<T>>>>;

/// Ordered event handlers keyed by event kind.
pub struct Hooks<T> {
    handlers: RwLock<Handlers<T>>,
    seq: AtomicU64,
}

impl<T: Send + Sync + 'static> Hooks<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            seq: AtomicU64::new(0),
        }
    }

    /// Registers `sub` for `kind`, after any handlers already registered.
    pub fn on(&self, kind: EventKind, sub: Arc<dyn Subscribe<T>>) {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(kind)
            .or_default()
            .push(sub);
    }

    /// Removes every handler of `kind`; returns how many were removed.
    pub fn off(&self, kind: EventKind) -> usize {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&kind)
            .map_or(0, |subs| subs.len())
    }

    /// Removes all handlers.
    pub fn clear(&self) {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of handlers registered for `kind`.
    pub fn count(&self, kind: EventKind) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&kind)
            .map_or(0, Vec::len)
    }

    /// Sequence number of the last triggered event (`0` if none yet).
    pub fn last_seq(&self) -> u64 {
        self.seq.load(Ordering::Relaxed)
    }

    /// Stamps `event` and invokes every handler of its kind, in registration order.
    pub async fn trigger(&self, event: Event<'_, T>) {
        let event = event.with_seq(self.seq.fetch_add(1, Ordering::Relaxed) + 1);
        let subs = {
            let guard = self.handlers.read().unwrap_or_else(PoisonError::into_inner);
            match guard.get(&event.kind) {
                Some(subs) => subs.clone(),
                None => return,
            }
        };

        for sub in subs {
            let fut = sub.on_event(&event);
            if let Err(panic_err) = AssertUnwindSafe(fut).catch_unwind().await {
                warn!(
                    subscriber = sub.name(),
                    event = event.kind.as_str(),
                    info = %panic_message(panic_err.as_ref()),
                    "subscriber panicked"
                );
            }
        }
    }
}

impl<T: Send + Sync + 'static> Default for Hooks<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    struct Tag {
        label: &'static str,
        seen: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Subscribe<u32> for Tag {
        async fn on_event(&self, ev: &Event<'_, u32>) {
            // yields so out-of-order completion would be visible
            tokio::time::sleep(Duration::from_millis(2)).await;
            self.seen
                .lock()
                .unwrap()
                .push(format!("{}:{}", self.label, ev.kind));
        }
    }

    struct Boom;

    #[async_trait]
    impl Subscribe<u32> for Boom {
        async fn on_event(&self, _ev: &Event<'_, u32>) {
            panic!("subscriber exploded");
        }

        fn name(&self) -> &'static str {
            "boom"
        }
    }

    fn tag(label: &'static str, seen: &Arc<Mutex<Vec<String>>>) -> Arc<dyn Subscribe<u32>> {
        Arc::new(Tag {
            label,
            seen: Arc::clone(seen),
        })
    }

    #[tokio::test]
    async fn handlers_run_in_registration_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let hooks = Hooks::new();
        hooks.on(EventKind::Start, tag("a", &seen));
        hooks.on(EventKind::Start, tag("b", &seen));
        hooks.on(EventKind::Finish, tag("c", &seen));

        hooks.trigger(Event::new(EventKind::Start, 1)).await;
        assert_eq!(*seen.lock().unwrap(), vec!["a:start", "b:start"]);
    }

    #[tokio::test]
    async fn off_and_clear_remove_handlers() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let hooks = Hooks::new();
        hooks.on(EventKind::TaskStart, tag("a", &seen));
        hooks.on(EventKind::TaskStart, tag("b", &seen));
        hooks.on(EventKind::TaskFinish, tag("c", &seen));

        assert_eq!(hooks.off(EventKind::TaskStart), 2);
        assert_eq!(hooks.off(EventKind::TaskStart), 0);
        hooks.trigger(Event::new(EventKind::TaskStart, 1)).await;
        assert!(seen.lock().unwrap().is_empty());

        hooks.clear();
        assert_eq!(hooks.count(EventKind::TaskFinish), 0);
    }

    #[tokio::test]
    async fn panicking_handler_does_not_stop_others() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let hooks = Hooks::new();
        hooks.on(EventKind::Finish, Arc::new(Boom));
        hooks.on(EventKind::Finish, tag("after", &seen));

        hooks.trigger(Event::new(EventKind::Finish, 1)).await;
        assert_eq!(*seen.lock().unwrap(), vec!["after:finish"]);
    }

    struct SeqLog(Arc<Mutex<Vec<u64>>>);

    #[async_trait]
    impl Subscribe<u32> for SeqLog {
        async fn on_event(&self, ev: &Event<'_, u32>) {
            self.0.lock().unwrap().push(ev.seq);
        }
    }

    #[tokio::test]
    async fn sequence_is_scoped_to_one_registry() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let first = Hooks::new();
        let second = Hooks::new();
        first.on(EventKind::Start, Arc::new(SeqLog(Arc::clone(&seen))));
        second.on(EventKind::Start, Arc::new(SeqLog(Arc::clone(&seen))));

        first.trigger(Event::new(EventKind::Start, 1)).await;
        first.trigger(Event::new(EventKind::Finish, 1)).await;
        first.trigger(Event::new(EventKind::Start, 2)).await;
        second.trigger(Event::new(EventKind::Start, 1)).await;

        // events without handlers still consume a number
        assert_eq!(*seen.lock().unwrap(), vec![1, 3, 1]);
        assert_eq!(first.last_seq(), 3);
        assert_eq!(second.last_seq(), 1);
    }
}
