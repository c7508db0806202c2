//! # Core subscriber trait
//!
//! `Subscribe` is the extension point for plugging custom event handlers into an
//! executor. Handlers are registered per [`EventKind`](crate::EventKind) and awaited
//! in registration order by [`Hooks`](crate::events::Hooks).
//!
//! ## Contract
//! - The executor **awaits** each handler before proceeding, so async side effects
//!   (logging, metrics) never race the next task step.
//! - A slow handler therefore slows the cycle down; keep handlers short.
//! - Panics are caught and logged; they never abort a cycle.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use taskpool::{Event, Subscribe};
//!
//! struct Audit;
//!
//! #[async_trait]
//! impl Subscribe<u64> for Audit {
//!     async fn on_event(&self, ev: &Event<'_, u64>) {
//!         let _ = (ev.kind, ev.task);
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "audit"
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Contract for event subscribers.
///
/// Implementations should avoid blocking the async runtime (prefer async I/O and cooperative waits).
#[async_trait]
pub trait Subscribe<T: Send + Sync + 'static>: Send + Sync + 'static {
    /// Handle a single event.
    async fn on_event(&self, event: &Event<'_, T>);

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
