//! # Event subscribers for the executor.
//!
//! This module provides the [`Subscribe`] trait and built-in implementations
//! for handling events delivered through [`Hooks`](crate::events::Hooks).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Executor / Runner ─── trigger(Event) ──► Hooks ──► handlers of ev.kind (in order)
//!                                                           │
//!                                                 ┌─────────┼─────────┐
//!                                                 ▼         ▼         ▼
//!                                             LogWriter   HookFn    Custom
//! ```

#[cfg(feature = "logging")]
mod embedded;
mod hook_fn;
mod subscribe;

#[cfg(feature = "logging")]
pub use embedded::LogWriter;
pub(crate) use hook_fn::HookFn;
pub use subscribe::Subscribe;
