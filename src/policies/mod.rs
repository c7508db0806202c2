//! Failure and completion policies.
//!
//! ## Contents
//! - [`FailurePolicy`] what a task failure turns into (raised error or captured outcome)
//! - [`ReturnWhen`] when the concurrent strategy stops waiting
//!
//! ## Quick wiring
//! ```text
//! RunOptions { return_exceptions, return_when, timeout }
//!      └─► core::runner::Runner uses failure policy to build the Outcome
//!      └─► core::scheduler::run_concurrent uses return_when to stop waiting
//! ```

mod failure;
mod return_when;

pub use failure::FailurePolicy;
pub use return_when::ReturnWhen;
