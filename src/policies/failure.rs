//! # Failure policy for task errors.
//!
//! [`FailurePolicy`] is the typed form of the `return_exceptions` flag.
//!
//! - [`FailurePolicy::Raise`] the error propagates: in the strict sequential strategy it
//!   aborts the cycle, in the concurrent strategy it is recorded as [`Outcome::Raised`].
//! - [`FailurePolicy::Capture`] the error becomes the task's outcome value
//!   ([`Outcome::Captured`]) and never aborts anything.
//!
//! [`Outcome::Raised`]: crate::Outcome::Raised
//! [`Outcome::Captured`]: crate::Outcome::Captured

use crate::{error::TaskError, tasks::Outcome};

/// What to do with a failed task.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Propagate the failure (default).
    #[default]
    Raise,
    /// Convert the failure into an outcome value.
    Capture,
}

impl FailurePolicy {
    /// Maps the `return_exceptions` flag to a policy.
    pub fn from_flag(return_exceptions: bool) -> Self {
        if return_exceptions {
            FailurePolicy::Capture
        } else {
            FailurePolicy::Raise
        }
    }

    /// Builds the outcome of a finished task.
    pub fn outcome<T>(self, res: Result<T, TaskError>) -> Outcome<T> {
        match (res, self) {
            (Ok(value), _) => Outcome::Value(value),
            (Err(e), FailurePolicy::Capture) => Outcome::Captured(e),
            (Err(e), FailurePolicy::Raise) => Outcome::Raised(e),
        }
    }
}
