//! # Completion condition for the concurrent strategy.
//!
//! [`ReturnWhen`] decides when the wait over all dispatched tasks resolves.
//! Tasks still unresolved at that point are returned in `Report::pending`;
//! they are **not** cancelled.
//!
//! ```text
//! AllComplete     → wait for every task (default)
//! FirstComplete   → stop after the first task resolves
//! FirstException  → stop after the first raised failure, or when all are done
//! ```

use crate::tasks::Outcome;

/// Condition that ends the concurrent wait.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReturnWhen {
    /// Wait for all tasks.
    #[default]
    AllComplete,
    /// Return as soon as any task resolves.
    FirstComplete,
    /// Return as soon as any task raises; equals `AllComplete` if none does.
    FirstException,
}

impl ReturnWhen {
    /// True if the wait should stop after observing `outcome`.
    ///
    /// Captured failures are values, so they never satisfy `FirstException`.
    pub fn is_satisfied_by<T>(self, outcome: &Outcome<T>) -> bool {
        match self {
            ReturnWhen::AllComplete => false,
            ReturnWhen::FirstComplete => true,
            ReturnWhen::FirstException => outcome.is_raised(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TaskError;

    #[test]
    fn conditions() {
        let ok: Outcome<u8> = Outcome::Value(1);
        let captured: Outcome<u8> = Outcome::Captured(TaskError::fail("c"));
        let raised: Outcome<u8> = Outcome::Raised(TaskError::fail("r"));

        assert!(!ReturnWhen::AllComplete.is_satisfied_by(&raised));
        assert!(ReturnWhen::FirstComplete.is_satisfied_by(&ok));
        assert!(!ReturnWhen::FirstException.is_satisfied_by(&ok));
        assert!(!ReturnWhen::FirstException.is_satisfied_by(&captured));
        assert!(ReturnWhen::FirstException.is_satisfied_by(&raised));
    }
}
