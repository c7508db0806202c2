//! # Executor configuration.
//!
//! Provides [`Config`] (executor-wide defaults) and [`RunOptions`] (per-run overrides).
//!
//! ## Sentinel values
//! - `limit = 0` → unbounded concurrency (no semaphore created)
//! - `timeout = 0s` → no overall timeout

use std::time::Duration;

use crate::policies::{FailurePolicy, ReturnWhen};

/// Default concurrency limit used by [`Config::default`].
pub const DEFAULT_LIMIT: usize = 10;

/// Executor-wide configuration.
///
/// ## Field semantics
/// - `limit`: max simultaneously in-flight tasks (`0` = unbounded, `1` = strict sequential)
/// - `timeout`: overall wait bound for the concurrent strategy (`0s` = none)
/// - `return_exceptions`: capture task failures as outcomes instead of raising them
/// - `return_when`: when the concurrent wait resolves
///
/// All fields are public; prefer the helper accessors over sentinel checks.
#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum number of tasks in flight at once.
    pub limit: usize,

    /// Overall timeout for one concurrent cycle.
    pub timeout: Duration,

    /// Default failure policy flag, overridable per run.
    pub return_exceptions: bool,

    /// Default completion condition, overridable per run.
    pub return_when: ReturnWhen,
}

impl Config {
    /// Creates a config with the given limit, coercing negatives to `0` (unbounded).
    ///
    /// # Example
    /// ```
    /// use taskpool::Config;
    ///
    /// assert_eq!(Config::with_limit(3).limit, 3);
    /// assert_eq!(Config::with_limit(-5).limit, 0);
    /// ```
    pub fn with_limit(limit: isize) -> Self {
        Self {
            limit: usize::try_from(limit).unwrap_or(0),
            ..Self::default()
        }
    }

    /// Returns the concurrency limit as an `Option`.
    ///
    /// - `None` → unbounded
    /// - `Some(n)` → at most `n` concurrent tasks
    #[inline]
    pub fn concurrency_limit(&self) -> Option<usize> {
        if self.limit == 0 {
            None
        } else {
            Some(self.limit)
        }
    }

    /// Returns the default overall timeout as an `Option`.
    #[inline]
    pub fn default_timeout(&self) -> Option<Duration> {
        if self.timeout == Duration::ZERO {
            None
        } else {
            Some(self.timeout)
        }
    }

    /// True when the strict sequential strategy applies.
    #[inline]
    pub fn is_sequential(&self) -> bool {
        self.limit == 1
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `limit = 10`
    /// - `timeout = 0s` (no timeout)
    /// - `return_exceptions = false` (failures are raised)
    /// - `return_when = ReturnWhen::AllComplete`
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            timeout: Duration::ZERO,
            return_exceptions: false,
            return_when: ReturnWhen::default(),
        }
    }
}

/// Per-run overrides for [`Executor::run`](crate::Executor::run).
///
/// Unset fields fall back to the executor's [`Config`].
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Overall wait bound for the concurrent strategy.
    pub timeout: Option<Duration>,
    /// Failure policy flag for this run.
    pub return_exceptions: Option<bool>,
    /// Completion condition for this run.
    pub return_when: Option<ReturnWhen>,
}

impl RunOptions {
    /// Returns options with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the overall timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the failure policy flag.
    pub fn return_exceptions(mut self, capture: bool) -> Self {
        self.return_exceptions = Some(capture);
        self
    }

    /// Sets the completion condition.
    pub fn return_when(mut self, when: ReturnWhen) -> Self {
        self.return_when = Some(when);
        self
    }

    /// Merges these options over `cfg`.
    pub(crate) fn resolve(&self, cfg: &Config) -> Resolved {
        Resolved {
            timeout: self.timeout.or(cfg.default_timeout()),
            failure: FailurePolicy::from_flag(
                self.return_exceptions.unwrap_or(cfg.return_exceptions),
            ),
            return_when: self.return_when.unwrap_or(cfg.return_when),
        }
    }
}

/// Effective settings of one cycle.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Resolved {
    pub timeout: Option<Duration>,
    pub failure: FailurePolicy,
    pub return_when: ReturnWhen,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_bounded_and_raising() {
        let cfg = Config::default();
        assert_eq!(cfg.concurrency_limit(), Some(DEFAULT_LIMIT));
        assert_eq!(cfg.default_timeout(), None);
        assert!(!cfg.return_exceptions);
        assert!(!cfg.is_sequential());
    }

    #[test]
    fn zero_limit_is_unbounded() {
        assert_eq!(Config::with_limit(0).concurrency_limit(), None);
        assert_eq!(Config::with_limit(isize::MIN).concurrency_limit(), None);
        assert!(Config::with_limit(1).is_sequential());
    }

    #[test]
    fn run_options_override_config() {
        let cfg = Config {
            timeout: Duration::from_secs(3),
            ..Config::default()
        };

        let inherited = RunOptions::new().resolve(&cfg);
        assert_eq!(inherited.timeout, Some(Duration::from_secs(3)));
        assert_eq!(inherited.failure, FailurePolicy::Raise);
        assert_eq!(inherited.return_when, ReturnWhen::AllComplete);

        let overridden = RunOptions::new()
            .timeout(Duration::from_millis(5))
            .return_exceptions(true)
            .return_when(ReturnWhen::FirstComplete)
            .resolve(&cfg);
        assert_eq!(overridden.timeout, Some(Duration::from_millis(5)));
        assert_eq!(overridden.failure, FailurePolicy::Capture);
        assert_eq!(overridden.return_when, ReturnWhen::FirstComplete);
    }
}
