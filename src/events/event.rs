//! # Lifecycle events emitted by the executor.
//!
//! The [`EventKind`] enum names the four notification points of a cycle:
//! - `start` / `finish`: around the whole cycle, with an [`ExecutorInfo`] snapshot;
//! - `task.start` / `task.finish`: around each task, with its id (and outcome on finish).
//!
//! ## Ordering guarantees
//! Each delivered event carries a sequence number (`seq`) stamped by the executor's
//! [`Hooks`](crate::Hooks); it increases monotonically per executor.
//! For one task, `task.start` always precedes its `task.finish`; events of different
//! tasks interleave in the concurrent strategy.
//!
//! ## Example
//! ```rust
//! use taskpool::{Event, EventKind, TaskId};
//!
//! let ev = Event::<()>::new(EventKind::TaskStart, 1).with_task(TaskId::new(3));
//! assert_eq!(ev.kind.as_str(), "task.start");
//! assert_eq!(ev.task, Some(TaskId::new(3)));
//! ```

use std::fmt;
use std::time::SystemTime;

use crate::tasks::{Outcome, TaskId};

/// Classification of executor events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A cycle is starting.
    ///
    /// Sets:
    /// - `executor`: snapshot taken after the transition to running
    /// - `cycle`: cycle id
    Start,

    /// A cycle has finished (normally or aborted).
    ///
    /// Sets:
    /// - `executor`: snapshot taken after the transition back to idle
    /// - `cycle`: cycle id
    Finish,

    /// A task is about to run.
    ///
    /// Sets:
    /// - `task`: task id
    /// - `cycle`: cycle id
    TaskStart,

    /// A task has resolved.
    ///
    /// Sets:
    /// - `task`: task id
    /// - `outcome`: value, captured or raised error
    /// - `cycle`: cycle id
    TaskFinish,
}

impl EventKind {
    /// Every kind, in cycle order.
    pub const ALL: [EventKind; 4] = [
        EventKind::Start,
        EventKind::TaskStart,
        EventKind::TaskFinish,
        EventKind::Finish,
    ];

    /// Returns the dotted event name (`"start"`, `"task.finish"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Start => "start",
            EventKind::Finish => "finish",
            EventKind::TaskStart => "task.start",
            EventKind::TaskFinish => "task.finish",
        }
    }

    /// Parses a dotted event name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of executor state carried by `start`/`finish`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutorInfo {
    /// Configured concurrency limit (`0` = unbounded).
    pub limit: usize,
    /// Records still queued.
    pub queued: usize,
    /// Lifecycle state at snapshot time.
    pub running: bool,
}

/// Executor event with optional metadata.
///
/// - `seq`: per-executor sequence, stamped on delivery
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Debug)]
pub struct Event<'a, T> {
    /// Monotonically increasing sequence number within one executor (`0` until delivered).
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Id of the cycle that emitted the event.
    pub cycle: u64,
    /// Task the event describes, if any.
    pub task: Option<TaskId>,
    /// Outcome of the task (`task.finish` only).
    pub outcome: Option<&'a Outcome<T>>,
    /// Executor snapshot (`start`/`finish` only).
    pub executor: Option<ExecutorInfo>,
}

impl<'a, T> Event<'a, T> {
    /// Creates a new event of the given kind with current timestamp.
    pub fn new(kind: EventKind, cycle: u64) -> Self {
        Self {
            seq: 0,
            at: SystemTime::now(),
            kind,
            cycle,
            task: None,
            outcome: None,
            executor: None,
        }
    }

    /// Stamps the delivery sequence number.
    #[inline]
    pub(crate) fn with_seq(mut self, seq: u64) -> Self {
        self.seq = seq;
        self
    }

    /// Attaches a task id.
    #[inline]
    pub fn with_task(mut self, id: TaskId) -> Self {
        self.task = Some(id);
        self
    }

    /// Attaches a task outcome.
    #[inline]
    pub fn with_outcome(mut self, outcome: &'a Outcome<T>) -> Self {
        self.outcome = Some(outcome);
        self
    }

    /// Attaches an executor snapshot.
    #[inline]
    pub fn with_executor(mut self, info: ExecutorInfo) -> Self {
        self.executor = Some(info);
        self
    }
}
