//! # LogWriter: event writer backed by `tracing`
//!
//! A minimal subscriber that writes incoming [`Event`]s as `tracing` records.
//! Register it for the kinds you want to see; use it for tests or demos.
//!
//! ## Example output
//! ```text
//! INFO taskpool::log: cycle starting cycle=1 limit=3 queued=10
//! INFO taskpool::log: task starting cycle=1 task=#0
//! INFO taskpool::log: task finished cycle=1 task=#0 outcome="value"
//! WARN taskpool::log: task finished cycle=1 task=#4 outcome="raised" error=execution failed: boom
//! INFO taskpool::log: cycle finished cycle=1 queued=0
//! ```

use async_trait::async_trait;
use tracing::{info, warn};

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl<T: Send + Sync + 'static> Subscribe<T> for LogWriter {
    async fn on_event(&self, e: &Event<'_, T>) {
        match e.kind {
            EventKind::Start => {
                let (limit, queued) = e.executor.map_or((0, 0), |i| (i.limit, i.queued));
                info!(target: "taskpool::log", cycle = e.cycle, limit, queued, "cycle starting");
            }
            EventKind::Finish => {
                let queued = e.executor.map_or(0, |i| i.queued);
                info!(target: "taskpool::log", cycle = e.cycle, queued, "cycle finished");
            }
            EventKind::TaskStart => {
                let task = e.task.map(|t| t.to_string()).unwrap_or_default();
                info!(target: "taskpool::log", cycle = e.cycle, %task, "task starting");
            }
            EventKind::TaskFinish => {
                let task = e.task.map(|t| t.to_string()).unwrap_or_default();
                let outcome = e.outcome.map_or("unknown", |o| o.as_label());
                match e.outcome.and_then(|o| o.error()) {
                    Some(err) => warn!(
                        target: "taskpool::log",
                        cycle = e.cycle,
                        %task,
                        outcome,
                        error = %err,
                        "task finished"
                    ),
                    None => info!(target: "taskpool::log", cycle = e.cycle, %task, outcome, "task finished"),
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
