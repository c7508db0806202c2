use std::sync::Arc;

use crate::{
    config::Config,
    error::ExecutorError,
    events::EventKind,
    subscribers::Subscribe,
    tasks::Work,
};

use super::executor::Executor;

/// Builder for an [`Executor`] with initial tasks and subscribers.
pub struct ExecutorBuilder<T> {
    cfg: Config,
    tasks: Vec<Work<T>>,
    subscribers: Vec<(EventKind, Arc<dyn Subscribe<T>>)>,
}

impl<T: Clone + Send + Sync + 'static> ExecutorBuilder<T> {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            tasks: Vec::new(),
            subscribers: Vec::new(),
        }
    }

    /// Queues one work item at build time.
    pub fn with_task(mut self, work: Work<T>) -> Self {
        self.tasks.push(work);
        self
    }

    /// Queues work items at build time, in order.
    pub fn with_tasks(mut self, tasks: impl IntoIterator<Item = Work<T>>) -> Self {
        self.tasks.extend(tasks);
        self
    }

    /// Registers a subscriber for one event kind.
    pub fn with_subscriber(mut self, kind: EventKind, sub: Arc<dyn Subscribe<T>>) -> Self {
        self.subscribers.push((kind, sub));
        self
    }

    /// Registers each subscriber for every event kind.
    ///
    /// Note that subscribers are dropped by the implicit reset after the first
    /// cycle; register them again before the next `run` if needed.
    pub fn with_subscribers(mut self, subs: Vec<Arc<dyn Subscribe<T>>>) -> Self {
        for sub in subs {
            for kind in EventKind::ALL {
                self.subscribers.push((kind, Arc::clone(&sub)));
            }
        }
        self
    }

    /// Builds the executor.
    ///
    /// # Errors
    /// [`ExecutorError::InvalidTask`] if an initial invocable fails to produce its unit of work.
    pub fn build(self) -> Result<Executor<T>, ExecutorError> {
        let exec = Executor::with_config(self.cfg);
        for (kind, sub) in self.subscribers {
            exec.on(kind, sub);
        }
        exec.extend(self.tasks)?;
        Ok(exec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaskError;

    #[test]
    fn build_queues_tasks_in_order() {
        let exec = ExecutorBuilder::new(Config::with_limit(2))
            .with_task(Work::pending(async { Ok::<_, TaskError>(1_u8) }))
            .with_tasks([
                Work::invocable(|| async { Ok(2) }),
                Work::with_args(|n: u8| async move { Ok(n) }, 3),
            ])
            .build()
            .unwrap();
        assert_eq!(exec.len(), 3);
        assert_eq!(exec.limit(), 2);
    }

    #[test]
    fn build_rejects_invalid_invocable() {
        let res = ExecutorBuilder::<u8>::new(Config::default())
            .with_task(Work::invocable(
                || -> std::future::Ready<Result<u8, TaskError>> { panic!("boom") },
            ))
            .build();
        assert!(matches!(res, Err(ExecutorError::InvalidTask { .. })));
    }
}
