//! # FIFO queue of task records awaiting execution.
//!
//! ## Rules
//! - Indices are assigned at push time from a counter and are unique within one cycle.
//! - A record leaves the queue exactly once: popped, drained, or cleared.
//! - [`TaskQueue::clear`] starts a fresh numbering for the next cycle.

use std::collections::VecDeque;

use super::{
    completion::Completion,
    record::{TaskId, TaskRecord},
    work::BoxTaskFuture,
};

/// Insertion-ordered, FIFO-consumed collection of [`TaskRecord`]s.
pub struct TaskQueue<T> {
    records: VecDeque<TaskRecord<T>>,
    next_index: usize,
}

impl<T> TaskQueue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            records: VecDeque::new(),
            next_index: 0,
        }
    }

    /// Appends a unit of work and returns the handle completed when it runs.
    pub fn push(&mut self, work: BoxTaskFuture<T>) -> Completion<T> {
        let id = TaskId::new(self.next_index);
        self.next_index += 1;
        let (done, notify) = Completion::channel(id);
        self.records.push_back(TaskRecord::new(id, work, notify));
        done
    }

    /// Removes the oldest record.
    pub fn pop_front(&mut self) -> Option<TaskRecord<T>> {
        self.records.pop_front()
    }

    /// Removes every record, oldest first.
    pub fn drain(&mut self) -> Vec<TaskRecord<T>> {
        self.records.drain(..).collect()
    }

    /// Drops every record and restarts numbering.
    pub fn clear(&mut self) {
        self.records.clear();
        self.next_index = 0;
    }

    /// Ids of the queued records, oldest first.
    pub fn ids(&self) -> Vec<TaskId> {
        self.records.iter().map(TaskRecord::id).collect()
    }

    /// Number of queued records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TaskError;

    fn unit(n: u32) -> BoxTaskFuture<u32> {
        Box::pin(async move { Ok::<_, TaskError>(n) })
    }

    #[test]
    fn fifo_order_and_indices() {
        let mut q = TaskQueue::new();
        assert_eq!(q.push(unit(10)).id(), TaskId::new(0));
        assert_eq!(q.push(unit(11)).id(), TaskId::new(1));
        assert_eq!(q.push(unit(12)).id(), TaskId::new(2));
        assert_eq!(q.len(), 3);

        assert_eq!(q.pop_front().map(|r| r.id()), Some(TaskId::new(0)));
        // indices keep increasing within a cycle even after pops
        assert_eq!(q.push(unit(13)).id(), TaskId::new(3));
        assert_eq!(q.ids(), vec![TaskId::new(1), TaskId::new(2), TaskId::new(3)]);

        let ids: Vec<_> = q.drain().into_iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![TaskId::new(1), TaskId::new(2), TaskId::new(3)]);
        assert!(q.is_empty());
    }

    #[test]
    fn clear_restarts_numbering() {
        let mut q = TaskQueue::new();
        q.push(unit(1));
        q.push(unit(2));
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.push(unit(3)).id(), TaskId::new(0));
    }

    #[tokio::test]
    async fn cleared_records_complete_as_skipped() {
        let mut q = TaskQueue::new();
        let done = q.push(unit(1));
        q.clear();
        assert!(done.await.outcome.is_skipped());
    }

    #[tokio::test]
    async fn record_yields_its_work() {
        let mut q = TaskQueue::new();
        q.push(unit(7));
        let (id, work, _notify) = q.pop_front().unwrap().into_parts();
        assert_eq!(id.index(), 0);
        assert_eq!(work.await, Ok(7));
    }
}
