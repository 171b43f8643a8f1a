//! Worker pool: the ordered set of workers owned by the scheduler.
//!
//! Pool order is dispatch order. New workers are appended; shrinking only
//! ever removes an idle worker so no in-flight job is lost.

use tracing::debug;

use crate::worker::{TickOutcome, Worker, WorkerId};

#[derive(Debug, Default)]
pub struct WorkerPool {
    workers: Vec<Worker>,
    /// Next id to hand out. Ids are never reused.
    next_id: u64,
}

impl WorkerPool {
    /// Create a pool with `count` idle workers.
    pub fn with_workers(count: u32) -> Self {
        let mut pool = Self::default();
        for _ in 0..count {
            pool.grow();
        }
        pool
    }

    /// Append one idle worker and return its id.
    pub fn grow(&mut self) -> WorkerId {
        let id = WorkerId(self.next_id);
        self.next_id += 1;
        self.workers.push(Worker::new(id));
        debug!(worker = %id, total = self.workers.len(), "worker added");
        id
    }

    /// Remove the last idle worker in pool order.
    ///
    /// Returns `None` (and leaves the pool unchanged) if every worker is
    /// busy.
    pub fn shrink_idle(&mut self) -> Option<WorkerId> {
        let index = self.workers.iter().rposition(Worker::is_idle)?;
        let removed = self.workers.remove(index);
        debug!(worker = %removed.id(), total = self.workers.len(), "worker removed");
        Some(removed.id())
    }

    /// Advance every worker by one tick and return how many finished a job.
    pub fn tick_all(&mut self) -> usize {
        self.workers
            .iter_mut()
            .map(Worker::tick)
            .filter(|outcome| matches!(outcome, TickOutcome::Completed(_)))
            .count()
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    pub fn busy_count(&self) -> usize {
        self.workers.iter().filter(|w| !w.is_idle()).count()
    }

    pub fn idle_count(&self) -> usize {
        self.len() - self.busy_count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Worker> {
        self.workers.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Worker> {
        self.workers.iter_mut()
    }
}
