//! FIFO job queue.

use std::collections::VecDeque;

use tickgrid_core::Job;

use crate::error::QueueError;

/// Unbounded first-in first-out queue of pending jobs.
#[derive(Debug, Default)]
pub struct JobQueue {
    jobs: VecDeque<Job>,
}

impl JobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a job at the tail.
    pub fn push(&mut self, job: Job) {
        self.jobs.push_back(job);
    }

    /// Remove and return the job at the head.
    pub fn pop(&mut self) -> Result<Job, QueueError> {
        self.jobs.pop_front().ok_or(QueueError::Empty)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }
}
