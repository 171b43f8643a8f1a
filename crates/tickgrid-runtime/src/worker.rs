//! Worker: a single-slot processing unit.
//!
//! A worker is either idle or holds exactly one job. Each call to
//! [`Worker::tick`] consumes one tick of the job's remaining service time;
//! the tick that brings it to zero also frees the worker.

use std::fmt;

use tickgrid_core::{Job, Tick};

use crate::error::{WorkerError, WorkerResult};

/// Identity of a worker, unique for the lifetime of its pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkerId(pub u64);

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "worker-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    Busy,
}

/// What happened to a worker during one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The worker had nothing to do.
    Idle,
    /// The job still needs `remaining` ticks.
    InProgress { remaining: Tick },
    /// The job finished on this tick and the worker is idle again.
    Completed(Job),
}

/// The job a busy worker is running. `remaining` is always at least 1.
#[derive(Debug)]
struct Assignment {
    job: Job,
    remaining: Tick,
}

#[derive(Debug)]
pub struct Worker {
    id: WorkerId,
    current: Option<Assignment>,
}

impl Worker {
    /// Create an idle worker.
    pub fn new(id: WorkerId) -> Self {
        Self { id, current: None }
    }

    pub fn id(&self) -> WorkerId {
        self.id
    }

    pub fn state(&self) -> WorkerState {
        match self.current {
            Some(_) => WorkerState::Busy,
            None => WorkerState::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    /// The job being processed, if any.
    pub fn current_job(&self) -> Option<&Job> {
        self.current.as_ref().map(|a| &a.job)
    }

    /// Ticks left on the current job; zero while idle.
    pub fn remaining_ticks(&self) -> Tick {
        self.current.as_ref().map_or(0, |a| a.remaining)
    }

    /// Start processing `job`.
    ///
    /// Fails if the worker is already busy; the job is not accepted.
    pub fn assign(&mut self, job: Job) -> WorkerResult<()> {
        if self.current.is_some() {
            return Err(WorkerError::AlreadyBusy { worker: self.id });
        }
        let remaining = job.service_ticks();
        self.current = Some(Assignment { job, remaining });
        Ok(())
    }

    /// Advance the current job by one tick. A no-op while idle.
    pub fn tick(&mut self) -> TickOutcome {
        let Some(assignment) = self.current.as_mut() else {
            return TickOutcome::Idle;
        };

        assignment.remaining = assignment.remaining.saturating_sub(1);
        if assignment.remaining > 0 {
            return TickOutcome::InProgress {
                remaining: assignment.remaining,
            };
        }

        match self.current.take() {
            Some(done) => TickOutcome::Completed(done.job),
            None => TickOutcome::Idle,
        }
    }
}
