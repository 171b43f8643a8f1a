//! Scheduler error types.

use thiserror::Error;

use tickgrid_core::ConfigError;
use tickgrid_runtime::WorkerError;

/// Errors from the job queue.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    #[error("dequeue from an empty job queue")]
    Empty,
}

/// Errors that can occur while building or running the scheduler.
///
/// `Config` is raised before any state is built. `Worker` and `Queue`
/// mean a dispatch invariant was broken and the run cannot continue.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("worker invariant violated: {0}")]
    Worker(#[from] WorkerError),

    #[error("queue invariant violated: {0}")]
    Queue(#[from] QueueError),
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;
