//! Worker runtime error types.

use thiserror::Error;

use crate::worker::WorkerId;

/// Errors raised by worker state transitions.
///
/// These indicate a scheduling bug, not a runtime condition, and abort
/// the run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkerError {
    #[error("{worker} is busy and cannot accept another job")]
    AlreadyBusy { worker: WorkerId },
}

pub type WorkerResult<T> = Result<T, WorkerError>;
