//! Sink error types.

use thiserror::Error;

pub type SinkResult<T> = Result<T, SinkError>;

/// A sink could not record a snapshot. Never fatal to the simulation.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("sink unavailable: {0}")]
    Unavailable(String),
}
