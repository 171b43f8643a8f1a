//! tickgrid-runtime — single-slot workers and the pool that owns them.
//!
//! # Architecture
//!
//! ```text
//! WorkerPool
//!   ├── next_id (monotonic, ids are never reused)
//!   └── Vec<Worker> (pool order = dispatch order)
//!       └── Option<Assignment> (job + remaining ticks, present iff busy)
//! ```

pub mod error;
pub mod pool;
pub mod worker;

pub use error::{WorkerError, WorkerResult};
pub use pool::WorkerPool;
pub use worker::{TickOutcome, Worker, WorkerId, WorkerState};
