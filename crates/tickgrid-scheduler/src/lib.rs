//! tickgrid-scheduler — the tick-driven dispatch loop.
//!
//! Each tick the scheduler:
//!
//! 1. advances the clock
//! 2. draws an arrival, filters it, and queues it
//! 3. advances every worker by one tick, counting completions
//! 4. hands queued jobs to idle workers in pool order
//! 5. lets the scaling policy grow or shrink the pool
//! 6. emits a snapshot to the sink
//!
//! # Architecture
//!
//! ```text
//! Scheduler
//!   ├── JobGenerator + AdmissionFilter (arrivals)
//!   ├── JobQueue (FIFO, unbounded)
//!   ├── WorkerPool (from tickgrid-runtime)
//!   ├── ScalingPolicy (from tickgrid-autoscale)
//!   └── SchedulerState (counters)
//! ```

pub mod error;
pub mod filter;
pub mod generator;
pub mod queue;
pub mod scheduler;
pub mod stop;

pub use error::{QueueError, SchedulerError, SchedulerResult};
pub use filter::AdmissionFilter;
pub use generator::JobGenerator;
pub use queue::JobQueue;
pub use scheduler::{Scheduler, SchedulerState};
pub use stop::StopSignal;
