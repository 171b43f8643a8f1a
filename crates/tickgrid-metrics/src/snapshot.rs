//! Snapshot records emitted by the scheduler.

use serde::{Deserialize, Serialize};

use tickgrid_core::Tick;

/// Scheduler state at the end of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickSnapshot {
    pub tick: Tick,
    pub worker_count: usize,
    pub busy_workers: usize,
    pub queue_len: usize,
    pub total_admitted: u64,
    pub total_rejected: u64,
    pub total_dispatched: u64,
    pub total_completed: u64,
}

/// End-of-run totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub initial_workers: u32,
    pub final_workers: usize,
    /// Ticks actually executed. Less than configured if the run was stopped.
    pub ticks_run: Tick,
    pub total_admitted: u64,
    pub total_rejected: u64,
    pub total_dispatched: u64,
    pub total_completed: u64,
    pub stopped_early: bool,
}
