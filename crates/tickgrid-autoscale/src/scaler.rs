//! Scaling policy: threshold comparison plus a cooldown timer.

use tracing::debug;

use tickgrid_core::ScalingConfig;

/// A scaling decision for the worker pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleDecision {
    /// Leave the pool as it is.
    NoChange,
    /// Append one idle worker.
    ScaleUp,
    /// Remove one idle worker.
    ScaleDown,
}

/// Stateful scaling policy.
///
/// The only state carried between ticks is the cooldown counter.
#[derive(Debug, Clone)]
pub struct ScalingPolicy {
    config: ScalingConfig,
    /// Ticks left before thresholds are evaluated again.
    cooldown_remaining: u32,
}

impl ScalingPolicy {
    pub fn new(config: ScalingConfig) -> Self {
        Self {
            config,
            cooldown_remaining: 0,
        }
    }

    pub fn cooldown_remaining(&self) -> u32 {
        self.cooldown_remaining
    }

    pub fn config(&self) -> &ScalingConfig {
        &self.config
    }

    /// Decide whether the pool should change size this tick.
    ///
    /// While cooling down, the tick is consumed and thresholds are not
    /// looked at.
    pub fn evaluate(&mut self, queue_len: usize, worker_count: usize) -> ScaleDecision {
        if self.cooldown_remaining > 0 {
            self.cooldown_remaining -= 1;
            return ScaleDecision::NoChange;
        }

        let queue = queue_len as u64;
        let workers = worker_count as u64;

        if queue > self.config.scale_up_ratio.saturating_mul(workers) {
            self.cooldown_remaining = self.config.cooldown_ticks;
            debug!(queue, workers, "scaling up");
            return ScaleDecision::ScaleUp;
        }

        if queue < self.config.scale_down_ratio.saturating_mul(workers)
            && workers >= u64::from(self.config.min_workers_for_shrink)
        {
            self.cooldown_remaining = self.config.cooldown_ticks;
            debug!(queue, workers, "scaling down");
            return ScaleDecision::ScaleDown;
        }

        ScaleDecision::NoChange
    }
}
