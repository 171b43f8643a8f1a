//! tickgrid-autoscale — queue-depth driven worker scaling.
//!
//! Evaluated once per tick, after dispatch, against the queue length and
//! the pool size at that moment.
//!
//! # Scaling Algorithm
//!
//! ```text
//! if cooldown > 0:
//!     cooldown -= 1
//!     NoChange
//! else if queue > scale_up_ratio * workers:
//!     cooldown = cooldown_ticks
//!     ScaleUp            // one worker
//! else if queue < scale_down_ratio * workers and workers >= min_workers_for_shrink:
//!     cooldown = cooldown_ticks
//!     ScaleDown          // one worker
//! else:
//!     NoChange
//! ```
//!
//! At most one worker is added or removed per tick, however far the
//! thresholds are exceeded.

pub mod scaler;

pub use scaler::{ScaleDecision, ScalingPolicy};
