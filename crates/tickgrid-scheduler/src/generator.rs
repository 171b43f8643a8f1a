//! Job generator. Draws random jobs from the configured distributions.
//!
//! The random source is passed in on every call, so the caller decides
//! whether runs are seeded or not.

use std::net::Ipv4Addr;

use rand::Rng;

use tickgrid_core::{DurationRange, Job, JobKind, JobsConfig, Tick};

#[derive(Debug, Clone)]
pub struct JobGenerator {
    streaming: DurationRange,
    batch: DurationRange,
}

impl JobGenerator {
    pub fn new(config: &JobsConfig) -> Self {
        Self {
            streaming: config.streaming_duration,
            batch: config.batch_duration,
        }
    }

    /// Draw one job created at `tick`.
    ///
    /// Origin and destination are independent uniform IPv4 addresses, the
    /// kind is a fair coin, and the service time is uniform over the kind's
    /// inclusive duration range.
    pub fn generate<R: Rng + ?Sized>(&self, tick: Tick, rng: &mut R) -> Job {
        let origin = random_addr(rng);
        let destination = random_addr(rng);
        let kind = if rng.gen_bool(0.5) {
            JobKind::Streaming
        } else {
            JobKind::Batch
        };
        let range = match kind {
            JobKind::Streaming => self.streaming,
            JobKind::Batch => self.batch,
        };
        let service_ticks = rng.gen_range(range.min..=range.max);
        Job::new(origin, destination, kind, service_ticks, tick)
    }
}

fn random_addr<R: Rng + ?Sized>(rng: &mut R) -> Ipv4Addr {
    Ipv4Addr::from(rng.r#gen::<[u8; 4]>())
}
