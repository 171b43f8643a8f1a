//! Scheduler. Owns the queue and the worker pool and runs the tick loop.
//!
//! The order of the steps inside [`Scheduler::tick`] is part of its
//! contract: workers are advanced before dispatch, and scaling looks at the
//! queue only after dispatch has drained what it can.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use tickgrid_autoscale::{ScaleDecision, ScalingPolicy};
use tickgrid_core::{SimConfig, Tick};
use tickgrid_metrics::{RunSummary, SnapshotSink, TickSnapshot};
use tickgrid_runtime::WorkerPool;

use crate::error::SchedulerResult;
use crate::filter::AdmissionFilter;
use crate::generator::JobGenerator;
use crate::queue::JobQueue;
use crate::stop::StopSignal;

/// Run-wide counters. All of them only ever increase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerState {
    pub current_tick: Tick,
    /// Ticks on which the arrival draw produced a job.
    pub total_arrivals: u64,
    pub total_admitted: u64,
    pub total_rejected: u64,
    /// Jobs handed from the queue to a worker.
    pub total_dispatched: u64,
    /// Jobs a worker finished.
    pub total_completed: u64,
}

/// The discrete-time dispatcher.
///
/// Generic over the random source so tests can inject a seeded one.
pub struct Scheduler<R = StdRng> {
    config: SimConfig,
    rng: R,
    generator: JobGenerator,
    filter: AdmissionFilter,
    queue: JobQueue,
    pool: WorkerPool,
    policy: ScalingPolicy,
    state: SchedulerState,
}

impl Scheduler<StdRng> {
    /// Build a scheduler seeded from `config.seed`, or from OS entropy if
    /// no seed is set.
    pub fn from_config(config: SimConfig) -> SchedulerResult<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(config, rng)
    }
}

impl<R: Rng> Scheduler<R> {
    /// Validate `config`, create the initial pool, and prefill the queue
    /// with jobs stamped at tick 0.
    ///
    /// Prefilled jobs bypass the admission filter and are not counted as
    /// admitted.
    pub fn new(config: SimConfig, mut rng: R) -> SchedulerResult<Self> {
        config.validate()?;

        let generator = JobGenerator::new(&config.jobs);
        let mut queue = JobQueue::new();
        for _ in 0..config.initial_queue_len() {
            queue.push(generator.generate(0, &mut rng));
        }

        Ok(Self {
            filter: AdmissionFilter::new(config.admission.blocked_origin),
            pool: WorkerPool::with_workers(config.initial_workers),
            policy: ScalingPolicy::new(config.scaling.clone()),
            generator,
            queue,
            rng,
            state: SchedulerState::default(),
            config,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn state(&self) -> &SchedulerState {
        &self.state
    }

    pub fn queue(&self) -> &JobQueue {
        &self.queue
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    pub fn policy(&self) -> &ScalingPolicy {
        &self.policy
    }

    /// True once every configured tick has run.
    pub fn is_finished(&self) -> bool {
        self.state.current_tick >= self.config.running_ticks
    }

    /// Current state as a snapshot record.
    pub fn snapshot(&self) -> TickSnapshot {
        TickSnapshot {
            tick: self.state.current_tick,
            worker_count: self.pool.len(),
            busy_workers: self.pool.busy_count(),
            queue_len: self.queue.len(),
            total_admitted: self.state.total_admitted,
            total_rejected: self.state.total_rejected,
            total_dispatched: self.state.total_dispatched,
            total_completed: self.state.total_completed,
        }
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            initial_workers: self.config.initial_workers,
            final_workers: self.pool.len(),
            ticks_run: self.state.current_tick,
            total_admitted: self.state.total_admitted,
            total_rejected: self.state.total_rejected,
            total_dispatched: self.state.total_dispatched,
            total_completed: self.state.total_completed,
            stopped_early: !self.is_finished(),
        }
    }

    /// Execute one tick and report its snapshot to `sink`.
    ///
    /// A sink failure is logged and otherwise ignored. An error return means
    /// a dispatch invariant broke; the scheduler must not be ticked again.
    pub fn tick<S: SnapshotSink + ?Sized>(&mut self, sink: &mut S) -> SchedulerResult<TickSnapshot> {
        self.state.current_tick += 1;
        let tick = self.state.current_tick;

        self.admit_arrival(tick);

        let completed = self.pool.tick_all();
        self.state.total_completed += completed as u64;

        self.dispatch()?;
        self.apply_scaling(tick);

        let snapshot = self.snapshot();
        if let Err(e) = sink.record(&snapshot) {
            warn!(tick, error = %e, "failed to record snapshot");
        }
        Ok(snapshot)
    }

    /// Run every remaining tick, then emit the summary.
    pub fn run<S: SnapshotSink + ?Sized>(&mut self, sink: &mut S) -> SchedulerResult<RunSummary> {
        self.run_until_stopped(sink, &StopSignal::new())
    }

    /// Like [`Scheduler::run`], but checks `stop` before each tick and ends
    /// early once it is raised. The summary is emitted either way.
    pub fn run_until_stopped<S: SnapshotSink + ?Sized>(
        &mut self,
        sink: &mut S,
        stop: &StopSignal,
    ) -> SchedulerResult<RunSummary> {
        info!(
            workers = self.pool.len(),
            ticks = self.config.running_ticks,
            queued = self.queue.len(),
            "simulation started"
        );

        while !self.is_finished() {
            if stop.is_stopped() {
                info!(tick = self.state.current_tick, "stop requested, ending run");
                break;
            }
            self.tick(sink)?;
        }

        let summary = self.summary();
        if let Err(e) = sink.finish(&summary) {
            warn!(error = %e, "failed to record run summary");
        }
        info!(
            ticks = summary.ticks_run,
            initial_workers = summary.initial_workers,
            final_workers = summary.final_workers,
            completed = summary.total_completed,
            rejected = summary.total_rejected,
            "simulation complete"
        );
        Ok(summary)
    }

    fn admit_arrival(&mut self, tick: Tick) {
        if !self.rng.gen_bool(self.config.admission.probability) {
            return;
        }
        self.state.total_arrivals += 1;

        let job = self.generator.generate(tick, &mut self.rng);
        if self.filter.is_rejected(&job) {
            self.state.total_rejected += 1;
            debug!(tick, origin = %job.origin(), "arrival rejected");
        } else {
            self.queue.push(job);
            self.state.total_admitted += 1;
        }
    }

    /// Give each idle worker, in pool order, at most one queued job.
    fn dispatch(&mut self) -> SchedulerResult<()> {
        for worker in self.pool.iter_mut() {
            if self.queue.is_empty() {
                break;
            }
            if worker.is_idle() {
                let job = self.queue.pop()?;
                worker.assign(job)?;
                self.state.total_dispatched += 1;
            }
        }
        Ok(())
    }

    fn apply_scaling(&mut self, tick: Tick) {
        match self.policy.evaluate(self.queue.len(), self.pool.len()) {
            ScaleDecision::NoChange => {}
            ScaleDecision::ScaleUp => {
                let id = self.pool.grow();
                info!(tick, worker = %id, workers = self.pool.len(), "pool grown");
            }
            ScaleDecision::ScaleDown => match self.pool.shrink_idle() {
                Some(id) => {
                    info!(tick, worker = %id, workers = self.pool.len(), "pool shrunk");
                }
                None => {
                    warn!(tick, workers = self.pool.len(), "shrink skipped, every worker is busy");
                }
            },
        }
    }
}
