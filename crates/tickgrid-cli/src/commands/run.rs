use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;

use clap::Args;
use tracing::{info, warn};

use tickgrid_core::{ConfigFile, SimConfig};
use tickgrid_metrics::{CsvLogSink, FanoutSink, JsonLinesSink};
use tickgrid_scheduler::{Scheduler, StopSignal};

use crate::console::ConsoleSink;
use crate::prompt;

#[derive(Args)]
pub struct RunArgs {
    /// Initial number of workers.
    #[arg(short, long)]
    workers: Option<u32>,
    /// Number of ticks to simulate.
    #[arg(short, long)]
    ticks: Option<u64>,
    /// TOML config file. Flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,
    /// CSV log file.
    #[arg(long, default_value = "tickgrid.log")]
    log_file: PathBuf,
    /// Also write every snapshot as JSON lines to this file.
    #[arg(long)]
    snapshots: Option<PathBuf>,
    /// Print a status line every N ticks (0 disables).
    #[arg(long, default_value = "50")]
    summary_every: u64,
}

pub async fn run(args: RunArgs) -> anyhow::Result<()> {
    let file = match &args.config {
        Some(path) => ConfigFile::from_file(path)?,
        None => ConfigFile::default(),
    };
    let config = resolve_config(&args, file, &mut io::stdin().lock(), &mut io::stdout())?;
    config.validate()?;

    let mut sinks = FanoutSink::new().with(ConsoleSink::new(io::stdout(), args.summary_every));
    // A missing log file costs the CSV record, not the run.
    match CsvLogSink::create(&args.log_file) {
        Ok(csv) => sinks.push(csv),
        Err(e) => warn!(path = %args.log_file.display(), error = %e, "csv log unavailable"),
    }
    if let Some(path) = &args.snapshots {
        match File::create(path) {
            Ok(file) => sinks.push(JsonLinesSink::new(BufWriter::new(file))),
            Err(e) => warn!(path = %path.display(), error = %e, "snapshot file unavailable"),
        }
    }

    let mut scheduler = Scheduler::from_config(config)?;

    let stop = StopSignal::new();
    let on_ctrl_c = stop.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, stopping after the current tick");
            on_ctrl_c.stop();
        }
    });

    println!("\nStarting load balancer...\n");
    let summary = tokio::task::spawn_blocking(move || {
        scheduler.run_until_stopped(&mut sinks, &stop)
    })
    .await??;

    if summary.stopped_early {
        info!(ticks = summary.ticks_run, "run interrupted");
    }
    println!("\nLoad balancer completed.");
    Ok(())
}

/// Merge the config file, CLI flags, and prompts.
///
/// Flags override the file. A run parameter that neither supplies is asked
/// for on `input`.
fn resolve_config<R: BufRead, W: Write>(
    args: &RunArgs,
    mut file: ConfigFile,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<SimConfig> {
    if args.workers.is_some() {
        file.initial_workers = args.workers;
    }
    if args.ticks.is_some() {
        file.running_ticks = args.ticks;
    }
    if args.seed.is_some() {
        file.seed = args.seed;
    }

    if file.initial_workers.is_none() {
        file.initial_workers = Some(prompt::positive_integer(
            input,
            output,
            "Enter initial number of workers: ",
            "Number of workers must be a whole number of at least 1. Try again: ",
        )?);
    }
    if file.running_ticks.is_none() {
        file.running_ticks = Some(prompt::positive_integer(
            input,
            output,
            "Enter number of ticks to run: ",
            "Ticks must be a whole number of at least 1. Try again: ",
        )?);
    }
    Ok(file.into_config()?)
}
