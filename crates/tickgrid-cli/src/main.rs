use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod console;
mod prompt;

#[derive(Parser)]
#[command(
    name = "tickgrid",
    about = "TickGrid — discrete-time request dispatcher simulation",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Log output format.
    #[arg(long, value_enum, default_value = "text", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation.
    ///
    /// Values missing from both the flags and --config are prompted for
    /// on stdin.
    Run(commands::run::RunArgs),
    /// Print the default configuration as TOML.
    Config {
        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format)?;

    match cli.command {
        Commands::Run(args) => commands::run::run(args).await,
        Commands::Config { output } => commands::config::print_default(output.as_deref()),
    }
}

fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
    Ok(())
}
