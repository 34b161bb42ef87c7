//! Battle simulator
//!
//! Runs battle scenarios through the engine and inspects saved records.
//! Run with: `battle-sim <command>`

mod commands;
mod report;

use anyhow::Result;
use clap::Parser;
use commands::{Inspect, Run};

/// Battle simulator
#[derive(Parser)]
#[command(name = "battle-sim")]
#[command(about = "Resolve fleet battles from scenario files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run one or more scenarios and report the outcome
    Run(Run),

    /// Print a saved battle record
    Inspect(Inspect),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run(cmd) => cmd.execute().await,
        Command::Inspect(cmd) => cmd.execute(),
    }
}
