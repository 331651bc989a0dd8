//! Adaptest CLI - Main Entry Point

use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{plan, run};

/// Adaptest - test harness for the adaptive API testing framework
#[derive(Parser)]
#[command(name = "adaptest")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full five-phase test sequence
    Run(run::RunArgs),

    /// Show the configured phase sequence without running it
    Plan(plan::PlanArgs),

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Run(args) => run::execute(args),
        Commands::Plan(args) => plan::execute(args),
        Commands::Version => {
            println!("Adaptest CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Test harness for the Adaptest adaptive API testing framework");
            Ok(())
        }
    }
}
