//! Run the five-phase test sequence

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::error;

use adaptest_harness::{Harness, HarnessConfig};

#[derive(Args)]
pub struct RunArgs {
    /// Path to the harness configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

pub fn execute(args: RunArgs) -> Result<()> {
    let config = match HarnessConfig::load_or_default(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            // The exit code stays 0 either way; the transcript is the report.
            error!("configuration error: {e}");
            return Ok(());
        }
    };

    Harness::new(config).run();
    Ok(())
}
