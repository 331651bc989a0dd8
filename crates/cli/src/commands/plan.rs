//! Show the configured phase sequence

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use adaptest_harness::HarnessConfig;

use crate::output::{print_table, TableDisplay};

#[derive(Args)]
pub struct PlanArgs {
    /// Path to the harness configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

struct PhaseRow {
    phase: String,
    command: String,
}

impl TableDisplay for PhaseRow {
    fn headers() -> Vec<&'static str> {
        vec!["Phase", "Command"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.phase.clone(), self.command.clone()]
    }
}

pub fn execute(args: PlanArgs) -> Result<()> {
    let config = HarnessConfig::load_or_default(args.config.as_deref())?;

    println!("{}", "Planned phase sequence".bold());

    let mut rows: Vec<PhaseRow> = config
        .suite_phases()
        .iter()
        .map(|phase| PhaseRow {
            phase: phase.name.to_string(),
            command: phase.command_line(),
        })
        .collect();

    let target = &config.target;
    let mut target_line = target.program.clone();
    if !target.args.is_empty() {
        target_line.push(' ');
        target_line.push_str(&target.args.join(" "));
    }
    rows.push(PhaseRow {
        phase: "e2e".to_string(),
        command: format!("{target_line} (3 runs: valid, missing, malformed spec)"),
    });

    print_table(&rows);
    Ok(())
}
