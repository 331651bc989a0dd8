//! The fixed five-phase sequence with guaranteed cleanup

use colored::Colorize;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::config::HarnessConfig;
use crate::phase::{PhaseOutcome, PhaseStatus};
use crate::scenario::{self, Scenario};
use crate::server::MockServerHandle;

/// Orchestrates one full harness run.
pub struct Harness {
    config: HarnessConfig,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    /// Execute the whole sequence: spawn the mock server, run the four test
    /// suites, run the three end-to-end scenarios, then tear everything
    /// down. Failures inside any phase are printed and never escape; no
    /// phase stops the ones after it. Returns the per-phase outcomes in run
    /// order.
    pub fn run(&self) -> Vec<PhaseOutcome> {
        println!("{}", "Adaptest test harness".bold());

        let mut server = match MockServerHandle::spawn(&self.config.server) {
            Ok(server) => Some(server),
            Err(e) => {
                println!("{}  mock server: {}", "ERROR".yellow().bold(), e);
                error!("mock server startup failed: {e}");
                None
            }
        };

        let mut outcomes = Vec::with_capacity(5);

        for phase in self.config.suite_phases() {
            let outcome = phase.run();
            outcome.announce();
            outcomes.push(outcome);
        }

        outcomes.push(self.run_e2e_phase());

        if let Some(server) = server.as_mut() {
            if let Err(e) = server.stop() {
                warn!("mock server shutdown: {e}");
            }
        }
        drop(server);
        scenario::clear_env();

        info!("harness run complete");
        outcomes
    }

    /// Phase five: three runs of the target program under different
    /// environment configurations. Exit codes are reported, not judged.
    fn run_e2e_phase(&self) -> PhaseOutcome {
        let start = Instant::now();
        let mut detail = None;

        for scenario in Scenario::ALL {
            if let Err(e) = scenario::run_scenario(scenario, &self.config.target) {
                println!(
                    "{}   {}: {}",
                    "E2E".cyan().bold(),
                    scenario.label(),
                    e
                );
                warn!("e2e scenario '{}': {}", scenario.label(), e);
                detail = Some(e.to_string());
            }
        }

        PhaseOutcome {
            phase: "e2e",
            status: if detail.is_none() {
                PhaseStatus::Passed
            } else {
                PhaseStatus::Error
            },
            exit_code: None,
            duration: start.elapsed(),
            detail,
        }
    }
}
