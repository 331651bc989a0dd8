//! Test phase execution

use colored::Colorize;
use std::process::Command;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// One externally-run test command in the fixed sequence.
#[derive(Debug, Clone)]
pub struct Phase {
    pub name: &'static str,
    pub program: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseStatus {
    /// Command ran and exited zero
    Passed,
    /// Command ran and exited nonzero
    Failed,
    /// Command could not be run at all
    Error,
}

/// Observed result of one phase
#[derive(Debug, Clone)]
pub struct PhaseOutcome {
    pub phase: &'static str,
    pub status: PhaseStatus,
    pub exit_code: Option<i32>,
    pub duration: Duration,
    pub detail: Option<String>,
}

impl Phase {
    pub fn new(name: &'static str, program: String, args: Vec<String>) -> Self {
        Self { name, program, args }
    }

    /// The command as the operator would type it.
    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }

    /// Run the phase command with inherited stdio and capture its exit
    /// status. Launch failures become an outcome, never an error.
    pub fn run(&self) -> PhaseOutcome {
        debug!("Running phase '{}': {}", self.name, self.command_line());
        let start = Instant::now();

        let status = Command::new(&self.program).args(&self.args).status();
        let duration = start.elapsed();

        match status {
            Ok(status) if status.success() => PhaseOutcome {
                phase: self.name,
                status: PhaseStatus::Passed,
                exit_code: status.code(),
                duration,
                detail: None,
            },
            Ok(status) => PhaseOutcome {
                phase: self.name,
                status: PhaseStatus::Failed,
                exit_code: status.code(),
                duration,
                detail: None,
            },
            Err(e) => {
                warn!("phase '{}' could not run: {}", self.name, e);
                PhaseOutcome {
                    phase: self.name,
                    status: PhaseStatus::Error,
                    exit_code: None,
                    duration,
                    detail: Some(e.to_string()),
                }
            }
        }
    }
}

impl PhaseOutcome {
    /// Print the colored status line for this phase.
    pub fn announce(&self) {
        let secs = self.duration.as_secs_f64();
        match self.status {
            PhaseStatus::Passed => {
                println!("{}  {} suite passed ({:.1}s)", "PASS".green().bold(), self.phase, secs);
            }
            PhaseStatus::Failed => {
                let code = self
                    .exit_code
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "signal".to_string());
                println!(
                    "{}  {} suite failed (exit code {}, {:.1}s)",
                    "FAIL".red().bold(),
                    self.phase,
                    code,
                    secs
                );
            }
            PhaseStatus::Error => {
                println!(
                    "{}  {} suite could not run: {}",
                    "ERROR".yellow().bold(),
                    self.phase,
                    self.detail.as_deref().unwrap_or("unknown error")
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_joins_program_and_args() {
        let phase = Phase::new(
            "unit",
            "pytest".to_string(),
            vec!["test_error_handling.py".to_string(), "-v".to_string()],
        );
        assert_eq!(phase.command_line(), "pytest test_error_handling.py -v");
    }

    #[cfg(unix)]
    #[test]
    fn zero_exit_is_a_pass() {
        let phase = Phase::new("unit", "true".to_string(), vec![]);
        let outcome = phase.run();
        assert_eq!(outcome.status, PhaseStatus::Passed);
        assert_eq!(outcome.exit_code, Some(0));
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_a_failure_with_the_code() {
        let phase = Phase::new("integration", "false".to_string(), vec![]);
        let outcome = phase.run();
        assert_eq!(outcome.status, PhaseStatus::Failed);
        assert_eq!(outcome.exit_code, Some(1));
    }

    #[test]
    fn unlaunchable_command_is_an_error_not_a_panic() {
        let phase = Phase::new("stress", "definitely-not-a-real-binary".to_string(), vec![]);
        let outcome = phase.run();
        assert_eq!(outcome.status, PhaseStatus::Error);
        assert!(outcome.detail.is_some());
    }
}
