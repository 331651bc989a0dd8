//! End-to-end scenarios - env-configured runs of the target program

use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;
use std::time::Instant;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::config::TargetConfig;
use crate::error::{HarnessError, HarnessResult};

/// Environment variable naming the specification file the target reads.
pub const ENV_SPEC_PATH: &str = "SPEC_PATH";

/// Environment variable bounding the target's learning attempts.
pub const ENV_MAX_ATTEMPTS: &str = "MAX_LEARNING_ATTEMPTS";

/// Content of the malformed-input fixture. Must not parse as YAML.
const MALFORMED_SPEC: &str = "openapi: [3.0.0\npaths:\n  /users:\n    post: {unterminated\n";

/// The three fixed end-to-end runs, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Spec path points at the configured existing specification
    ValidSpec,
    /// Spec path points at a file that does not exist
    MissingSpec,
    /// Spec path points at a temporary file of invalid YAML
    MalformedSpec,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [
        Scenario::ValidSpec,
        Scenario::MissingSpec,
        Scenario::MalformedSpec,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Scenario::ValidSpec => "valid spec",
            Scenario::MissingSpec => "missing spec file",
            Scenario::MalformedSpec => "malformed spec file",
        }
    }
}

/// Guard over the two harness environment variables. Construction sets them
/// process-wide so child processes inherit them; drop removes both and
/// deletes the malformed fixture if one was written.
pub struct ScenarioEnv {
    spec_path: PathBuf,
    _fixture: Option<NamedTempFile>,
}

impl ScenarioEnv {
    pub fn apply(scenario: Scenario, config: &TargetConfig) -> HarnessResult<Self> {
        let (spec_path, fixture) = match scenario {
            Scenario::ValidSpec => (config.spec_path.clone(), None),
            Scenario::MissingSpec => (config.missing_spec_path.clone(), None),
            Scenario::MalformedSpec => {
                let mut file = tempfile::Builder::new()
                    .prefix("malformed-spec-")
                    .suffix(".yaml")
                    .tempfile()?;
                file.write_all(MALFORMED_SPEC.as_bytes())?;
                let path = file.path().to_path_buf();
                (path, Some(file))
            }
        };

        std::env::set_var(ENV_SPEC_PATH, &spec_path);
        std::env::set_var(ENV_MAX_ATTEMPTS, config.max_attempts.to_string());
        debug!(
            "{}={} {}={}",
            ENV_SPEC_PATH,
            spec_path.display(),
            ENV_MAX_ATTEMPTS,
            config.max_attempts
        );

        Ok(ScenarioEnv {
            spec_path,
            _fixture: fixture,
        })
    }

    pub fn spec_path(&self) -> &PathBuf {
        &self.spec_path
    }
}

impl Drop for ScenarioEnv {
    fn drop(&mut self) {
        clear_env();
    }
}

/// Remove both harness environment variables.
pub fn clear_env() {
    std::env::remove_var(ENV_SPEC_PATH);
    std::env::remove_var(ENV_MAX_ATTEMPTS);
}

/// Run the target program once under the scenario's environment and report
/// its exit status. The status is printed, not asserted on; only a failure
/// to launch the target at all is an error.
pub fn run_scenario(scenario: Scenario, config: &TargetConfig) -> HarnessResult<()> {
    let _env = ScenarioEnv::apply(scenario, config)?;

    info!("e2e scenario: {}", scenario.label());
    let start = Instant::now();
    let status = Command::new(&config.program)
        .args(&config.args)
        .status()
        .map_err(|e| HarnessError::Launch {
            command: config.program.clone(),
            source: e,
        })?;

    let secs = start.elapsed().as_secs_f64();
    match status.code() {
        Some(code) => println!(
            "{}   {}: target exited with code {} ({:.1}s)",
            "E2E".cyan().bold(),
            scenario.label(),
            code,
            secs
        ),
        None => println!(
            "{}   {}: target terminated by signal ({:.1}s)",
            "E2E".cyan().bold(),
            scenario.label(),
            secs
        ),
    }
    Ok(())
}
