//! Harness configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::HarnessResult;
use crate::phase::Phase;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "harness.toml";

/// Harness configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Mock API server configuration
    pub server: ServerConfig,

    /// Test suite configuration
    pub suites: SuitesConfig,

    /// End-to-end target program configuration
    pub target: TargetConfig,
}

/// Configuration for spawning the mock API server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Path to the mock server binary
    pub command: PathBuf,

    /// Extra arguments passed to the mock server
    pub args: Vec<String>,

    /// Port the mock server listens on
    pub port: u16,

    /// Fixed delay to wait after spawning before the server is assumed ready
    pub startup_delay_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            command: PathBuf::from("target/debug/adaptest-mock"),
            args: Vec::new(),
            port: 5000,
            startup_delay_secs: 3,
        }
    }
}

impl ServerConfig {
    pub fn startup_delay(&self) -> Duration {
        Duration::from_secs(self.startup_delay_secs)
    }
}

/// The external test-runner tool and the four suite files it is run against
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuitesConfig {
    /// Test runner command
    pub runner: String,

    /// Flags appended after the suite file
    pub flags: Vec<String>,

    pub unit: PathBuf,
    pub integration: PathBuf,
    pub stress: PathBuf,
    pub logging: PathBuf,
}

impl Default for SuitesConfig {
    fn default() -> Self {
        Self {
            runner: "pytest".to_string(),
            flags: vec!["-v".to_string()],
            unit: PathBuf::from("test_error_handling.py"),
            integration: PathBuf::from("test_integration_failures.py"),
            stress: PathBuf::from("test_stress_and_performance.py"),
            logging: PathBuf::from("test_logging_validation.py"),
        }
    }
}

/// The program exercised by the end-to-end phase
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Program to run
    pub program: String,

    /// Arguments passed to the program
    pub args: Vec<String>,

    /// Specification file used by the valid-input run
    pub spec_path: PathBuf,

    /// Path used by the missing-input run; must not exist
    pub missing_spec_path: PathBuf,

    /// Attempt bound set for every end-to-end run
    pub max_attempts: u32,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            program: "python".to_string(),
            args: vec!["main.py".to_string()],
            spec_path: PathBuf::from("specs/spec_flawed.yaml"),
            missing_spec_path: PathBuf::from("nonexistent/spec.yaml"),
            max_attempts: 3,
        }
    }
}

impl HarnessConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> HarnessResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load from an explicit path, from `harness.toml` in the working
    /// directory, or fall back to the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> HarnessResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// The four suite phases in their fixed run order.
    pub fn suite_phases(&self) -> [Phase; 4] {
        [
            self.suite_phase("unit", &self.suites.unit),
            self.suite_phase("integration", &self.suites.integration),
            self.suite_phase("stress", &self.suites.stress),
            self.suite_phase("logging", &self.suites.logging),
        ]
    }

    fn suite_phase(&self, name: &'static str, file: &Path) -> Phase {
        let mut args = vec![file.to_string_lossy().into_owned()];
        args.extend(self.suites.flags.iter().cloned());
        Phase::new(name, self.suites.runner.clone(), args)
    }
}
