//! Integration assertions over a full harness run
//!
//! These exercise the cleanup discipline: the mock server must be gone and
//! the environment variables unset after a run, whatever failed mid-way.

#![cfg(unix)]

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use tempfile::TempDir;

use adaptest_harness::config::{HarnessConfig, ServerConfig, SuitesConfig, TargetConfig};
use adaptest_harness::scenario::{ENV_MAX_ATTEMPTS, ENV_SPEC_PATH};
use adaptest_harness::{Harness, PhaseStatus};

// Runs mutate process-global environment variables; serialize them.
static RUN_LOCK: Mutex<()> = Mutex::new(());

fn write_script(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, body).unwrap();
    path
}

/// A config whose every external command is a small shell script, with the
/// mock server writing its pid to a file so the test can probe it later.
fn test_config(dir: &TempDir, integration_body: &str) -> (HarnessConfig, PathBuf) {
    let pidfile = dir.path().join("mock.pid");
    let spec = write_script(dir, "spec.yaml", "openapi: 3.0.0\n");

    let config = HarnessConfig {
        server: ServerConfig {
            command: PathBuf::from("sh"),
            args: vec![
                "-c".to_string(),
                format!("echo $$ > {}; exec sleep 30", pidfile.display()),
            ],
            port: 5998,
            startup_delay_secs: 0,
        },
        suites: SuitesConfig {
            runner: "sh".to_string(),
            flags: Vec::new(),
            unit: write_script(dir, "unit.sh", "exit 0\n"),
            integration: write_script(dir, "integration.sh", integration_body),
            stress: write_script(dir, "stress.sh", "exit 0\n"),
            logging: write_script(dir, "logging.sh", "exit 0\n"),
        },
        target: TargetConfig {
            program: "true".to_string(),
            args: Vec::new(),
            spec_path: spec,
            missing_spec_path: dir.path().join("missing.yaml"),
            max_attempts: 3,
        },
    };

    (config, pidfile)
}

fn probe_alive(pid: i32) -> bool {
    use nix::sys::signal::kill;
    use nix::unistd::Pid;
    kill(Pid::from_raw(pid), None).is_ok()
}

#[test]
fn failing_suite_does_not_stop_later_phases() {
    let _guard = RUN_LOCK.lock().unwrap();
    let dir = TempDir::new().unwrap();
    let (config, _pidfile) = test_config(&dir, "exit 1\n");

    let outcomes = Harness::new(config).run();

    assert_eq!(outcomes.len(), 5);
    assert_eq!(outcomes[0].status, PhaseStatus::Passed);
    assert_eq!(outcomes[1].status, PhaseStatus::Failed);
    assert_eq!(outcomes[1].exit_code, Some(1));
    // everything after the failure still ran
    assert_eq!(outcomes[2].status, PhaseStatus::Passed);
    assert_eq!(outcomes[3].status, PhaseStatus::Passed);
    assert_eq!(outcomes[4].phase, "e2e");
    assert_eq!(outcomes[4].status, PhaseStatus::Passed);
}

#[test]
fn mock_server_is_terminated_even_when_a_suite_fails() {
    let _guard = RUN_LOCK.lock().unwrap();
    let dir = TempDir::new().unwrap();
    let (config, pidfile) = test_config(&dir, "exit 1\n");

    Harness::new(config).run();

    let pid: i32 = fs::read_to_string(&pidfile)
        .expect("mock server never started")
        .trim()
        .parse()
        .unwrap();
    assert!(!probe_alive(pid), "mock server pid {pid} still alive after run");
}

#[test]
fn environment_variables_are_unset_after_the_run() {
    let _guard = RUN_LOCK.lock().unwrap();
    let dir = TempDir::new().unwrap();
    let (config, _pidfile) = test_config(&dir, "exit 1\n");

    Harness::new(config).run();

    assert!(std::env::var(ENV_SPEC_PATH).is_err());
    assert!(std::env::var(ENV_MAX_ATTEMPTS).is_err());
}

#[test]
fn unlaunchable_suite_and_server_still_leave_a_clean_environment() {
    let _guard = RUN_LOCK.lock().unwrap();
    let dir = TempDir::new().unwrap();
    let (mut config, _pidfile) = test_config(&dir, "exit 0\n");
    config.server.command = PathBuf::from("definitely-not-a-real-binary");
    config.suites.runner = "also-not-a-real-binary".to_string();

    let outcomes = Harness::new(config).run();

    assert_eq!(outcomes.len(), 5);
    for outcome in &outcomes[..4] {
        assert_eq!(outcome.status, PhaseStatus::Error);
    }
    assert!(std::env::var(ENV_SPEC_PATH).is_err());
    assert!(std::env::var(ENV_MAX_ATTEMPTS).is_err());
}
