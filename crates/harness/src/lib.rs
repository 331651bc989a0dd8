//! Adaptest test harness
//!
//! Sequences the framework's test suites against a locally spawned mock API
//! process, managing process lifetime and environment variables around each
//! phase. A run is a fixed five-step sequence:
//!
//! 1. unit, integration, stress, and logging suites, each one external
//!    test-runner command whose exit status becomes a colored pass/fail line
//! 2. three end-to-end runs of the target program with `SPEC_PATH` pointed
//!    at a valid, a missing, and a malformed specification file
//!
//! No phase stops the ones after it, no pass/fail counts are aggregated, and
//! the mock server and environment variables are always cleaned up at the
//! end, whatever failed in between. The transcript is the report.

pub mod config;
pub mod error;
pub mod phase;
pub mod runner;
pub mod scenario;
pub mod server;

pub use config::HarnessConfig;
pub use error::{HarnessError, HarnessResult};
pub use phase::{Phase, PhaseOutcome, PhaseStatus};
pub use runner::Harness;
