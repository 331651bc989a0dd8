//! Mock server lifecycle - spawning and terminating the fixture API process

use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::Duration;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{HarnessError, HarnessResult};

/// Environment variable carrying the listen port to the mock server.
pub const ENV_MOCK_PORT: &str = "ADAPTEST_MOCK_PORT";

/// Handle to the running mock server process
pub struct MockServerHandle {
    child: Child,
    port: u16,
}

impl MockServerHandle {
    /// Spawn the mock server and wait the fixed startup delay. Readiness is
    /// not probed; the delay is the only synchronization.
    pub fn spawn(config: &ServerConfig) -> HarnessResult<Self> {
        info!("Spawning mock API server on port {}", config.port);

        let mut cmd = Command::new(&config.command);
        cmd.args(&config.args)
            .env(ENV_MOCK_PORT, config.port.to_string())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let child = cmd.spawn().map_err(|e| {
            HarnessError::ServerStartup(format!(
                "failed to spawn {}: {}",
                config.command.display(),
                e
            ))
        })?;

        let handle = MockServerHandle {
            child,
            port: config.port,
        };

        thread::sleep(config.startup_delay());
        info!(
            "Mock server assumed ready at http://127.0.0.1:{}",
            handle.port
        );
        Ok(handle)
    }

    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    /// Stop the mock server: SIGTERM first, then force kill.
    pub fn stop(&mut self) -> HarnessResult<()> {
        info!("Stopping mock server (pid: {})", self.child.id());

        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            let pid = Pid::from_raw(self.child.id() as i32);
            if kill(pid, Signal::SIGTERM).is_ok() {
                thread::sleep(Duration::from_millis(500));
            }
        }

        let _ = self.child.kill();
        let _ = self.child.wait();
        Ok(())
    }
}

impl Drop for MockServerHandle {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
