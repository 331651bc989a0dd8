//! Adaptest mock API server
//!
//! A local stand-in for the real service so end-to-end runs never depend on
//! anything external. The harness spawns this binary and passes the listen
//! port through `ADAPTEST_MOCK_PORT`.

mod rate_limit;
mod server;
mod validate;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_PORT: u16 = 5000;

fn port_from_env() -> u16 {
    std::env::var("ADAPTEST_MOCK_PORT")
        .ok()
        .and_then(|v| v.trim().parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let addr = format!("127.0.0.1:{}", port_from_env());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("Mock API listening on http://{addr}");
    axum::serve(listener, server::router())
        .await
        .context("server error")?;

    Ok(())
}
