//! Snapshot server command handler.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::ArgMatches;

use super::millis_arg;
use crate::core::config::ServerConfig;
use crate::server;

/// Execute the serve command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let mut config = ServerConfig::default();

    if let Some(bind) = matches.get_one::<SocketAddr>("bind") {
        config.bind = *bind;
    }
    if let Some(timeout) = millis_arg(matches, "probe-timeout") {
        config.probe_timeout = timeout;
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("hwpulse-server")
        .build()
        .context("Failed to start async runtime")?;

    runtime
        .block_on(server::run(config))
        .context("Snapshot server failed")
}
