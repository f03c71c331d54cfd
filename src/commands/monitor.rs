//! Monitor command handler.
//!
//! Runs the terminal dashboard against a snapshot server.

use anyhow::{Context, Result};
use clap::ArgMatches;

use super::millis_arg;
use crate::core::config::{Config, Layout, PollConfig};
use crate::ui::monitor_tui::{run_monitor_app, MonitorAppConfig};

/// Execute the monitor command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config_path = Config::get_config_path().ok();
    let config = match &config_path {
        Some(path) => Config::load_from(path).unwrap_or_else(|e| {
            log::warn!("Using default preferences: {:#}", e);
            Config::default()
        }),
        None => Config::default(),
    };

    let server_url = matches
        .get_one::<String>("url")
        .cloned()
        .unwrap_or_else(|| config.server_url().to_string());

    let mut poll = PollConfig::default();
    if let Some(floor) = millis_arg(matches, "floor") {
        poll.floor = floor;
    }
    if let Some(ceiling) = millis_arg(matches, "ceiling") {
        poll.ceiling = ceiling;
    }
    if let Some(timeout) = millis_arg(matches, "timeout") {
        poll.request_timeout = timeout;
    }

    let layout = if matches.get_flag("list") {
        Layout::List
    } else {
        config.layout
    };

    let app_config = MonitorAppConfig {
        server_url,
        poll,
        layout,
        config_path,
    };

    run_monitor_app(app_config).context("Failed to run hardware monitor")
}
