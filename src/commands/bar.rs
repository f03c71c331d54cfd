//! Status-bar command handler.
//!
//! Prints one JSON object per line for bars that run a custom module
//! (`text`, `tooltip`, `class`, `percentage`).

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ArgMatches;

use super::millis_arg;
use crate::core::system_monitor::{Aggregator, DEFAULT_PROBE_BUDGET};
use crate::ui::status_bar::BarOutput;

const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Execute the bar command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let interval = millis_arg(matches, "interval").unwrap_or(DEFAULT_INTERVAL);
    let once = matches.get_flag("once");

    let aggregator = Aggregator::with_system_probes(DEFAULT_PROBE_BUDGET);
    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);

    let stdout = io::stdout();
    loop {
        let output = BarOutput::from_snapshot(&aggregator.collect());
        let line = serde_json::to_string(&output).unwrap_or_else(|e| {
            log::error!("Failed to serialize bar output: {}", e);
            serde_json::to_string(&BarOutput::error(&e.to_string())).unwrap_or_default()
        });

        let mut handle = stdout.lock();
        writeln!(handle, "{}", line).context("Failed to write to stdout")?;
        handle.flush().context("Failed to flush stdout")?;
        drop(handle);

        if once {
            return Ok(());
        }
        std::thread::sleep(interval);
    }
}
