use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::core::system_monitor::{Aggregator, DEFAULT_PROBE_BUDGET};

/// Collect one snapshot locally and print it as JSON.
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let aggregator = Aggregator::with_system_probes(DEFAULT_PROBE_BUDGET);

    // CPU usage needs two refreshes spaced by the minimum interval
    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    let snapshot = aggregator.collect();

    let json = if matches.get_flag("pretty") {
        serde_json::to_string_pretty(&snapshot)
    } else {
        serde_json::to_string(&snapshot)
    }
    .context("Failed to serialize snapshot")?;

    println!("{}", json);
    Ok(())
}
