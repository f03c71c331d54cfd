// Command handlers module
pub mod bar;
pub mod monitor;
pub mod serve;
pub mod snapshot;

// Re-exports for cleaner imports
pub use bar::execute as bar;
pub use monitor::execute as monitor;
pub use serve::execute as serve;
pub use snapshot::execute as snapshot;

use std::time::Duration;

use clap::ArgMatches;

/// Read an optional millisecond argument as a `Duration`.
pub(crate) fn millis_arg(matches: &ArgMatches, name: &str) -> Option<Duration> {
    matches
        .get_one::<u64>(name)
        .map(|ms| Duration::from_millis(*ms))
}
