// hwpulse Library - Public API

// Re-export error types
pub mod error;
pub use error::{HwError, Result};

// Module declarations
pub mod client;
pub mod commands;
pub mod core;
pub mod platform;
pub mod server;
pub mod ui;

// Re-export commonly used types
pub use core::config::Config;
pub use core::system_monitor::{Aggregator, Snapshot};

/// Initialize logging; `RUST_LOG` overrides `default_level`.
///
/// Safe to call more than once: later calls are ignored.
pub fn init_logging(default_level: log::LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .try_init();
}
