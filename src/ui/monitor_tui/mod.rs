//! Terminal dashboard for the snapshot server.
//!
//! Cards with gauges and history bars, a modal detail view, driven by the
//! client poll loop.

mod app;
mod event_handler;
mod render;
mod widgets;

pub use app::{move_selection, run_monitor_app, MonitorApp, MonitorAppConfig};
pub use event_handler::{map_key, Direction, MonitorEvent};
