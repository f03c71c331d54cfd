//! Hardware telemetry core.
//!
//! Probes read raw values from the platform, normalization turns them into the
//! stable [`Snapshot`] schema and the [`Aggregator`] merges one snapshot per
//! request. History and status classification are used by the clients.

mod aggregator;
mod gpu;
mod history;
mod metrics;
pub mod normalize;
pub mod probes;
pub mod readings;
mod status;

pub use aggregator::{Aggregator, DEFAULT_PROBE_BUDGET};
pub use gpu::{GpuProvider, GpuVendor};
pub use history::{sparkline_points, HistoryStore, DEFAULT_HISTORY_SIZE};
pub use metrics::{
    format_number, ComponentKind, CpuMetrics, DiskMetrics, GpuMetrics, MetricValue, RamMetrics,
    SensorGroups, SensorReading, Snapshot,
};
pub use probes::{Capability, Probe};
pub use readings::Reading;
pub use status::{
    classify, component_status, overall_status, Status, CRITICAL_THRESHOLD, WARNING_THRESHOLD,
};

#[cfg(test)]
pub(crate) use metrics::fixtures;
