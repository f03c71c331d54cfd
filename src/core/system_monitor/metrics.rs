//! Normalized snapshot schema served by `GET /api/hwinfo`.
//!
//! Field names here are the wire contract. Vendor-specific readings never
//! reach this module directly; they go through [`super::normalize`] first.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HwError, Result};

/// The four card-level components of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Cpu,
    Ram,
    Gpu,
    Disk,
}

impl ComponentKind {
    /// Display order of the cards.
    pub const ALL: [ComponentKind; 4] = [
        ComponentKind::Cpu,
        ComponentKind::Ram,
        ComponentKind::Gpu,
        ComponentKind::Disk,
    ];

    /// Key used in the JSON payload and in the history store.
    pub fn key(self) -> &'static str {
        match self {
            ComponentKind::Cpu => "cpu",
            ComponentKind::Ram => "ram",
            ComponentKind::Gpu => "gpu",
            ComponentKind::Disk => "disk",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ComponentKind::Cpu => "CPU",
            ComponentKind::Ram => "Memory",
            ComponentKind::Gpu => "GPU",
            ComponentKind::Disk => "Disk",
        }
    }

    pub fn index(self) -> usize {
        match self {
            ComponentKind::Cpu => 0,
            ComponentKind::Ram => 1,
            ComponentKind::Gpu => 2,
            ComponentKind::Disk => 3,
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A display value: either a number or preformatted text such as `"7.81GB / 15.52GB"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) => Some(*n),
            MetricValue::Text(_) => None,
        }
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Number(value)
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        MetricValue::Text(value)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(n) => f.write_str(&format_number(*n)),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

/// Format a number with at most two decimals and no trailing zeros.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// One raw reading inside a sensor group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub label: String,
    pub current: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
}

/// Sensor-group name → readings in source order.
pub type SensorGroups = BTreeMap<String, Vec<SensorReading>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuMetrics {
    pub raw_usage: f64,
    pub main_metric: MetricValue,
    pub main_metric_label: String,
    pub label_name: String,
    pub label_value: Option<MetricValue>,
    pub model: String,
    /// Logical cores.
    #[serde(default)]
    pub cores: usize,
    #[serde(default)]
    pub sensors: SensorGroups,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RamMetrics {
    pub raw_percent: f64,
    pub main_metric: MetricValue,
    pub main_metric_label: String,
    pub label_name: String,
    pub label_value: Option<MetricValue>,
    pub details: String,
    /// Memory available to new processes, e.g. `"12GB"`.
    #[serde(default)]
    pub available: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuMetrics {
    pub name: String,
    pub raw_usage: f64,
    pub main_metric: MetricValue,
    pub main_metric_label: String,
    pub label_name: String,
    pub label_value: Option<MetricValue>,
    pub model: String,
    #[serde(default)]
    pub sensors: SensorGroups,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskMetrics {
    /// Usage percent of the partition.
    pub main_metric: f64,
    pub main_metric_label: String,
    pub label_name: String,
    pub label_value: Option<MetricValue>,
    pub model: String,
    #[serde(default)]
    pub device: String,
    #[serde(default)]
    pub mountpoint: String,
    #[serde(default)]
    pub fstype: String,
}

/// Complete point-in-time reading of every component.
///
/// `gpu` serializes as `null` when no supported GPU backend was found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub timestamp: i64,
    pub cpu: CpuMetrics,
    pub ram: RamMetrics,
    pub gpu: Option<GpuMetrics>,
    pub disk: DiskMetrics,
    #[serde(default)]
    pub gpus: Vec<GpuMetrics>,
    #[serde(default)]
    pub disks: Vec<DiskMetrics>,
}

impl Snapshot {
    /// Decode and validate a payload from the snapshot endpoint.
    ///
    /// A body that is not JSON, misses a top-level component, or breaks the
    /// schema invariants is reported as a malformed payload.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_slice(body)
            .map_err(|e| HwError::malformed_payload(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Numeric value used for progress bars and history, if the component is present.
    pub fn display_value(&self, kind: ComponentKind) -> Option<f64> {
        match kind {
            ComponentKind::Cpu => Some(self.cpu.raw_usage),
            ComponentKind::Ram => Some(self.ram.raw_percent),
            ComponentKind::Gpu => self.gpu.as_ref().map(|g| g.raw_usage),
            ComponentKind::Disk => Some(self.disk.main_metric),
        }
    }

    pub fn has_component(&self, kind: ComponentKind) -> bool {
        kind != ComponentKind::Gpu || self.gpu.is_some()
    }

    /// Check the schema completeness invariants.
    pub fn validate(&self) -> Result<()> {
        check_percent("cpu.raw_usage", self.cpu.raw_usage)?;
        check_label("cpu.main_metric_label", &self.cpu.main_metric_label)?;
        check_label("cpu.label_name", &self.cpu.label_name)?;

        check_percent("ram.raw_percent", self.ram.raw_percent)?;
        check_label("ram.main_metric_label", &self.ram.main_metric_label)?;
        check_label("ram.label_name", &self.ram.label_name)?;

        if let Some(gpu) = &self.gpu {
            check_percent("gpu.raw_usage", gpu.raw_usage)?;
            check_label("gpu.name", &gpu.name)?;
            check_label("gpu.main_metric_label", &gpu.main_metric_label)?;
            check_label("gpu.label_name", &gpu.label_name)?;
        }

        check_percent("disk.main_metric", self.disk.main_metric)?;
        check_label("disk.main_metric_label", &self.disk.main_metric_label)?;
        check_label("disk.label_name", &self.disk.label_name)?;

        Ok(())
    }
}

fn check_percent(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(HwError::invalid_snapshot(format!(
            "{} must be a percentage, got {}",
            field, value
        )))
    }
}

fn check_label(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(HwError::invalid_snapshot(format!("{} is empty", field)))
    } else {
        Ok(())
    }
}
