//! Raw probe output, in source units, before normalization.

use serde::{Deserialize, Serialize};

/// A temperature sensor as reported by the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSensor {
    pub group: String,
    pub label: String,
    pub current_celsius: f32,
    pub high_celsius: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuReading {
    pub usage_percent: f32,
    pub model: Option<String>,
    pub core_count: usize,
    pub sensors: Vec<RawSensor>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryReading {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub available_bytes: u64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum GpuVendor {
    Nvidia,
    Amd,
    Intel,
    #[default]
    Unknown,
}

impl GpuVendor {
    pub fn display_name(self) -> &'static str {
        match self {
            GpuVendor::Nvidia => "NVIDIA",
            GpuVendor::Amd => "AMD",
            GpuVendor::Intel => "Intel",
            GpuVendor::Unknown => "Unknown vendor",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GpuReading {
    pub vendor: GpuVendor,
    pub name: String,
    pub utilization_percent: f32,
    pub memory_used_bytes: Option<u64>,
    pub memory_total_bytes: Option<u64>,
    pub temperature_celsius: Option<f32>,
    pub fan_speed_percent: Option<u32>,
    pub power_draw_watts: Option<f32>,
    pub power_limit_watts: Option<f32>,
    pub clock_graphics_mhz: Option<u32>,
    pub clock_memory_mhz: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiskReading {
    pub device: String,
    pub mountpoint: String,
    pub fs_type: String,
    pub total_bytes: u64,
    pub available_bytes: u64,
    pub model: String,
}

impl DiskReading {
    pub fn used_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.available_bytes)
    }
}

/// Output of a single probe.
#[derive(Debug, Clone, PartialEq)]
pub enum Reading {
    Cpu(CpuReading),
    Memory(MemoryReading),
    /// Every device of the selected GPU backend.
    Gpu(Vec<GpuReading>),
    /// Every monitored partition.
    Disks(Vec<DiskReading>),
}
