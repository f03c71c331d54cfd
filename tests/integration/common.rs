//! Fake probes and payloads shared by the integration tests.

use std::time::Duration;

use hwpulse::core::system_monitor::readings::{
    CpuReading, DiskReading, GpuReading, GpuVendor, MemoryReading, RawSensor, Reading,
};
use hwpulse::core::system_monitor::{Aggregator, ComponentKind, Probe};
use hwpulse::error::{HwError, Result};

pub const GB: u64 = 1024 * 1024 * 1024;

pub struct FixedProbe {
    kind: ComponentKind,
    reading: Option<Reading>,
}

impl Probe for FixedProbe {
    fn kind(&self) -> ComponentKind {
        self.kind
    }

    fn sample(&mut self) -> Result<Reading> {
        self.reading
            .clone()
            .ok_or_else(|| HwError::probe_unavailable(format!("{} not present", self.kind)))
    }
}

pub fn fixed(kind: ComponentKind, reading: Option<Reading>) -> Box<dyn Probe> {
    Box::new(FixedProbe { kind, reading })
}

pub fn cpu(usage: f32) -> Reading {
    Reading::Cpu(CpuReading {
        usage_percent: usage,
        model: Some("AMD Ryzen 7 5800X 8-Core Processor".to_string()),
        core_count: 16,
        sensors: vec![
            RawSensor {
                group: "k10temp".to_string(),
                label: "Tctl".to_string(),
                current_celsius: 48.5,
                high_celsius: Some(95.0),
            },
            RawSensor {
                group: "nvme".to_string(),
                label: "Composite".to_string(),
                current_celsius: 38.0,
                high_celsius: None,
            },
        ],
    })
}

pub fn memory(used_gb: u64, total_gb: u64) -> Reading {
    Reading::Memory(MemoryReading {
        total_bytes: total_gb * GB,
        used_bytes: used_gb * GB,
        available_bytes: (total_gb - used_gb) * GB,
    })
}

pub fn gpu(usage: f32) -> Reading {
    Reading::Gpu(vec![GpuReading {
        vendor: GpuVendor::Nvidia,
        name: "NVIDIA GeForce RTX 3070".to_string(),
        utilization_percent: usage,
        memory_used_bytes: Some(2 * GB),
        memory_total_bytes: Some(8 * GB),
        temperature_celsius: Some(61.0),
        ..Default::default()
    }])
}

pub fn disks(used_percent: u64) -> Reading {
    Reading::Disks(vec![DiskReading {
        device: "/dev/nvme0n1p2".to_string(),
        mountpoint: "/".to_string(),
        fs_type: "ext4".to_string(),
        total_bytes: 100 * GB,
        available_bytes: (100 - used_percent) * GB,
        model: "Samsung SSD 980".to_string(),
    }])
}

/// Aggregator over fixed readings: cpu 42%, ram 60%, optional gpu, disk 75%.
pub fn aggregator(gpu_usage: Option<f32>) -> Aggregator {
    Aggregator::new(
        vec![
            fixed(ComponentKind::Cpu, Some(cpu(42.0))),
            fixed(ComponentKind::Ram, Some(memory(6, 10))),
            fixed(ComponentKind::Gpu, gpu_usage.map(gpu)),
            fixed(ComponentKind::Disk, Some(disks(75))),
        ],
        Duration::from_secs(1),
    )
}
