//! AMD GPUs read straight from the `amdgpu` driver's sysfs files.
//!
//! Works without ROCm installed. Each `card<N>` whose PCI vendor is AMD and
//! that exposes `gpu_busy_percent` counts as a device.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::system_monitor::readings::GpuReading;
use crate::core::system_monitor::{GpuProvider, GpuVendor};
use crate::error::{HwError, Result};

const AMD_PCI_VENDOR: &str = "0x1002";
const DRM_ROOT: &str = "/sys/class/drm";

pub struct AmdSysfsGpuProvider {
    cards: Vec<PathBuf>,
}

impl AmdSysfsGpuProvider {
    pub fn new() -> Result<Self> {
        Self::with_root(DRM_ROOT)
    }

    /// Scan an alternate DRM class directory.
    pub fn with_root<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        let entries = fs::read_dir(root).map_err(|e| {
            HwError::gpu_not_available(format!("Cannot read {}: {}", root.display(), e))
        })?;

        let mut cards: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| is_card_name(&entry.file_name().to_string_lossy()))
            .map(|entry| entry.path())
            .filter(|path| is_amd_card(path))
            .collect();
        cards.sort_by_key(|path| card_index(path));

        Ok(Self { cards })
    }
}

impl GpuProvider for AmdSysfsGpuProvider {
    fn vendor(&self) -> GpuVendor {
        GpuVendor::Amd
    }

    fn backend_name(&self) -> &'static str {
        "amdgpu-sysfs"
    }

    fn device_count(&self) -> u32 {
        self.cards.len() as u32
    }

    fn collect_metrics(&mut self, index: u32) -> Result<GpuReading> {
        let card = self.cards.get(index as usize).ok_or_else(|| {
            HwError::metric_collection(format!("GPU {} not found", index))
        })?;
        let device = card.join("device");

        let busy = read_u64(&device.join("gpu_busy_percent")).ok_or_else(|| {
            HwError::metric_collection(format!(
                "{} has no readable gpu_busy_percent",
                card.display()
            ))
        })?;

        let name = read_trimmed(&device.join("product_name")).unwrap_or_else(|| {
            format!(
                "AMD Radeon GPU ({})",
                card.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default()
            )
        });

        let hwmon = first_hwmon(&device);
        let hwmon_value = |file: &str| hwmon.as_ref().and_then(|dir| read_u64(&dir.join(file)));

        Ok(GpuReading {
            vendor: GpuVendor::Amd,
            name,
            utilization_percent: busy as f32,
            memory_used_bytes: read_u64(&device.join("mem_info_vram_used")),
            memory_total_bytes: read_u64(&device.join("mem_info_vram_total")),
            // millidegrees
            temperature_celsius: hwmon_value("temp1_input").map(|t| t as f32 / 1000.0),
            fan_speed_percent: None,
            // microwatts
            power_draw_watts: hwmon_value("power1_average").map(|p| p as f32 / 1_000_000.0),
            power_limit_watts: hwmon_value("power1_cap").map(|p| p as f32 / 1_000_000.0),
            clock_graphics_mhz: None,
            clock_memory_mhz: None,
        })
    }
}

/// `card0`, `card1`, ... but not connector entries like `card0-DP-1`.
fn is_card_name(name: &str) -> bool {
    name.strip_prefix("card")
        .map(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false)
}

fn card_index(path: &Path) -> u32 {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.strip_prefix("card"))
        .and_then(|n| n.parse().ok())
        .unwrap_or(u32::MAX)
}

fn is_amd_card(card: &Path) -> bool {
    let device = card.join("device");
    read_trimmed(&device.join("vendor")).as_deref() == Some(AMD_PCI_VENDOR)
        && device.join("gpu_busy_percent").exists()
}

fn first_hwmon(device: &Path) -> Option<PathBuf> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(device.join("hwmon"))
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    dirs.sort();
    dirs.into_iter().next()
}

fn read_trimmed(path: &Path) -> Option<String> {
    let value = fs::read_to_string(path).ok()?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn read_u64(path: &Path) -> Option<u64> {
    read_trimmed(path)?.parse().ok()
}
