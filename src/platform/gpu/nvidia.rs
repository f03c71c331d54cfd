#[cfg(feature = "nvml")]
use nvml_wrapper::{
    enum_wrappers::device::{Clock, TemperatureSensor},
    Device, Nvml,
};

use crate::core::system_monitor::readings::GpuReading;
use crate::core::system_monitor::{GpuProvider, GpuVendor};
use crate::error::{HwError, Result};

/// NVIDIA GPU provider using NVML
pub struct NvidiaGpuProvider {
    #[cfg(feature = "nvml")]
    nvml: Nvml,
    device_count: u32,
}

impl NvidiaGpuProvider {
    /// Initialize NVML and count the visible devices.
    pub fn new() -> Result<Self> {
        #[cfg(feature = "nvml")]
        {
            let nvml = Nvml::init()
                .map_err(|e| HwError::gpu_not_available(format!("Failed to init NVML: {}", e)))?;

            let device_count = nvml.device_count().map_err(|e| {
                HwError::gpu_not_available(format!("Failed to count NVIDIA devices: {}", e))
            })?;

            Ok(Self { nvml, device_count })
        }
        #[cfg(not(feature = "nvml"))]
        {
            Err(HwError::gpu_not_available("NVIDIA GPU support not enabled"))
        }
    }

    #[cfg(feature = "nvml")]
    fn get_device(&self, index: u32) -> Result<Device<'_>> {
        self.nvml.device_by_index(index).map_err(|e| {
            HwError::metric_collection(format!("Failed to get GPU device {}: {}", index, e))
        })
    }
}

impl GpuProvider for NvidiaGpuProvider {
    fn vendor(&self) -> GpuVendor {
        GpuVendor::Nvidia
    }

    fn backend_name(&self) -> &'static str {
        "nvml"
    }

    fn device_count(&self) -> u32 {
        self.device_count
    }

    fn collect_metrics(&mut self, index: u32) -> Result<GpuReading> {
        #[cfg(feature = "nvml")]
        {
            let device = self.get_device(index)?;

            let name = device
                .name()
                .unwrap_or_else(|_| "Unknown NVIDIA GPU".to_string());

            let utilization = device.utilization_rates().map_err(|e| {
                HwError::metric_collection(format!("Failed to get utilization: {}", e))
            })?;

            let memory_info = device.memory_info().ok();

            Ok(GpuReading {
                vendor: GpuVendor::Nvidia,
                name,
                utilization_percent: utilization.gpu as f32,
                memory_used_bytes: memory_info.as_ref().map(|m| m.used),
                memory_total_bytes: memory_info.as_ref().map(|m| m.total),
                temperature_celsius: device
                    .temperature(TemperatureSensor::Gpu)
                    .ok()
                    .map(|t| t as f32),
                fan_speed_percent: device.fan_speed(0).ok(),
                // mW to W
                power_draw_watts: device.power_usage().ok().map(|p| p as f32 / 1000.0),
                power_limit_watts: device
                    .enforced_power_limit()
                    .ok()
                    .map(|p| p as f32 / 1000.0),
                clock_graphics_mhz: device.clock_info(Clock::Graphics).ok(),
                clock_memory_mhz: device.clock_info(Clock::Memory).ok(),
            })
        }
        #[cfg(not(feature = "nvml"))]
        {
            let _ = index;
            Err(HwError::gpu_not_available("NVIDIA GPU support not enabled"))
        }
    }
}
