use crate::core::system_monitor::readings::GpuReading;
use crate::core::system_monitor::{GpuProvider, GpuVendor};
use crate::error::{HwError, Result};

#[cfg(all(unix, feature = "rocm"))]
use rocm_smi_lib::{ClockType, DeviceHandle, RocmSmi, TemperatureMetric};

/// AMD GPU provider using ROCm SMI
pub struct AmdGpuProvider {
    #[cfg(all(unix, feature = "rocm"))]
    rocm: RocmSmi,
    device_count: u32,
}

impl AmdGpuProvider {
    /// Initialize ROCm SMI and count the visible devices.
    pub fn new() -> Result<Self> {
        #[cfg(all(unix, feature = "rocm"))]
        {
            let rocm = RocmSmi::init().map_err(|e| {
                HwError::gpu_not_available(format!("Failed to init ROCm SMI: {:?}", e))
            })?;

            let device_count = rocm.get_device_count().map_err(|e| {
                HwError::gpu_not_available(format!("Failed to get device count: {:?}", e))
            })? as u32;

            Ok(Self { rocm, device_count })
        }
        #[cfg(not(all(unix, feature = "rocm")))]
        {
            Err(HwError::gpu_not_available(
                "AMD ROCm support not enabled or not on Unix",
            ))
        }
    }

    #[cfg(all(unix, feature = "rocm"))]
    fn get_device(&self, index: u32) -> Result<DeviceHandle> {
        self.rocm.get_device_handle(index).map_err(|e| {
            HwError::metric_collection(format!("Failed to get GPU device {}: {:?}", index, e))
        })
    }
}

impl GpuProvider for AmdGpuProvider {
    fn vendor(&self) -> GpuVendor {
        GpuVendor::Amd
    }

    fn backend_name(&self) -> &'static str {
        "rocm-smi"
    }

    fn device_count(&self) -> u32 {
        self.device_count
    }

    fn collect_metrics(&mut self, index: u32) -> Result<GpuReading> {
        #[cfg(all(unix, feature = "rocm"))]
        {
            let device = self.get_device(index)?;

            let name = self
                .rocm
                .get_device_name(&device)
                .unwrap_or_else(|_| "Unknown AMD GPU".to_string());

            let utilization = self.rocm.get_busy_percent(&device).map_err(|e| {
                HwError::metric_collection(format!("Failed to get busy percent: {:?}", e))
            })?;

            Ok(GpuReading {
                vendor: GpuVendor::Amd,
                name,
                utilization_percent: utilization as f32,
                memory_used_bytes: self.rocm.get_memory_used(&device).ok(),
                memory_total_bytes: self.rocm.get_memory_total(&device).ok(),
                temperature_celsius: self
                    .rocm
                    .get_temperature(&device, TemperatureMetric::Edge)
                    .ok()
                    .map(|t| t as f32),
                fan_speed_percent: self.rocm.get_fan_speed(&device, 0).ok().map(|f| f as u32),
                // microwatts to watts
                power_draw_watts: self
                    .rocm
                    .get_power_average(&device)
                    .ok()
                    .map(|p| p as f32 / 1_000_000.0),
                power_limit_watts: self
                    .rocm
                    .get_power_cap(&device)
                    .ok()
                    .map(|p| p as f32 / 1_000_000.0),
                clock_graphics_mhz: self
                    .rocm
                    .get_clock(&device, ClockType::Sys)
                    .ok()
                    .map(|c| c as u32),
                clock_memory_mhz: self
                    .rocm
                    .get_clock(&device, ClockType::Mem)
                    .ok()
                    .map(|c| c as u32),
            })
        }
        #[cfg(not(all(unix, feature = "rocm")))]
        {
            let _ = index;
            Err(HwError::gpu_not_available(
                "AMD ROCm support not enabled or not on Unix",
            ))
        }
    }
}
