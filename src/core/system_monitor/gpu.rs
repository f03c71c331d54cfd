use super::readings::GpuReading;
use crate::error::Result;

/// Trait for GPU metrics providers
///
/// This trait abstracts GPU monitoring across different vendors (NVIDIA, AMD).
/// Implementations live in the platform layer and are selected once, at probe
/// construction, by [`crate::platform::gpu::get_gpu_provider`].
pub trait GpuProvider: Send {
    /// Get the vendor of the GPU
    fn vendor(&self) -> GpuVendor;

    /// Short backend name used in logs (`nvml`, `rocm-smi`, `amdgpu-sysfs`)
    fn backend_name(&self) -> &'static str;

    /// Number of devices this backend can see
    fn device_count(&self) -> u32;

    /// Collect current metrics for one device
    fn collect_metrics(&mut self, index: u32) -> Result<GpuReading>;
}

// Re-export GpuVendor for convenience
pub use super::readings::GpuVendor;
