//! GPU-specific platform code.
//!
//! Provides GPU metrics collection for different vendors.
//! Supports NVIDIA (via NVML), AMD (via ROCm SMI) and AMD through the
//! `amdgpu` kernel driver's sysfs files.

mod amd;
mod amdgpu_sysfs;
mod nvidia;

pub use amd::AmdGpuProvider;
pub use amdgpu_sysfs::AmdSysfsGpuProvider;
pub use nvidia::NvidiaGpuProvider;

use crate::core::system_monitor::probes::Capability;
use crate::core::system_monitor::GpuProvider;
use crate::error::Result;

/// Constructor for one backend in the priority list.
pub type ProviderFactory = Box<dyn FnOnce() -> Result<Box<dyn GpuProvider>>>;

/// Supported backends in order of preference:
/// 1. NVIDIA (via NVML)
/// 2. AMD (via ROCm SMI)
/// 3. AMD (via amdgpu sysfs)
pub fn default_providers() -> Vec<(&'static str, ProviderFactory)> {
    vec![
        (
            "nvml",
            Box::new(|| NvidiaGpuProvider::new().map(|p| Box::new(p) as Box<dyn GpuProvider>)),
        ),
        (
            "rocm-smi",
            Box::new(|| AmdGpuProvider::new().map(|p| Box::new(p) as Box<dyn GpuProvider>)),
        ),
        (
            "amdgpu-sysfs",
            Box::new(|| AmdSysfsGpuProvider::new().map(|p| Box::new(p) as Box<dyn GpuProvider>)),
        ),
    ]
}

/// Pick the first backend that initializes and reports at least one device.
pub fn select_provider(
    candidates: Vec<(&'static str, ProviderFactory)>,
) -> Capability<Box<dyn GpuProvider>> {
    let mut reasons = Vec::new();

    for (name, factory) in candidates {
        match factory() {
            Ok(provider) if provider.device_count() > 0 => {
                return Capability::Available(provider);
            }
            Ok(_) => {
                log::debug!("GPU backend {} reported no devices", name);
                reasons.push(format!("{}: no devices", name));
            }
            Err(e) => {
                log::debug!("GPU backend {} unavailable: {}", name, e);
                reasons.push(format!("{}: {}", name, e));
            }
        }
    }

    if reasons.is_empty() {
        Capability::Unavailable("no GPU backends configured".to_string())
    } else {
        Capability::Unavailable(format!("No supported GPU found ({})", reasons.join("; ")))
    }
}

/// Attempt to get an available GPU provider
pub fn get_gpu_provider() -> Capability<Box<dyn GpuProvider>> {
    select_provider(default_providers())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::system_monitor::readings::GpuReading;
    use crate::core::system_monitor::GpuVendor;
    use crate::error::HwError;
    use std::cell::Cell;
    use std::rc::Rc;

    struct StaticProvider {
        name: &'static str,
        devices: u32,
    }

    impl GpuProvider for StaticProvider {
        fn vendor(&self) -> GpuVendor {
            GpuVendor::Unknown
        }

        fn backend_name(&self) -> &'static str {
            self.name
        }

        fn device_count(&self) -> u32 {
            self.devices
        }

        fn collect_metrics(&mut self, _index: u32) -> Result<GpuReading> {
            Ok(GpuReading::default())
        }
    }

    fn ok(name: &'static str, devices: u32) -> (&'static str, ProviderFactory) {
        (
            name,
            Box::new(move || {
                Ok(Box::new(StaticProvider { name, devices }) as Box<dyn GpuProvider>)
            }),
        )
    }

    fn failing(name: &'static str) -> (&'static str, ProviderFactory) {
        (
            name,
            Box::new(|| Err(HwError::gpu_not_available("library not found"))),
        )
    }

    #[test]
    fn test_first_backend_with_devices_wins() {
        let selected = select_provider(vec![failing("nvml"), ok("rocm", 0), ok("sysfs", 2), ok("late", 1)]);
        match selected {
            Capability::Available(p) => assert_eq!(p.backend_name(), "sysfs"),
            Capability::Unavailable(reason) => panic!("expected a backend: {}", reason),
        }
    }

    #[test]
    fn test_later_backends_are_not_initialized() {
        let touched = Rc::new(Cell::new(false));
        let flag = Rc::clone(&touched);
        let late: ProviderFactory = Box::new(move || {
            flag.set(true);
            Err(HwError::gpu_not_available("should not run"))
        });

        let selected = select_provider(vec![ok("nvml", 1), ("late", late)]);
        assert!(selected.is_available());
        assert!(!touched.get());
    }

    #[test]
    fn test_no_devices_anywhere_is_unavailable() {
        let selected = select_provider(vec![failing("nvml"), ok("rocm", 0)]);
        match selected {
            Capability::Unavailable(reason) => {
                assert!(reason.contains("nvml"));
                assert!(reason.contains("rocm: no devices"));
            }
            Capability::Available(_) => panic!("no backend should be selected"),
        }
    }
}
