//! GPU probe over the first vendor backend that reports a device.

use super::{Capability, Probe};
use crate::core::system_monitor::gpu::GpuProvider;
use crate::core::system_monitor::metrics::ComponentKind;
use crate::core::system_monitor::readings::Reading;
use crate::error::{HwError, Result};
use crate::platform::gpu::get_gpu_provider;

pub struct GpuProbe {
    provider: Capability<Box<dyn GpuProvider>>,
}

impl GpuProbe {
    /// Resolve the backend once; it is not re-detected per poll.
    pub fn detect() -> Self {
        let provider = get_gpu_provider();
        match &provider {
            Capability::Available(p) => log::info!(
                "GPU backend {} selected ({} device(s))",
                p.backend_name(),
                p.device_count()
            ),
            Capability::Unavailable(reason) => log::info!("No GPU backend: {}", reason),
        }
        Self { provider }
    }

    pub fn with_provider(provider: Capability<Box<dyn GpuProvider>>) -> Self {
        Self { provider }
    }

    pub fn is_available(&self) -> bool {
        self.provider.is_available()
    }
}

impl Probe for GpuProbe {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Gpu
    }

    fn sample(&mut self) -> Result<Reading> {
        let provider = self.provider.as_mut()?;

        let mut readings = Vec::new();
        for index in 0..provider.device_count() {
            match provider.collect_metrics(index) {
                Ok(reading) => readings.push(reading),
                Err(e) => log::warn!(
                    "GPU {} collection failed on {}: {}",
                    index,
                    provider.backend_name(),
                    e
                ),
            }
        }

        if readings.is_empty() {
            return Err(HwError::probe_unavailable("no GPU device could be sampled"));
        }
        Ok(Reading::Gpu(readings))
    }
}
