//! Source probes.
//!
//! Each probe owns its platform handles and produces one [`Reading`] per call.
//! A probe never aborts its siblings: failures come back as `Err` and the
//! aggregator decides how the component degrades.

mod cpu;
mod disks;
mod gpu;
mod memory;

pub use cpu::{split_sensor_label, CpuProbe};
pub use disks::{block_device_name, DiskProbe};
pub use gpu::GpuProbe;
pub use memory::MemoryProbe;

use super::metrics::ComponentKind;
use super::readings::Reading;
use crate::error::{HwError, Result};

/// A single-source reader for one snapshot component.
pub trait Probe: Send {
    fn kind(&self) -> ComponentKind;

    fn sample(&mut self) -> Result<Reading>;
}

/// Outcome of one-time feature detection for an optional data source.
pub enum Capability<T> {
    Available(T),
    Unavailable(String),
}

impl<T> Capability<T> {
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(value) => Capability::Available(value),
            Err(e) => Capability::Unavailable(e.to_string()),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available(_))
    }

    pub fn as_mut(&mut self) -> std::result::Result<&mut T, HwError> {
        match self {
            Capability::Available(value) => Ok(value),
            Capability::Unavailable(reason) => Err(HwError::probe_unavailable(reason.clone())),
        }
    }
}

/// The probe set used by the server and the local commands.
pub fn system_probes() -> Vec<Box<dyn Probe>> {
    vec![
        Box::new(CpuProbe::new()),
        Box::new(MemoryProbe::new()),
        Box::new(GpuProbe::detect()),
        Box::new(DiskProbe::new()),
    ]
}
