use sysinfo::{MemoryRefreshKind, RefreshKind, System};

use super::Probe;
use crate::core::system_monitor::metrics::ComponentKind;
use crate::core::system_monitor::readings::{MemoryReading, Reading};
use crate::error::{HwError, Result};

pub struct MemoryProbe {
    system: System,
}

impl MemoryProbe {
    pub fn new() -> Self {
        Self {
            system: System::new_with_specifics(
                RefreshKind::nothing().with_memory(MemoryRefreshKind::everything()),
            ),
        }
    }
}

impl Default for MemoryProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for MemoryProbe {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Ram
    }

    fn sample(&mut self) -> Result<Reading> {
        self.system.refresh_memory();

        let total = self.system.total_memory();
        if total == 0 {
            return Err(HwError::metric_collection("total memory reported as 0"));
        }

        Ok(Reading::Memory(MemoryReading {
            total_bytes: total,
            used_bytes: self.system.used_memory(),
            available_bytes: self.system.available_memory(),
        }))
    }
}
