//! CPU usage, model and temperature sensors.

use sysinfo::{Components, CpuRefreshKind, RefreshKind, System};

use super::Probe;
use crate::core::system_monitor::metrics::ComponentKind;
use crate::core::system_monitor::readings::{CpuReading, RawSensor, Reading};
use crate::error::Result;

/// CPU probe backed by a long-lived sysinfo `System`.
///
/// Usage is computed between two refreshes, so the probe primes the counters
/// on construction and every sample measures the time since the previous one.
pub struct CpuProbe {
    system: System,
    components: Components,
}

impl CpuProbe {
    pub fn new() -> Self {
        let mut system = System::new_with_specifics(
            RefreshKind::nothing().with_cpu(CpuRefreshKind::everything()),
        );
        system.refresh_cpu_usage();

        Self {
            system,
            components: Components::new_with_refreshed_list(),
        }
    }

    fn read_sensors(&self) -> Vec<RawSensor> {
        self.components
            .iter()
            .filter_map(|comp| {
                let current = comp.temperature()?;
                let (group, label) = split_sensor_label(comp.label());
                Some(RawSensor {
                    group,
                    label,
                    current_celsius: current,
                    high_celsius: comp.max().or(comp.critical()),
                })
            })
            .collect()
    }
}

impl Default for CpuProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for CpuProbe {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Cpu
    }

    fn sample(&mut self) -> Result<Reading> {
        self.system.refresh_cpu_usage();
        self.components.refresh(true);

        let cpus = self.system.cpus();
        let model = cpus
            .first()
            .map(|c| c.brand().trim().to_string())
            .filter(|b| !b.is_empty());

        Ok(Reading::Cpu(CpuReading {
            usage_percent: self.system.global_cpu_usage(),
            model,
            core_count: cpus.len(),
            sensors: self.read_sensors(),
        }))
    }
}

/// Split a sysinfo component label into `(group, label)`.
///
/// Linux labels are prefixed with the chip name (`"coretemp Core 0"`,
/// `"k10temp Tctl"`); a label without a prefix becomes its own group.
pub fn split_sensor_label(raw: &str) -> (String, String) {
    let raw = raw.trim();
    match raw.split_once(char::is_whitespace) {
        Some((group, rest)) if !rest.trim().is_empty() => {
            (group.to_string(), rest.trim().to_string())
        }
        _ => (raw.to_string(), raw.to_string()),
    }
}
