//! On-demand snapshot collection over a set of independent probes.
//!
//! Every probe is sampled on its own short-lived thread and joined against a
//! shared deadline. A probe that fails, panics or overruns the budget only
//! affects its own component: the GPU is omitted, while CPU, RAM and disk fall
//! back to their last good value (or a degraded placeholder).

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use super::metrics::{ComponentKind, CpuMetrics, DiskMetrics, GpuMetrics, RamMetrics, Snapshot};
use super::normalize::{
    fallback_cpu, fallback_disk, fallback_ram, normalize_cpu, normalize_disk, normalize_gpu,
    normalize_memory, pick_primary_disk,
};
use super::probes::{system_probes, Probe};
use super::readings::Reading;
use crate::error::{HwError, Result};

/// Time allowed for all probes of one collection.
pub const DEFAULT_PROBE_BUDGET: Duration = Duration::from_secs(2);

type SharedProbe = Arc<Mutex<Box<dyn Probe>>>;

#[derive(Default)]
struct LastGood {
    cpu: Option<CpuMetrics>,
    ram: Option<RamMetrics>,
    disks: Vec<DiskMetrics>,
}

pub struct Aggregator {
    probes: Vec<(ComponentKind, SharedProbe)>,
    budget: Duration,
    last_good: Mutex<LastGood>,
}

impl Aggregator {
    pub fn new(probes: Vec<Box<dyn Probe>>, budget: Duration) -> Self {
        let probes = probes
            .into_iter()
            .map(|probe| (probe.kind(), Arc::new(Mutex::new(probe))))
            .collect();

        Self {
            probes,
            budget,
            last_good: Mutex::new(LastGood::default()),
        }
    }

    /// Aggregator over the CPU, memory, GPU and disk probes of this machine.
    pub fn with_system_probes(budget: Duration) -> Self {
        Self::new(system_probes(), budget)
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Sample every probe and merge the results into one snapshot.
    ///
    /// Never fails: missing components are degraded instead.
    pub fn collect(&self) -> Snapshot {
        let started = Instant::now();
        let results = self.sample_all();
        let snapshot = self.merge(results);
        log::debug!("Snapshot collected in {:?}", started.elapsed());
        snapshot
    }

    fn sample_all(&self) -> Vec<(ComponentKind, Result<Reading>)> {
        let (tx, rx) = mpsc::channel();
        let mut results = Vec::with_capacity(self.probes.len());
        let mut pending = Vec::with_capacity(self.probes.len());
        let deadline = Instant::now() + self.budget;

        for (slot, (kind, probe)) in self.probes.iter().enumerate() {
            let kind = *kind;
            let probe = Arc::clone(probe);
            let tx = tx.clone();

            let spawned = thread::Builder::new()
                .name(format!("probe-{}", kind.key()))
                .spawn(move || {
                    let _ = tx.send((slot, sample_guarded(kind, &probe, deadline)));
                });

            match spawned {
                Ok(_) => pending.push(slot),
                Err(e) => results.push((
                    kind,
                    Err(HwError::metric_collection(format!(
                        "could not start {} probe: {}",
                        kind, e
                    ))),
                )),
            }
        }
        drop(tx);

        while !pending.is_empty() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok((slot, result)) => {
                    pending.retain(|p| *p != slot);
                    results.push((self.probes[slot].0, result));
                }
                Err(_) => break,
            }
        }

        // Threads still running are detached; the probe stays locked until
        // they finish and later collections wait for it at most their budget.
        for slot in pending {
            let kind = self.probes[slot].0;
            results.push((
                kind,
                Err(HwError::probe_timeout(format!(
                    "{} probe exceeded {:?}",
                    kind, self.budget
                ))),
            ));
        }

        results
    }

    fn merge(&self, results: Vec<(ComponentKind, Result<Reading>)>) -> Snapshot {
        let mut cpu = None;
        let mut ram = None;
        let mut gpus: Vec<GpuMetrics> = Vec::new();
        let mut disks: Option<Vec<DiskMetrics>> = None;

        for (kind, result) in results {
            match result {
                Ok(Reading::Cpu(reading)) => cpu = Some(normalize_cpu(&reading)),
                Ok(Reading::Memory(reading)) => ram = Some(normalize_memory(&reading)),
                Ok(Reading::Gpu(readings)) => gpus = readings.iter().map(normalize_gpu).collect(),
                Ok(Reading::Disks(readings)) => {
                    disks = Some(readings.iter().map(normalize_disk).collect())
                }
                Err(e) if is_expected_absence(kind, &e) => {
                    log::debug!("{} omitted: {}", kind, e)
                }
                Err(e) => log::warn!("{} probe failed: {}", kind, e),
            }
        }

        let mut last = self.last_good.lock();

        let cpu = match cpu {
            Some(cpu) => {
                last.cpu = Some(cpu.clone());
                cpu
            }
            None => last.cpu.clone().unwrap_or_else(fallback_cpu),
        };

        let ram = match ram {
            Some(ram) => {
                last.ram = Some(ram.clone());
                ram
            }
            None => last.ram.clone().unwrap_or_else(fallback_ram),
        };

        let disks = match disks {
            Some(disks) if !disks.is_empty() => {
                last.disks = disks.clone();
                disks
            }
            _ => last.disks.clone(),
        };
        let disk = pick_primary_disk(&disks)
            .cloned()
            .unwrap_or_else(fallback_disk);

        Snapshot {
            timestamp: chrono::Utc::now().timestamp(),
            cpu,
            ram,
            gpu: gpus.first().cloned(),
            disk,
            gpus,
            disks,
        }
    }
}

/// Errors that only mean this machine has no usable GPU.
fn is_expected_absence(kind: ComponentKind, error: &HwError) -> bool {
    kind == ComponentKind::Gpu
        && matches!(
            error,
            HwError::ProbeUnavailable(_) | HwError::GpuNotAvailable(_)
        )
}

/// Run one probe, turning a lock still held at `deadline` or a panic into an error.
fn sample_guarded(
    kind: ComponentKind,
    probe: &Mutex<Box<dyn Probe>>,
    deadline: Instant,
) -> Result<Reading> {
    let wait = deadline.saturating_duration_since(Instant::now());
    let Some(mut guard) = probe.try_lock_for(wait) else {
        return Err(HwError::probe_unavailable(format!(
            "{} probe is still busy",
            kind
        )));
    };

    match panic::catch_unwind(AssertUnwindSafe(|| guard.sample())) {
        Ok(result) => result,
        Err(_) => Err(HwError::metric_collection(format!("{} probe panicked", kind))),
    }
}
