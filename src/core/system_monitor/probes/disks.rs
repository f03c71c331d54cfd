//! Disk usage for the system partitions.

use std::fs;
use std::path::{Path, PathBuf};

use sysinfo::{DiskKind, Disks};

use super::Probe;
use crate::core::system_monitor::metrics::ComponentKind;
use crate::core::system_monitor::readings::{DiskReading, Reading};
use crate::error::{HwError, Result};

/// Mount points shown when present; every real partition is shown otherwise.
const PREFERRED_MOUNTS: [&str; 2] = ["/", "/home"];

pub struct DiskProbe {
    disks: Disks,
    sysfs_root: PathBuf,
}

impl DiskProbe {
    pub fn new() -> Self {
        Self::with_sysfs_root("/sys")
    }

    pub fn with_sysfs_root<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            disks: Disks::new_with_refreshed_list(),
            sysfs_root: root.into(),
        }
    }
}

impl Default for DiskProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for DiskProbe {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Disk
    }

    fn sample(&mut self) -> Result<Reading> {
        self.disks.refresh(true);

        let readings: Vec<DiskReading> = self
            .disks
            .iter()
            .map(|disk| {
                let device = disk.name().to_string_lossy().to_string();
                DiskReading {
                    model: disk_model(&self.sysfs_root, &device, disk.kind()),
                    mountpoint: disk.mount_point().to_string_lossy().to_string(),
                    fs_type: disk.file_system().to_string_lossy().to_string(),
                    total_bytes: disk.total_space(),
                    available_bytes: disk.available_space(),
                    device,
                }
            })
            .collect();

        let selected = select_partitions(readings);
        if selected.is_empty() {
            return Err(HwError::metric_collection("no mounted partitions found"));
        }
        Ok(Reading::Disks(selected))
    }
}

/// Keep `/` and `/home` when mounted, otherwise every partition with a size.
pub fn select_partitions(readings: Vec<DiskReading>) -> Vec<DiskReading> {
    let (preferred, others): (Vec<_>, Vec<_>) = readings
        .into_iter()
        .filter(|d| d.total_bytes > 0)
        .partition(|d| PREFERRED_MOUNTS.contains(&d.mountpoint.as_str()));

    if preferred.is_empty() {
        others
    } else {
        preferred
    }
}

/// Base block device of a partition (`/dev/nvme0n1p2` → `nvme0n1`, `/dev/sda1` → `sda`).
pub fn block_device_name(device: &str) -> String {
    let name = device.rsplit('/').next().unwrap_or(device);

    if name.starts_with("nvme") || name.starts_with("mmcblk") {
        if let Some(pos) = name.rfind('p') {
            let (base, suffix) = (&name[..pos], &name[pos + 1..]);
            if !suffix.is_empty()
                && suffix.chars().all(|c| c.is_ascii_digit())
                && base.ends_with(|c: char| c.is_ascii_digit())
            {
                return base.to_string();
            }
        }
        return name.to_string();
    }

    if ["sd", "hd", "vd", "xvd"].iter().any(|p| name.starts_with(p)) {
        return name
            .trim_end_matches(|c: char| c.is_ascii_digit())
            .to_string();
    }

    name.to_string()
}

/// Model string from sysfs, or a guess from the device name and disk kind.
pub fn disk_model(sysfs_root: &Path, device: &str, kind: DiskKind) -> String {
    let base = block_device_name(device);
    let model_path = sysfs_root.join("block").join(&base).join("device").join("model");

    if let Ok(model) = fs::read_to_string(&model_path) {
        let model = model.trim();
        if !model.is_empty() {
            return model.to_string();
        }
    }
    log::debug!("No sysfs model for {} at {:?}", device, model_path);

    if base.starts_with("nvme") {
        return "NVMe SSD".to_string();
    }
    match kind {
        DiskKind::SSD => "SSD".to_string(),
        DiskKind::HDD => "HDD".to_string(),
        _ => "SSD/HDD".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn partition(mount: &str, total: u64) -> DiskReading {
        DiskReading {
            device: "/dev/sda1".to_string(),
            mountpoint: mount.to_string(),
            fs_type: "ext4".to_string(),
            total_bytes: total,
            available_bytes: total / 2,
            model: String::new(),
        }
    }

    #[test]
    fn test_block_device_name() {
        assert_eq!(block_device_name("/dev/nvme0n1p2"), "nvme0n1");
        assert_eq!(block_device_name("/dev/nvme0n1"), "nvme0n1");
        assert_eq!(block_device_name("/dev/sda1"), "sda");
        assert_eq!(block_device_name("/dev/mmcblk0p2"), "mmcblk0");
        assert_eq!(block_device_name("/dev/mapper/root"), "root");
    }

    #[test]
    fn test_select_prefers_root_and_home() {
        let selected = select_partitions(vec![
            partition("/boot", 100),
            partition("/", 1000),
            partition("/home", 2000),
        ]);
        let mounts: Vec<_> = selected.iter().map(|d| d.mountpoint.as_str()).collect();
        assert_eq!(mounts, vec!["/", "/home"]);
    }

    #[test]
    fn test_select_falls_back_to_all_sized_partitions() {
        let selected = select_partitions(vec![
            partition("C:\\", 1000),
            partition("/empty", 0),
        ]);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].mountpoint, "C:\\");
    }

    #[test]
    fn test_disk_model_from_sysfs() {
        let root = TempDir::new().unwrap();
        let device_dir = root.path().join("block/sda/device");
        fs::create_dir_all(&device_dir).unwrap();
        fs::write(device_dir.join("model"), "Samsung SSD 870  \n").unwrap();

        assert_eq!(
            disk_model(root.path(), "/dev/sda2", DiskKind::HDD),
            "Samsung SSD 870"
        );
    }

    #[test]
    fn test_disk_model_fallbacks() {
        let root = TempDir::new().unwrap();
        assert_eq!(disk_model(root.path(), "/dev/nvme0n1p1", DiskKind::SSD), "NVMe SSD");
        assert_eq!(disk_model(root.path(), "/dev/sdb1", DiskKind::HDD), "HDD");
        assert_eq!(disk_model(root.path(), "/dev/sdb1", DiskKind::Unknown(-1)), "SSD/HDD");
    }
}
