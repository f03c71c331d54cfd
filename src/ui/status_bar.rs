//! One-line status-bar output (Waybar-style custom module JSON).

use serde::Serialize;

use crate::core::system_monitor::{overall_status, MetricValue, Snapshot};
use crate::ui::detail_table::NOT_AVAILABLE;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarOutput {
    pub text: String,
    pub tooltip: String,
    pub class: String,
    pub percentage: u8,
}

impl BarOutput {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            text: bar_text(snapshot),
            tooltip: tooltip(snapshot),
            class: overall_status(snapshot).as_str().to_string(),
            percentage: snapshot.cpu.raw_usage.clamp(0.0, 100.0).round() as u8,
        }
    }

    /// Output shown when no snapshot could be collected.
    pub fn error(message: &str) -> Self {
        Self {
            text: "HW Err".to_string(),
            tooltip: format!("Error: {}", message),
            class: "critical".to_string(),
            percentage: 0,
        }
    }
}

/// `CPU:45% | RAM:60% | GPU:70% | D:20%`
pub fn bar_text(snapshot: &Snapshot) -> String {
    let mut parts = vec![
        format!("CPU:{:.0}%", snapshot.cpu.raw_usage),
        format!("RAM:{:.0}%", snapshot.ram.raw_percent),
    ];
    if let Some(gpu) = &snapshot.gpu {
        parts.push(format!("GPU:{:.0}%", gpu.raw_usage));
    }
    parts.push(format!("D:{:.0}%", snapshot.disk.main_metric));
    parts.join(" | ")
}

pub fn tooltip(snapshot: &Snapshot) -> String {
    let mut lines = vec!["System Info".to_string()];

    let mut cpu = format!("CPU: {:.1}% {}", snapshot.cpu.raw_usage, snapshot.cpu.model);
    if let Some(temp) = &snapshot.cpu.label_value {
        cpu.push_str(&format!(" ({}°C)", temp));
    }
    lines.push(cpu);

    lines.push(format!(
        "RAM: {} ({:.1}%)",
        snapshot.ram.main_metric, snapshot.ram.raw_percent
    ));

    if snapshot.gpus.is_empty() {
        lines.push("GPU: Not Detected".to_string());
    } else {
        lines.push("GPUs:".to_string());
        for gpu in &snapshot.gpus {
            let mut line = format!("  {}: Util {:.1}%", gpu.name, gpu.raw_usage);
            if let Some(MetricValue::Number(temp)) = &gpu.label_value {
                line.push_str(&format!(" ({}°C)", temp));
            }
            lines.push(line);
        }
    }

    if snapshot.disks.is_empty() {
        lines.push("Disks: No data".to_string());
    } else {
        lines.push("Disks:".to_string());
        for disk in &snapshot.disks {
            let used_total = disk
                .label_value
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());
            lines.push(format!(
                "  {} {} ({}): {} ({:.1}%)",
                disk.mountpoint, disk.device, disk.model, used_total, disk.main_metric
            ));
        }
    }

    lines.join("\n")
}
