//! Turns raw probe readings into the stable snapshot schema.

use super::metrics::{
    format_number, CpuMetrics, DiskMetrics, GpuMetrics, MetricValue, RamMetrics, SensorGroups,
    SensorReading,
};
use super::readings::{CpuReading, DiskReading, GpuReading, MemoryReading, RawSensor};

pub const USAGE_LABEL: &str = "Usage (%)";
pub const TEMP_LABEL: &str = "Temp (°C)";
pub const USED_TOTAL_LABEL: &str = "Used / Total (GB)";

/// Sensor groups that carry the CPU package temperature, in priority order.
pub const CPU_TEMP_GROUPS: [&str; 4] = ["coretemp", "k10temp", "cpu_thermal", "acpitz"];

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Clamp to `[0, 100]`; non-finite input becomes 0.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn percent_of(used: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    clamp_percent(round_to(used as f64 / total as f64 * 100.0, 1))
}

pub fn bytes_to_gb(bytes: u64) -> f64 {
    round_to(bytes as f64 / GIB, 2)
}

fn used_total_text(used: u64, total: u64) -> MetricValue {
    MetricValue::Text(format!(
        "{}GB / {}GB",
        format_number(bytes_to_gb(used)),
        format_number(bytes_to_gb(total))
    ))
}

fn non_empty_or(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

/// Group platform sensors by chip name, keeping source order inside each group.
pub fn group_sensors(sensors: &[RawSensor]) -> SensorGroups {
    let mut groups = SensorGroups::new();
    for sensor in sensors {
        let current = sensor.current_celsius as f64;
        if !current.is_finite() {
            continue;
        }
        groups
            .entry(sensor.group.clone())
            .or_default()
            .push(SensorReading {
                label: sensor.label.clone(),
                current: round_to(current, 1),
                high: sensor
                    .high_celsius
                    .map(f64::from)
                    .filter(|h| h.is_finite() && *h > 0.0),
            });
    }
    groups
}

/// First reading of the highest-priority CPU sensor group present.
pub fn package_temperature(sensors: &[RawSensor]) -> Option<f64> {
    CPU_TEMP_GROUPS.iter().find_map(|chip| {
        sensors
            .iter()
            .find(|s| s.group.eq_ignore_ascii_case(chip) && s.current_celsius.is_finite())
            .map(|s| round_to(s.current_celsius as f64, 1))
    })
}

pub fn normalize_cpu(reading: &CpuReading) -> CpuMetrics {
    let usage = round_to(clamp_percent(reading.usage_percent as f64), 1);
    let temperature = package_temperature(&reading.sensors);

    CpuMetrics {
        raw_usage: usage,
        main_metric: MetricValue::Number(usage),
        main_metric_label: USAGE_LABEL.to_string(),
        label_name: TEMP_LABEL.to_string(),
        label_value: temperature.map(MetricValue::Number),
        model: non_empty_or(reading.model.as_deref(), "Unknown CPU"),
        cores: reading.core_count,
        sensors: group_sensors(&reading.sensors),
    }
}

pub fn normalize_memory(reading: &MemoryReading) -> RamMetrics {
    let percent = percent_of(reading.used_bytes, reading.total_bytes);

    RamMetrics {
        raw_percent: percent,
        main_metric: used_total_text(reading.used_bytes, reading.total_bytes),
        main_metric_label: USED_TOTAL_LABEL.to_string(),
        label_name: USAGE_LABEL.to_string(),
        label_value: Some(MetricValue::Number(percent)),
        details: format!("{}GB RAM", bytes_to_gb(reading.total_bytes).round() as u64),
        available: format!("{}GB", format_number(bytes_to_gb(reading.available_bytes))),
    }
}

pub fn normalize_gpu(reading: &GpuReading) -> GpuMetrics {
    let usage = round_to(clamp_percent(reading.utilization_percent as f64), 1);
    let vendor = reading.vendor.display_name();

    let mut sensors = SensorGroups::new();
    let mut push = |group: &str, label: &str, current: f64, high: Option<f64>| {
        if current.is_finite() {
            sensors
                .entry(group.to_string())
                .or_insert_with(Vec::new)
                .push(SensorReading {
                    label: label.to_string(),
                    current: round_to(current, 2),
                    high,
                });
        }
    };

    if let (Some(used), Some(total)) = (reading.memory_used_bytes, reading.memory_total_bytes) {
        push("memory", "Used (GB)", bytes_to_gb(used), None);
        push("memory", "Total (GB)", bytes_to_gb(total), None);
        push("memory", "Used (%)", percent_of(used, total), None);
    }
    if let Some(temp) = reading.temperature_celsius {
        push("temperature", "Edge", temp as f64, None);
    }
    if let Some(fan) = reading.fan_speed_percent {
        push("fan", "Fan 0 (%)", fan as f64, None);
    }
    if let Some(draw) = reading.power_draw_watts {
        push(
            "power",
            "Draw (W)",
            draw as f64,
            reading.power_limit_watts.map(f64::from),
        );
    }
    if let Some(clock) = reading.clock_graphics_mhz {
        push("clocks", "Graphics (MHz)", clock as f64, None);
    }
    if let Some(clock) = reading.clock_memory_mhz {
        push("clocks", "Memory (MHz)", clock as f64, None);
    }

    GpuMetrics {
        name: non_empty_or(Some(reading.name.as_str()), &format!("{} GPU", vendor)),
        raw_usage: usage,
        main_metric: MetricValue::Number(usage),
        main_metric_label: USAGE_LABEL.to_string(),
        label_name: TEMP_LABEL.to_string(),
        label_value: reading
            .temperature_celsius
            .map(f64::from)
            .filter(|t| t.is_finite())
            .map(|t| MetricValue::Number(round_to(t, 1))),
        model: vendor.to_string(),
        sensors,
    }
}

pub fn normalize_disk(reading: &DiskReading) -> DiskMetrics {
    DiskMetrics {
        main_metric: percent_of(reading.used_bytes(), reading.total_bytes),
        main_metric_label: USAGE_LABEL.to_string(),
        label_name: USED_TOTAL_LABEL.to_string(),
        label_value: Some(used_total_text(reading.used_bytes(), reading.total_bytes)),
        model: non_empty_or(Some(reading.model.as_str()), "Unknown disk"),
        device: reading.device.clone(),
        mountpoint: reading.mountpoint.clone(),
        fstype: reading.fs_type.clone(),
    }
}

/// The root partition, or else the first one.
pub fn pick_primary_disk(disks: &[DiskMetrics]) -> Option<&DiskMetrics> {
    disks
        .iter()
        .find(|d| d.mountpoint == "/")
        .or_else(|| disks.first())
}

// Fallbacks for components that are always shown, used when a probe has never
// produced a reading.

pub fn fallback_cpu() -> CpuMetrics {
    normalize_cpu(&CpuReading::default())
}

pub fn fallback_ram() -> RamMetrics {
    RamMetrics {
        label_value: None,
        details: "Unknown".to_string(),
        available: String::new(),
        ..normalize_memory(&MemoryReading::default())
    }
}

pub fn fallback_disk() -> DiskMetrics {
    DiskMetrics {
        label_value: None,
        ..normalize_disk(&DiskReading::default())
    }
}
