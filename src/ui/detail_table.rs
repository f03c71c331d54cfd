//! Key/value rows for the component detail view.
//!
//! Rows come in a fixed order: the primary metric, the secondary label/value
//! pair, the remaining scalar fields alphabetically, then one row per sensor
//! reading. A key is emitted at most once.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::core::system_monitor::{format_number, ComponentKind, Snapshot};

/// Text shown for absent values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Fields rendered by the primary/secondary rows or the sensors section.
const CONSUMED_KEYS: [&str; 5] = [
    "main_metric",
    "main_metric_label",
    "label_name",
    "label_value",
    "sensors",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailSection {
    Primary,
    Secondary,
    Field,
    Sensor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailRow {
    pub key: String,
    pub label: String,
    pub value: String,
    pub section: DetailSection,
}

struct RowBuilder {
    rows: Vec<DetailRow>,
    seen: HashSet<String>,
}

impl RowBuilder {
    fn push(&mut self, key: String, label: String, value: String, section: DetailSection) {
        if self.seen.insert(key.clone()) {
            self.rows.push(DetailRow {
                key,
                label,
                value,
                section,
            });
        }
    }
}

/// Build the detail rows of one serialized component.
///
/// Anything but a JSON object yields no rows.
pub fn assemble_detail(component: &Value) -> Vec<DetailRow> {
    let Some(fields) = component.as_object() else {
        return Vec::new();
    };

    let mut builder = RowBuilder {
        rows: Vec::with_capacity(fields.len()),
        seen: HashSet::new(),
    };

    if let Some(value) = fields.get("main_metric") {
        builder.push(
            "main_metric".to_string(),
            label_field(fields, "main_metric_label", "Value"),
            render_value(value),
            DetailSection::Primary,
        );
    }

    if fields.contains_key("label_name") || fields.contains_key("label_value") {
        builder.push(
            "label_value".to_string(),
            label_field(fields, "label_name", "Detail"),
            render_value(fields.get("label_value").unwrap_or(&Value::Null)),
            DetailSection::Secondary,
        );
    }

    let mut keys: Vec<&String> = fields
        .keys()
        .filter(|key| !CONSUMED_KEYS.contains(&key.as_str()))
        .collect();
    keys.sort();

    for key in keys {
        let value = &fields[key.as_str()];
        if value.is_object() || value.is_array() {
            continue;
        }
        builder.push(key.clone(), humanize(key), render_value(value), DetailSection::Field);
    }

    if let Some(groups) = fields.get("sensors").and_then(Value::as_object) {
        let mut names: Vec<&String> = groups.keys().collect();
        names.sort();

        for group in names {
            let Some(readings) = groups[group.as_str()].as_array() else {
                continue;
            };
            for (index, reading) in readings.iter().enumerate() {
                builder.push(
                    format!("sensors.{}.{}", group, index),
                    sensor_label(group, reading, index),
                    sensor_value(reading),
                    DetailSection::Sensor,
                );
            }
        }
    }

    builder.rows
}

/// Detail rows of any serializable component.
pub fn assemble_component_detail<T: Serialize>(component: &T) -> Vec<DetailRow> {
    match serde_json::to_value(component) {
        Ok(value) => assemble_detail(&value),
        Err(e) => {
            log::warn!("Cannot serialize component for detail view: {}", e);
            Vec::new()
        }
    }
}

/// Detail rows of one component of a snapshot; empty for an absent GPU.
pub fn snapshot_detail(snapshot: &Snapshot, kind: ComponentKind) -> Vec<DetailRow> {
    match kind {
        ComponentKind::Cpu => assemble_component_detail(&snapshot.cpu),
        ComponentKind::Ram => assemble_component_detail(&snapshot.ram),
        ComponentKind::Gpu => snapshot
            .gpu
            .as_ref()
            .map(assemble_component_detail)
            .unwrap_or_default(),
        ComponentKind::Disk => assemble_component_detail(&snapshot.disk),
    }
}

pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => NOT_AVAILABLE.to_string(),
        Value::Bool(true) => "yes".to_string(),
        Value::Bool(false) => "no".to_string(),
        Value::Number(n) => n
            .as_f64()
            .map(format_number)
            .unwrap_or_else(|| n.to_string()),
        Value::String(s) if s.trim().is_empty() => NOT_AVAILABLE.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn label_field(fields: &Map<String, Value>, key: &str, default: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default)
        .to_string()
}

fn sensor_label(group: &str, reading: &Value, index: usize) -> String {
    let label = reading
        .get("label")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{}", index));
    format!("{} / {}", group, label)
}

fn sensor_value(reading: &Value) -> String {
    let current = render_value(reading.get("current").unwrap_or(&Value::Null));
    match reading.get("high").and_then(Value::as_f64) {
        Some(high) => format!("{} (high {})", current, format_number(high)),
        None => current,
    }
}

/// `raw_usage` → `Raw usage`
fn humanize(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
