use std::time::Duration;

use hwpulse::core::system_monitor::{
    Aggregator, ComponentKind, HistoryStore, MetricValue, Snapshot,
};

use super::common::{aggregator, cpu, disks, fixed, memory};

fn assert_complete(snapshot: &Snapshot) {
    snapshot.validate().unwrap();
    for kind in ComponentKind::ALL {
        match snapshot.display_value(kind) {
            Some(value) => assert!(value.is_finite(), "{} is not finite", kind),
            None => assert_eq!(kind, ComponentKind::Gpu, "only the GPU may be absent"),
        }
    }
}

#[test]
fn test_full_machine_snapshot() {
    let snapshot = aggregator(Some(70.0)).collect();
    assert_complete(&snapshot);

    assert_eq!(snapshot.cpu.raw_usage, 42.0);
    assert_eq!(snapshot.cpu.label_value, Some(MetricValue::Number(48.5)));
    assert_eq!(snapshot.cpu.sensors["k10temp"][0].high, Some(95.0));
    assert_eq!(snapshot.ram.raw_percent, 60.0);
    assert_eq!(snapshot.ram.main_metric, MetricValue::Text("6GB / 10GB".to_string()));
    assert_eq!(snapshot.ram.available, "4GB");
    assert_eq!(snapshot.cpu.cores, 16);
    assert_eq!(snapshot.disk.main_metric, 75.0);

    let gpu = snapshot.gpu.as_ref().unwrap();
    assert_eq!(gpu.raw_usage, 70.0);
    assert_eq!(gpu.label_value, Some(MetricValue::Number(61.0)));
    assert_eq!(snapshot.gpus.len(), 1);
}

#[test]
fn test_gpu_present_only_with_a_device() {
    assert!(aggregator(None).collect().gpu.is_none());
    assert!(aggregator(Some(0.0)).collect().gpu.is_some());
}

#[test]
fn test_shape_is_stable_across_polls() {
    let aggregator = aggregator(None);
    let first = serde_json::to_value(aggregator.collect()).unwrap();
    let second = serde_json::to_value(aggregator.collect()).unwrap();

    let keys = |v: &serde_json::Value| {
        v.as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect::<Vec<_>>()
    };
    assert_eq!(keys(&first), keys(&second));
    assert_eq!(keys(&first["cpu"]), keys(&second["cpu"]));
}

#[test]
fn test_history_from_snapshot_without_gpu() {
    let snapshot = aggregator(None).collect();
    let mut history = HistoryStore::new();
    history.record_snapshot(&snapshot);

    assert_eq!(history.series(ComponentKind::Cpu), vec![42.0]);
    assert_eq!(history.series(ComponentKind::Ram), vec![60.0]);
    assert_eq!(history.series(ComponentKind::Disk), vec![75.0]);
    assert!(history.series(ComponentKind::Gpu).is_empty());
}

#[test]
fn test_out_of_range_readings_are_clamped() {
    let aggregator = Aggregator::new(
        vec![
            fixed(ComponentKind::Cpu, Some(cpu(f32::NAN))),
            fixed(ComponentKind::Ram, Some(memory(4, 8))),
            fixed(ComponentKind::Disk, Some(disks(100))),
        ],
        Duration::from_secs(1),
    );

    let snapshot = aggregator.collect();
    assert_complete(&snapshot);
    assert_eq!(snapshot.cpu.raw_usage, 0.0);
    assert_eq!(snapshot.disk.main_metric, 100.0);
}
