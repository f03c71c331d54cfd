use hwpulse::core::system_monitor::{MetricValue, Snapshot};
use hwpulse::error::HwError;
use serde_json::json;

fn payload() -> serde_json::Value {
    json!({
        "cpu": {
            "raw_usage": 12.5,
            "main_metric": 12.5,
            "main_metric_label": "Usage (%)",
            "label_name": "Temp (°C)",
            "label_value": null,
            "model": "Intel(R) Core(TM) i7-8550U",
            "sensors": {
                "coretemp": [
                    { "label": "Package id 0", "current": 47.0, "high": 100.0 },
                    { "label": "Core 0", "current": 45.0 }
                ]
            }
        },
        "ram": {
            "raw_percent": 48.8,
            "main_metric": "7.81GB / 15.52GB",
            "main_metric_label": "Used / Total (GB)",
            "label_name": "Usage (%)",
            "label_value": 48.8,
            "details": "16GB RAM"
        },
        "gpu": null,
        "disk": {
            "main_metric": 63.0,
            "main_metric_label": "Usage (%)",
            "label_name": "Used / Total (GB)",
            "label_value": "300GB / 476GB",
            "model": "NVMe SSD"
        }
    })
}

#[test]
fn test_decodes_minimal_payload() {
    let body = serde_json::to_vec(&payload()).unwrap();
    let snapshot = Snapshot::from_json(&body).unwrap();

    assert!(snapshot.gpu.is_none());
    assert!(snapshot.gpus.is_empty());
    assert_eq!(snapshot.cpu.label_value, None);
    assert_eq!(snapshot.cpu.sensors["coretemp"].len(), 2);
    assert_eq!(
        snapshot.ram.main_metric,
        MetricValue::Text("7.81GB / 15.52GB".to_string())
    );
    assert_eq!(snapshot.disk.mountpoint, "");
}

#[test]
fn test_sensor_order_is_preserved() {
    let body = serde_json::to_vec(&payload()).unwrap();
    let snapshot = Snapshot::from_json(&body).unwrap();
    let labels: Vec<_> = snapshot.cpu.sensors["coretemp"]
        .iter()
        .map(|s| s.label.as_str())
        .collect();
    assert_eq!(labels, vec!["Package id 0", "Core 0"]);
}

#[test]
fn test_missing_component_is_malformed() {
    let mut value = payload();
    value.as_object_mut().unwrap().remove("ram");
    let body = serde_json::to_vec(&value).unwrap();

    let err = Snapshot::from_json(&body).unwrap_err();
    assert!(matches!(err, HwError::MalformedPayload(_)));
    assert!(err.is_transport_failure());
}

#[test]
fn test_partial_gpu_is_rejected() {
    let mut value = payload();
    value["gpu"] = json!({ "name": "RTX" });
    let body = serde_json::to_vec(&value).unwrap();
    assert!(Snapshot::from_json(&body).is_err());
}

#[test]
fn test_out_of_range_percentage_is_invalid() {
    let mut value = payload();
    value["cpu"]["raw_usage"] = json!(180.0);
    let body = serde_json::to_vec(&value).unwrap();

    let err = Snapshot::from_json(&body).unwrap_err();
    assert!(matches!(err, HwError::InvalidSnapshot(_)));
    assert!(err.is_transport_failure());
}

#[test]
fn test_html_error_page_is_malformed() {
    let err = Snapshot::from_json(b"<html>502 Bad Gateway</html>").unwrap_err();
    assert!(matches!(err, HwError::MalformedPayload(_)));
}
