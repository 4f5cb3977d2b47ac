use std::path::Path;

use hwpulse::core::telemetry::{
    filter_sensor_readings, normalize_label, RawSensorReading, RealFs, TelemetryCollector,
};
use hwpulse::{Platform, TelemetryConfig, TelemetryError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::support::{env, FakeRunner, FakeSensors};

fn raw(key: &str, value: f64) -> RawSensorReading {
    RawSensorReading {
        key: key.to_string(),
        value,
    }
}

fn sensor_collector(sensors: FakeSensors) -> TelemetryCollector<FakeRunner> {
    let config = TelemetryConfig {
        power_supply_dir: Path::new("/nonexistent").to_path_buf(),
        ..Default::default()
    };
    TelemetryCollector::from_parts(
        env(Platform::MacOs, false, &[]),
        FakeRunner::new(),
        RealFs,
        sensors,
        config,
    )
}

#[test]
fn test_implausible_values_are_dropped() {
    let collector = sensor_collector(FakeSensors(Ok(vec![
        raw("TCXC_PROC", 36.5),
        raw("TC0P", 0.0),
        raw("TG0D", 151.0),
    ])));

    let readings = collector.collect_sensors().unwrap();
    assert_eq!(readings.len(), 1);
    assert_eq!(readings[0].label, "XC PROC");
    assert_eq!(readings[0].value, 36.5);
    assert_eq!(readings[0].unit, "°C");
}

#[test]
fn test_facility_failure_propagates() {
    let collector = sensor_collector(FakeSensors(Err("SMC not accessible")));

    let err = collector.collect_sensors().unwrap_err();
    match err {
        TelemetryError::SensorsUnavailable(detail) => assert_eq!(detail, "SMC not accessible"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_sensor_failure_is_isolated_in_snapshot() {
    let collector = sensor_collector(FakeSensors(Err("unsupported")));

    let snapshot = collector.snapshot().await;
    assert!(snapshot.sensors.is_empty());
    assert_eq!(
        snapshot.sensor_error.as_deref(),
        Some("Sensors unavailable: unsupported")
    );
}

#[test]
fn test_label_normalization() {
    assert_eq!(normalize_label("TCXC_PROC"), "XC PROC");
    assert_eq!(normalize_label(" TC0P "), "0P");
    assert_eq!(normalize_label("nvme_Composite"), "nvme Composite");
}

#[test]
fn test_random_input_stays_in_range() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..200 {
        let count = rng.gen_range(0..40);
        let input: Vec<RawSensorReading> = (0..count)
            .map(|i| {
                let value = match rng.gen_range(0..10) {
                    0 => 0.0,
                    1 => 150.0,
                    2 => f64::NAN,
                    3 => -rng.gen_range(0.0..1000.0),
                    _ => rng.gen_range(-50.0..400.0),
                };
                raw(&format!("TCsensor_{i}"), value)
            })
            .collect();

        let plausible = input
            .iter()
            .filter(|r| r.value > 0.0 && r.value <= 150.0)
            .count();
        let output = filter_sensor_readings(input);

        assert_eq!(output.len(), plausible);
        for reading in &output {
            assert!(reading.value > 0.0 && reading.value <= 150.0);
            assert!(!reading.label.starts_with("TC"));
        }
    }
}
