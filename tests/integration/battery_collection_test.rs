use std::fs;
use std::path::Path;

use hwpulse::core::telemetry::{ExecEnv, RealFs};
use hwpulse::{Platform, TelemetryCollector, TelemetryConfig, TelemetryError};
use tempfile::TempDir;

use super::support::{collector, env, FakeRunner, FakeSensors};

const PMSET_TWO_BATTERIES: &str = "Now drawing from 'Battery Power'\n\
    -InternalBattery-0 (id=4653155)\t87%; discharging; 3:05 remaining present: true\n\
    -InternalBattery-1 (id=4653156)\t41%; discharging; 3:05 remaining present: true\n";

const POWER_REPORT: &str = "Power:\n\n    Battery Information:\n\n      \
    Health Information:\n          Cycle Count: 512\n          Condition: Normal\n";

fn add_battery(root: &Path, name: &str, capacity: &str, status: &str) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("capacity"), capacity).unwrap();
    fs::write(dir.join("status"), status).unwrap();
}

#[tokio::test]
async fn test_power_cli_readings_share_one_health_query() {
    let runner = FakeRunner::new()
        .output("pmset", PMSET_TWO_BATTERIES)
        .output("system_profiler", POWER_REPORT);
    let collector = collector(
        env(Platform::MacOs, false, &["pmset"]),
        runner,
        Path::new("/nonexistent"),
    );

    let batteries = collector.collect_batteries().await.unwrap();

    assert_eq!(batteries.len(), 2);
    assert_eq!(batteries[0].percent, 87.0);
    assert_eq!(batteries[1].percent, 41.0);
    for battery in &batteries {
        assert_eq!(battery.status, "discharging");
        assert_eq!(battery.time_left, "3:05");
        assert_eq!(battery.health, "Normal");
        assert_eq!(battery.cycle_count, 512);
    }
    assert_eq!(collector.runner().calls(), vec!["pmset", "system_profiler"]);
}

#[tokio::test]
async fn test_failed_health_query_leaves_fields_empty() {
    let runner = FakeRunner::new()
        .output("pmset", "-InternalBattery-0 55%; charging; 0:40 remaining")
        .timing_out("system_profiler");
    let collector = collector(
        env(Platform::MacOs, false, &["pmset"]),
        runner,
        Path::new("/nonexistent"),
    );

    let batteries = collector.collect_batteries().await.unwrap();
    assert_eq!(batteries.len(), 1);
    assert_eq!(batteries[0].status, "charging");
    assert!(batteries[0].health.is_empty());
    assert_eq!(batteries[0].cycle_count, 0);
}

#[tokio::test]
async fn test_health_enrichment_can_be_disabled() {
    let runner = FakeRunner::new()
        .output("pmset", "-InternalBattery-0 55%; charging;")
        .forbid("system_profiler");
    let config = TelemetryConfig {
        battery_health: false,
        ..Default::default()
    };
    let collector = TelemetryCollector::from_parts(
        env(Platform::MacOs, false, &["pmset"]),
        runner,
        RealFs,
        FakeSensors(Ok(Vec::new())),
        config,
    );

    let batteries = collector.collect_batteries().await.unwrap();
    assert_eq!(batteries.len(), 1);
    assert!(batteries[0].health.is_empty());
}

#[tokio::test]
async fn test_power_cli_not_installed_is_never_spawned() {
    let runner = FakeRunner::new().forbid("pmset");
    let collector = collector(env(Platform::MacOs, false, &[]), runner, Path::new("/nonexistent"));

    let err = collector.collect_batteries().await.unwrap_err();
    assert!(matches!(err, TelemetryError::NoBatteryData));
}

#[tokio::test]
async fn test_power_cli_timeout_is_treated_as_unavailable() {
    let runner = FakeRunner::new().timing_out("pmset");
    let collector = collector(
        env(Platform::MacOs, false, &["pmset"]),
        runner,
        Path::new("/nonexistent"),
    );

    let err = collector.collect_batteries().await.unwrap_err();
    assert!(err.is_no_data());
}

#[tokio::test]
async fn test_desktop_mac_without_battery() {
    let runner = FakeRunner::new()
        .output("pmset", "Now drawing from 'AC Power'\n")
        .forbid("system_profiler");
    let collector = collector(
        env(Platform::MacOs, false, &["pmset"]),
        runner,
        Path::new("/nonexistent"),
    );

    let err = collector.collect_batteries().await.unwrap_err();
    assert!(err.is_no_data());
}

#[tokio::test]
async fn test_linux_reads_sysfs_without_spawning() {
    let root = TempDir::new().unwrap();
    add_battery(root.path(), "BAT0", "93\n", "Charging\n");
    add_battery(root.path(), "BAT1", "12\n", "Discharging\n");

    let runner = FakeRunner::new().forbid("pmset").forbid("system_profiler");
    let collector = collector(env(Platform::Linux, false, &["pmset"]), runner, root.path());

    let batteries = collector.collect_batteries().await.unwrap();
    assert_eq!(batteries.len(), 2);
    assert_eq!(batteries[0].percent, 93.0);
    assert_eq!(batteries[0].status, "Charging");
    assert_eq!(batteries[1].percent, 12.0);
    assert_eq!(batteries[1].status, "Discharging");
    assert!(batteries.iter().all(|b| b.time_left.is_empty() && b.cycle_count == 0));
}

#[tokio::test]
async fn test_repeated_collection_is_structurally_equal() {
    let root = TempDir::new().unwrap();
    add_battery(root.path(), "BAT0", "70", "Discharging");

    let collector = collector(env(Platform::Linux, false, &[]), FakeRunner::new(), root.path());

    let first = collector.collect_batteries().await.unwrap();
    let second = collector.collect_batteries().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_linux_without_batteries() {
    let root = TempDir::new().unwrap();
    fs::create_dir_all(root.path().join("AC")).unwrap();

    let collector = collector(env(Platform::Linux, false, &[]), FakeRunner::new(), root.path());

    let err = collector.collect_batteries().await.unwrap_err();
    assert!(err.is_no_data());
}

#[tokio::test]
async fn test_unexpected_fault_is_reported_with_detail() {
    let root = TempDir::new().unwrap();
    // A regular file where the power supply directory should be
    let not_a_dir = root.path().join("power_supply");
    fs::write(&not_a_dir, "").unwrap();

    let collector = collector(env(Platform::Linux, false, &[]), FakeRunner::new(), &not_a_dir);

    let err = collector.collect_batteries().await.unwrap_err();
    assert!(matches!(err, TelemetryError::BatteryCollection(_)));
    assert!(!err.is_no_data());
    assert!(err.to_string().starts_with("battery collection failed: sysfs:"));
}

#[tokio::test]
async fn test_battery_failure_does_not_affect_other_categories() {
    let collector = collector(
        ExecEnv::new(Platform::Linux, false, |_: &str| false),
        FakeRunner::new(),
        Path::new("/nonexistent"),
    );

    let snapshot = collector.snapshot().await;
    assert!(snapshot.batteries.is_empty());
    assert!(snapshot.battery_error.is_some());
    assert!(snapshot.sensor_error.is_none());
}
