use serde::{Deserialize, Serialize};

/// Unit attached to every sensor reading.
pub const CELSIUS: &str = "°C";

/// One battery as seen by a single collection call.
///
/// `time_left` and `health` are empty and `cycle_count` is 0 when unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatteryStatus {
    pub percent: f64,
    pub status: String,
    pub time_left: String,
    pub health: String,
    pub cycle_count: u32,
}

/// Condition label and cycle count from the power data report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatteryHealth {
    pub condition: String,
    pub cycle_count: u32,
}

/// CPU temperature and fan speed. Zero means "not determined" for both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThermalStatus {
    pub cpu_temp: f64,
    pub fan_speed: u32,
    /// Label of the probe that produced `cpu_temp`, if any.
    pub cpu_temp_source: Option<String>,
}

impl ThermalStatus {
    pub fn cpu_temp_celsius(&self) -> Option<f64> {
        (self.cpu_temp > 0.0).then_some(self.cpu_temp)
    }

    pub fn fan_rpm(&self) -> Option<u32> {
        (self.fan_speed > 0).then_some(self.fan_speed)
    }
}

/// A sensor reading as reported by the host sensor facility, before filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSensorReading {
    pub key: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub label: String,
    pub value: f64,
    pub unit: String,
}

/// Everything one refresh tick collected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub timestamp: i64, // Unix timestamp
    pub batteries: Vec<BatteryStatus>,
    pub battery_error: Option<String>,
    pub thermal: ThermalStatus,
    pub sensors: Vec<SensorReading>,
    pub sensor_error: Option<String>,
}
