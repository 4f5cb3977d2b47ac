//! Host temperature sensors via `sysinfo`.

use sysinfo::Components;

use super::types::{RawSensorReading, SensorReading, CELSIUS};
use crate::error::{Result, TelemetryError};

/// Highest plausible reading; anything above is a bogus sensor.
pub const MAX_PLAUSIBLE_READING: f64 = 150.0;

/// Prefix some SMC sensor keys carry.
const SENSOR_KEY_PREFIX: &str = "TC";

/// Source of raw sensor readings.
pub trait SensorSource {
    /// Fails only when the facility itself is unusable on this host.
    fn temperatures(&self) -> Result<Vec<RawSensorReading>>;
}

/// Reads the components `sysinfo` knows about.
#[derive(Debug, Clone, Copy, Default)]
pub struct SysinfoSensors;

impl SensorSource for SysinfoSensors {
    fn temperatures(&self) -> Result<Vec<RawSensorReading>> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(TelemetryError::sensors_unavailable(
                "host sensors are not supported on this platform",
            ));
        }

        let components = Components::new_with_refreshed_list();
        Ok(components
            .iter()
            .filter_map(|component| {
                // Components without a temperature have nothing to report
                let celsius = component.temperature()?;
                Some(RawSensorReading {
                    key: component.label().to_string(),
                    value: f64::from(celsius),
                })
            })
            .collect())
    }
}

/// Drops implausible readings and normalizes labels.
///
/// Every returned value lies in `(0, 150]`; NaN is dropped too.
pub fn filter_sensor_readings(raw: Vec<RawSensorReading>) -> Vec<SensorReading> {
    raw.into_iter()
        .filter(|reading| is_plausible(reading.value))
        .map(|reading| SensorReading {
            label: normalize_label(&reading.key),
            value: reading.value,
            unit: CELSIUS.to_string(),
        })
        .collect()
}

fn is_plausible(value: f64) -> bool {
    value > 0.0 && value <= MAX_PLAUSIBLE_READING
}

/// `"TCXC_PROC"` becomes `"XC PROC"`.
pub fn normalize_label(key: &str) -> String {
    let key = key.trim();
    let key = key.strip_prefix(SENSOR_KEY_PREFIX).unwrap_or(key);
    key.replace('_', " ")
}
