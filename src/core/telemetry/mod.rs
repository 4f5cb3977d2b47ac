//! Hardware health telemetry collection.
//!
//! Each category (battery, thermal, sensors) walks an ordered chain of
//! sources until one yields data. External utilities run under explicit
//! deadlines, their text output goes through pure parsers, and an
//! unusable source is skipped rather than failing the whole collection.

pub mod availability;
pub mod chain;
mod collector;
pub mod env;
pub mod parsers;
pub mod runner;
pub mod sensors;
pub mod sysfs;
mod types;

pub use availability::{CommandResolver, PathResolver};
pub use chain::{first_success, CommandProbe, Requirement};
pub use collector::{TelemetryCollector, THERMAL_LEVEL_ESTIMATE};
pub use env::{ExecEnv, Platform};
pub use runner::{CommandRunner, TokioRunner};
pub use sensors::{filter_sensor_readings, normalize_label, SensorSource, SysinfoSensors};
pub use sysfs::{RealFs, SysFs};
pub use types::{
    BatteryHealth, BatteryStatus, RawSensorReading, SensorReading, TelemetrySnapshot,
    ThermalStatus, CELSIUS,
};
