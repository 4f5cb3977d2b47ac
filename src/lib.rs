// hwpulse Library - Public API

// Re-export error types
pub mod error;
pub use error::{ProbeError, Result, TelemetryError};

// Module declarations
pub mod commands;
pub mod core;
pub mod platform;
pub mod ui;

// Re-export commonly used types
pub use crate::core::config::TelemetryConfig;
pub use crate::core::telemetry::{
    BatteryStatus, ExecEnv, Platform, SensorReading, TelemetryCollector, TelemetrySnapshot,
    ThermalStatus,
};

// Initialize logging; RUST_LOG overrides the default level
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}
