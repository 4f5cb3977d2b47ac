use std::io;
use std::time::Duration;
use thiserror::Error;

/// Error type for telemetry collection
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No source produced a battery reading. Expected on desktops.
    #[error("no battery data found")]
    NoBatteryData,

    #[error("battery collection failed: {0}")]
    BatteryCollection(String),

    /// The host sensor facility itself is unusable on this platform.
    #[error("Sensors unavailable: {0}")]
    SensorsUnavailable(String),
}

/// Why a bounded external command produced no output.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("{program}: command not found")]
    NotFound { program: String },

    #[error("{program} exited with {status}")]
    Failed { program: String, status: String },

    #[error("{program} did not finish within {deadline:?}")]
    TimedOut { program: String, deadline: Duration },

    #[error("failed to run {program}: {source}")]
    Io { program: String, source: io::Error },
}

/// Result type alias for telemetry operations
pub type Result<T> = std::result::Result<T, TelemetryError>;

impl TelemetryError {
    /// Create a battery collection error carrying fault details
    pub fn battery_collection<S: Into<String>>(msg: S) -> Self {
        TelemetryError::BatteryCollection(msg.into())
    }

    pub fn sensors_unavailable<S: Into<String>>(msg: S) -> Self {
        TelemetryError::SensorsUnavailable(msg.into())
    }

    /// True for the "nothing to report" outcome, as opposed to a failure.
    pub fn is_no_data(&self) -> bool {
        matches!(self, TelemetryError::NoBatteryData)
    }
}

impl ProbeError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProbeError::TimedOut { .. })
    }
}
