use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Probe deadlines and source locations for telemetry collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// `pmset -g batt`
    pub power_cli_timeout_ms: u64,
    /// `system_profiler SPPowerDataType`, used for health and fan speed
    pub power_report_timeout_ms: u64,
    /// `osx-cpu-temp`
    pub cpu_temp_tool_timeout_ms: u64,
    /// `powermetrics` thermal sampler
    pub powermetrics_timeout_ms: u64,
    /// `sysctl` thermal level
    pub thermal_level_timeout_ms: u64,
    /// Directory holding `BAT*/capacity` pseudo-files
    pub power_supply_dir: PathBuf,
    /// Attach condition and cycle count to power CLI readings
    pub battery_health: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            power_cli_timeout_ms: 1000,
            power_report_timeout_ms: 2000,
            cpu_temp_tool_timeout_ms: 500,
            powermetrics_timeout_ms: 2000,
            thermal_level_timeout_ms: 500,
            power_supply_dir: PathBuf::from("/sys/class/power_supply"),
            battery_health: true,
        }
    }
}

impl TelemetryConfig {
    /// Load from the user config directory, falling back to defaults.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Ok(Self::load_from(&config_path))
    }

    /// Load from `path`. A missing, unreadable or corrupted file yields defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) => {
                log::warn!("Failed to read config file {:?}: {}", path, e);
                return Self::default();
            }
        };

        serde_json::from_str(&data).unwrap_or_else(|e| {
            log::warn!("Ignoring corrupted config file {:?}: {}", path, e);
            Self::default()
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(path, data).with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("hwpulse").join("config.json"))
    }

    pub fn power_cli_timeout(&self) -> Duration {
        Duration::from_millis(self.power_cli_timeout_ms)
    }

    pub fn power_report_timeout(&self) -> Duration {
        Duration::from_millis(self.power_report_timeout_ms)
    }

    pub fn cpu_temp_tool_timeout(&self) -> Duration {
        Duration::from_millis(self.cpu_temp_tool_timeout_ms)
    }

    pub fn powermetrics_timeout(&self) -> Duration {
        Duration::from_millis(self.powermetrics_timeout_ms)
    }

    pub fn thermal_level_timeout(&self) -> Duration {
        Duration::from_millis(self.thermal_level_timeout_ms)
    }
}
