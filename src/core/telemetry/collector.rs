use std::path::PathBuf;

use super::chain::{first_success, CommandProbe, Requirement};
use super::env::ExecEnv;
use super::parsers::{
    estimate_from_thermal_level, parse_battery_health, parse_cpu_temp_output,
    parse_die_temperature, parse_fan_speed, parse_power_cli_output,
};
use super::runner::{CommandRunner, TokioRunner};
use super::sensors::{filter_sensor_readings, SensorSource, SysinfoSensors};
use super::sysfs::{read_sysfs_batteries, RealFs, SysFs};
use super::types::{BatteryHealth, BatteryStatus, SensorReading, TelemetrySnapshot, ThermalStatus};
use crate::core::config::TelemetryConfig;
use crate::error::{Result, TelemetryError};

/// Label reported when the CPU temperature comes from the thermal level.
pub const THERMAL_LEVEL_ESTIMATE: &str = "thermal-level estimate";

/// Where battery readings can come from, in priority order.
enum BatterySource {
    PowerCli(CommandProbe<Vec<BatteryStatus>>),
    Sysfs(PathBuf),
}

impl BatterySource {
    fn name(&self) -> &'static str {
        match self {
            BatterySource::PowerCli(probe) => probe.label,
            BatterySource::Sysfs(_) => "sysfs",
        }
    }

    fn supported_on(&self, env: &ExecEnv) -> bool {
        match self {
            BatterySource::PowerCli(_) => env.platform.has_power_cli(),
            BatterySource::Sysfs(_) => env.platform.has_sysfs(),
        }
    }
}

/// Collects battery, thermal and sensor telemetry on each call.
///
/// Holds no readings between calls; every entry point builds its result
/// from scratch against the injected environment and capabilities.
pub struct TelemetryCollector<R = TokioRunner> {
    env: ExecEnv,
    runner: R,
    sysfs: Box<dyn SysFs + Send + Sync>,
    sensors: Box<dyn SensorSource + Send + Sync>,
    config: TelemetryConfig,
}

impl TelemetryCollector<TokioRunner> {
    /// Collector for the running host with default configuration
    pub fn new() -> Self {
        Self::with_config(TelemetryConfig::default())
    }

    /// Collector for the running host
    pub fn with_config(config: TelemetryConfig) -> Self {
        Self::from_parts(ExecEnv::detect(), TokioRunner, RealFs, SysinfoSensors, config)
    }
}

impl Default for TelemetryCollector<TokioRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> TelemetryCollector<R> {
    pub fn from_parts<F, S>(
        env: ExecEnv,
        runner: R,
        sysfs: F,
        sensors: S,
        config: TelemetryConfig,
    ) -> Self
    where
        F: SysFs + Send + Sync + 'static,
        S: SensorSource + Send + Sync + 'static,
    {
        Self {
            env,
            runner,
            sysfs: Box::new(sysfs),
            sensors: Box::new(sensors),
            config,
        }
    }

    pub fn env(&self) -> &ExecEnv {
        &self.env
    }

    pub fn config(&self) -> &TelemetryConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Battery readings from the first source that has any.
    ///
    /// Returns [`TelemetryError::NoBatteryData`] when no source has a
    /// battery, or [`TelemetryError::BatteryCollection`] when nothing was
    /// found and at least one source failed unexpectedly.
    pub async fn collect_batteries(&self) -> Result<Vec<BatteryStatus>> {
        let mut faults = Vec::new();

        for source in self.battery_sources() {
            if !source.supported_on(&self.env) {
                continue;
            }

            match self.read_battery_source(&source).await {
                Ok(batteries) if !batteries.is_empty() => return Ok(batteries),
                Ok(_) => log::debug!("{}: no batteries", source.name()),
                Err(e) => {
                    log::warn!("battery source {} failed: {}", source.name(), e);
                    faults.push(format!("{}: {}", source.name(), e));
                }
            }
        }

        if faults.is_empty() {
            Err(TelemetryError::NoBatteryData)
        } else {
            Err(TelemetryError::battery_collection(faults.join("; ")))
        }
    }

    fn battery_sources(&self) -> Vec<BatterySource> {
        vec![
            BatterySource::PowerCli(CommandProbe {
                label: "pmset",
                program: "pmset",
                args: &["-g", "batt"],
                deadline: self.config.power_cli_timeout(),
                requirement: Requirement::OnPath,
                parse: power_cli_batteries,
            }),
            BatterySource::Sysfs(self.config.power_supply_dir.clone()),
        ]
    }

    async fn read_battery_source(&self, source: &BatterySource) -> Result<Vec<BatteryStatus>> {
        match source {
            BatterySource::PowerCli(probe) => {
                let Some(mut batteries) = probe.run(&self.runner, &self.env).await else {
                    return Ok(Vec::new());
                };
                if self.config.battery_health {
                    let health = self.battery_health().await;
                    for battery in &mut batteries {
                        battery.health = health.condition.clone();
                        battery.cycle_count = health.cycle_count;
                    }
                }
                Ok(batteries)
            }
            BatterySource::Sysfs(dir) => read_sysfs_batteries(self.sysfs.as_ref(), dir),
        }
    }

    async fn battery_health(&self) -> BatteryHealth {
        self.power_report_probe(battery_health_report)
            .run(&self.runner, &self.env)
            .await
            .unwrap_or_default()
    }

    fn power_report_probe<T>(&self, parse: fn(&str) -> Option<T>) -> CommandProbe<T> {
        CommandProbe {
            label: "system_profiler",
            program: "system_profiler",
            args: &["SPPowerDataType"],
            deadline: self.config.power_report_timeout(),
            requirement: Requirement::Always,
            parse,
        }
    }

    /// CPU temperature and fan speed; the zero value where unsupported.
    pub async fn collect_thermal(&self) -> ThermalStatus {
        if !self.env.platform.has_power_cli() {
            return ThermalStatus::default();
        }

        let mut thermal = ThermalStatus::default();

        if let Some(rpm) = self
            .power_report_probe(parse_fan_speed)
            .run(&self.runner, &self.env)
            .await
        {
            thermal.fan_speed = rpm;
        }

        if let Some((label, celsius)) =
            first_success(&self.cpu_temp_chain(), &self.runner, &self.env).await
        {
            thermal.cpu_temp = celsius;
            thermal.cpu_temp_source = Some(label.to_string());
        }

        thermal
    }

    fn cpu_temp_chain(&self) -> Vec<CommandProbe<f64>> {
        vec![
            CommandProbe {
                label: "osx-cpu-temp",
                program: "osx-cpu-temp",
                args: &[],
                deadline: self.config.cpu_temp_tool_timeout(),
                requirement: Requirement::OnPath,
                parse: parse_cpu_temp_output,
            },
            // Needs root; without it the tool would prompt or fail slowly
            CommandProbe {
                label: "powermetrics",
                program: "powermetrics",
                args: &["-n", "1", "--samplers", "thermal", "-i", "100"],
                deadline: self.config.powermetrics_timeout(),
                requirement: Requirement::OnPathElevated,
                parse: parse_die_temperature,
            },
            CommandProbe {
                label: THERMAL_LEVEL_ESTIMATE,
                program: "sysctl",
                args: &["-n", "machdep.xcpm.cpu_thermal_level"],
                deadline: self.config.thermal_level_timeout(),
                requirement: Requirement::Always,
                parse: estimate_from_thermal_level,
            },
        ]
    }

    /// Plausible sensor readings. Facility failures propagate as-is.
    pub fn collect_sensors(&self) -> Result<Vec<SensorReading>> {
        let raw = self.sensors.temperatures()?;
        Ok(filter_sensor_readings(raw))
    }

    /// Runs all three collectors; one category failing leaves the others intact.
    pub async fn snapshot(&self) -> TelemetrySnapshot {
        let (batteries, battery_error) = match self.collect_batteries().await {
            Ok(batteries) => (batteries, None),
            Err(e) => (Vec::new(), Some(e.to_string())),
        };

        let thermal = self.collect_thermal().await;

        let (sensors, sensor_error) = match self.collect_sensors() {
            Ok(sensors) => (sensors, None),
            Err(e) => (Vec::new(), Some(e.to_string())),
        };

        TelemetrySnapshot {
            timestamp: chrono::Utc::now().timestamp(),
            batteries,
            battery_error,
            thermal,
            sensors,
            sensor_error,
        }
    }
}

fn power_cli_batteries(raw: &str) -> Option<Vec<BatteryStatus>> {
    Some(parse_power_cli_output(raw)).filter(|batteries| !batteries.is_empty())
}

fn battery_health_report(raw: &str) -> Option<BatteryHealth> {
    Some(parse_battery_health(raw))
}
