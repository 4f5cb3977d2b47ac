use super::value_after_colon;

/// Base of the thermal-level estimate, in °C.
pub const THERMAL_LEVEL_BASE_C: f64 = 45.0;
/// Degrees added per thermal level.
pub const THERMAL_LEVEL_STEP_C: f64 = 0.5;

/// Fan speed in RPM from a power data report.
///
/// Looks at lines mentioning both "fan" and "speed" and reads the leading
/// number after the colon ("Fan Speed: 1200 RPM"). The last such line that
/// carries a number wins.
pub fn parse_fan_speed(raw: &str) -> Option<u32> {
    raw.lines()
        .filter(|line| {
            let lower = line.to_lowercase();
            lower.contains("fan") && lower.contains("speed")
        })
        .filter_map(value_after_colon)
        .filter_map(|value| value.split_whitespace().next()?.parse().ok())
        .last()
}

/// Output of a dedicated CPU temperature utility, e.g. `42.1°C`.
pub fn parse_cpu_temp_output(raw: &str) -> Option<f64> {
    let value = raw.trim();
    let value = value.strip_suffix("°C").unwrap_or(value);
    let value = value.strip_suffix('C').unwrap_or(value);
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|celsius| *celsius > 0.0)
}

/// The "CPU die temperature: 35.43 C" line of a thermal sampler run.
pub fn parse_die_temperature(raw: &str) -> Option<f64> {
    raw.lines()
        .filter(|line| line.contains("CPU die temperature"))
        .filter_map(value_after_colon)
        .find_map(|value| {
            let value = value.strip_suffix(" C").unwrap_or(value);
            value.trim().parse::<f64>().ok()
        })
        .filter(|celsius| *celsius > 0.0)
}

/// Rough CPU temperature from the kernel's thermal level.
///
/// This is an approximation, not a sensor reading: the level is mapped
/// linearly onto `45 + 0.5 * level` °C and the calibration is unverified.
pub fn estimate_from_thermal_level(raw: &str) -> Option<f64> {
    let level: i64 = raw.trim().parse().ok()?;
    (level >= 0).then(|| THERMAL_LEVEL_BASE_C + level as f64 * THERMAL_LEVEL_STEP_C)
}
