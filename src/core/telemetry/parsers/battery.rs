use super::value_after_colon;
use crate::core::telemetry::types::{BatteryHealth, BatteryStatus};

/// Parses `pmset -g batt` style output.
///
/// Health and cycle count are left empty; the collector attaches them.
pub fn parse_power_cli_output(raw: &str) -> Vec<BatteryStatus> {
    let mut batteries = Vec::new();
    let mut time_left = String::new();

    for line in raw.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();

        // "4:12 remaining" - the token before the anchor is the estimate
        if let Some(estimate) = time_remaining(&fields) {
            time_left = estimate.to_string();
        }

        let Some(index) = fields.iter().position(|f| f.contains('%')) else {
            continue;
        };
        let Some(percent) = parse_percent(fields[index]) else {
            continue;
        };
        let status = fields
            .get(index + 1)
            .copied()
            .map(|next| next.strip_suffix(';').unwrap_or(next))
            .filter(|s| !s.is_empty())
            .unwrap_or("Unknown");

        batteries.push(BatteryStatus {
            percent,
            status: status.to_string(),
            time_left: time_left.clone(),
            ..Default::default()
        });
    }

    batteries
}

fn time_remaining<'a>(fields: &[&'a str]) -> Option<&'a str> {
    fields
        .windows(2)
        .filter(|pair| pair[1] == "remaining")
        .map(|pair| pair[0])
        .last()
}

fn parse_percent(token: &str) -> Option<f64> {
    let value = token.strip_suffix(';').unwrap_or(token);
    let value = value.strip_suffix('%').unwrap_or(value);
    value.parse().ok().filter(|v: &f64| v.is_finite())
}

/// Extracts condition and cycle count from a power data report
/// (`system_profiler SPPowerDataType`).
pub fn parse_battery_health(raw: &str) -> BatteryHealth {
    let mut health = BatteryHealth::default();

    for line in raw.lines() {
        let lower = line.to_lowercase();
        if lower.contains("cycle count") {
            if let Some(value) = value_after_colon(line) {
                health.cycle_count = value.parse().unwrap_or(0);
            }
        }
        if lower.contains("condition") {
            if let Some(value) = value_after_colon(line) {
                health.condition = value.to_string();
            }
        }
    }

    health
}
