//! Parsers for the free-form text printed by external utilities.
//!
//! Every parser is a pure function from text to a typed value or an empty
//! result. None of them assumes a line count or field order beyond the
//! anchor tokens they look for.

mod battery;
mod thermal;

pub use battery::{parse_battery_health, parse_power_cli_output};
pub use thermal::{
    estimate_from_thermal_level, parse_cpu_temp_output, parse_die_temperature, parse_fan_speed,
    THERMAL_LEVEL_BASE_C, THERMAL_LEVEL_STEP_C,
};

/// Text after the first colon of `line`, trimmed.
fn value_after_colon(line: &str) -> Option<&str> {
    line.split_once(':').map(|(_, value)| value.trim())
}
