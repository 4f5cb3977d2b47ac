use colored::Colorize;

use crate::core::telemetry::{
    BatteryStatus, SensorReading, TelemetrySnapshot, ThermalStatus, THERMAL_LEVEL_ESTIMATE,
};

pub fn print_snapshot(snapshot: &TelemetrySnapshot) {
    match &snapshot.battery_error {
        Some(error) => {
            print_section_header("Battery");
            println!("  {}", error.dimmed());
        }
        None => print_batteries(&snapshot.batteries),
    }

    print_thermal(&snapshot.thermal);

    match &snapshot.sensor_error {
        Some(error) => {
            print_section_header("Sensors");
            println!("  {}", error.red());
        }
        None => print_sensors(&snapshot.sensors),
    }
    println!();
}

fn print_section_header(title: &str) {
    println!("\n{}", title.bold().green());
    println!("{}", "-".repeat(title.len()));
}

pub fn print_batteries(batteries: &[BatteryStatus]) {
    print_section_header("Battery");

    for (index, battery) in batteries.iter().enumerate() {
        if batteries.len() > 1 {
            println!("  {}", format!("Battery {}", index).cyan().bold());
        }

        println!(
            "  Charge: {} {}",
            create_charge_bar(battery.percent, 20),
            format!("{:.0}%", battery.percent).bold()
        );
        println!("  Status: {}", format_state(&battery.status));

        if !battery.time_left.is_empty() {
            println!("  Time Remaining: {}", battery.time_left);
        }
        if !battery.health.is_empty() {
            println!("  Condition: {}", battery.health);
        }
        if battery.cycle_count > 0 {
            println!("  Cycle Count: {}", battery.cycle_count);
        }
    }
}

pub fn print_thermal(thermal: &ThermalStatus) {
    print_section_header("Thermal");

    match thermal.cpu_temp_celsius() {
        Some(celsius) => {
            let source = thermal.cpu_temp_source.as_deref().unwrap_or("unknown");
            let note = if source == THERMAL_LEVEL_ESTIMATE {
                " (approximate)".yellow().to_string()
            } else {
                String::new()
            };
            println!(
                "  CPU Temperature: {:.1}°C{} {}",
                celsius,
                note,
                format!("via {}", source).dimmed()
            );
        }
        None => println!("  CPU Temperature: {}", "unavailable".dimmed()),
    }

    match thermal.fan_rpm() {
        Some(rpm) => println!("  Fan Speed: {} RPM", rpm),
        None => println!("  Fan Speed: {}", "unavailable".dimmed()),
    }
}

pub fn print_sensors(sensors: &[SensorReading]) {
    print_section_header("Sensors");

    if sensors.is_empty() {
        println!("  {}", "No sensors reported".dimmed());
        return;
    }

    let width = label_column_width(sensors);
    for sensor in sensors {
        println!(
            "  {:<width$}  {:>6.1}{}",
            sensor.label,
            sensor.value,
            sensor.unit,
            width = width
        );
    }
}

/// Width of the label column, in chars to match `{:<width$}` padding.
fn label_column_width(sensors: &[SensorReading]) -> usize {
    sensors
        .iter()
        .map(|s| s.label.chars().count())
        .max()
        .unwrap_or(0)
}

fn format_state(status: &str) -> colored::ColoredString {
    match status.to_lowercase().as_str() {
        "charging" | "charged" | "full" => status.green(),
        "discharging" => status.yellow(),
        _ => status.normal(),
    }
}

/// Charge bar made of block characters
fn create_charge_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64) as usize;
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
