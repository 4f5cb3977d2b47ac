// UI and formatting module

pub mod health_formatters;

pub use health_formatters::{print_batteries, print_sensors, print_snapshot, print_thermal};
