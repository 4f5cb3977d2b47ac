//! Telemetry command handlers.
//!
//! Each subcommand runs one collection on a current-thread runtime and
//! prints the result; `snapshot --watch` repeats on an interval.

use anyhow::{Context, Result};
use clap::ArgMatches;
use std::path::PathBuf;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::core::config::TelemetryConfig;
use crate::core::telemetry::TelemetryCollector;
use crate::ui::health_formatters;

pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => TelemetryConfig::load_from(path),
        None => TelemetryConfig::load()?,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start telemetry runtime")?;

    runtime.block_on(run(matches, config))
}

async fn run(matches: &ArgMatches, config: TelemetryConfig) -> Result<()> {
    let collector = TelemetryCollector::with_config(config);
    log::debug!("Collecting telemetry in {:?}", collector.env());

    match matches.subcommand() {
        Some(("battery", sub)) => {
            let batteries = collector.collect_batteries().await;
            let batteries = match batteries {
                Ok(batteries) => batteries,
                Err(e) if e.is_no_data() => Vec::new(),
                Err(e) => return Err(e.into()),
            };
            if sub.get_flag("json") {
                println!("{}", serde_json::to_string(&batteries)?);
            } else if batteries.is_empty() {
                println!("No battery detected");
            } else {
                health_formatters::print_batteries(&batteries);
            }
        }
        Some(("thermal", sub)) => {
            let thermal = collector.collect_thermal().await;
            if sub.get_flag("json") {
                println!("{}", serde_json::to_string(&thermal)?);
            } else {
                health_formatters::print_thermal(&thermal);
            }
        }
        Some(("sensors", sub)) => {
            let sensors = collector
                .collect_sensors()
                .context("Failed to query host sensors")?;
            if sub.get_flag("json") {
                println!("{}", serde_json::to_string(&sensors)?);
            } else {
                health_formatters::print_sensors(&sensors);
            }
        }
        Some(("snapshot", sub)) => {
            let json = sub.get_flag("json");
            match sub.get_one::<u64>("watch").copied() {
                Some(interval_ms) => watch(&collector, interval_ms, json).await?,
                None => print_snapshot(&collector, json).await?,
            }
        }
        _ => println!("Use 'hwpulse --help' for more information."),
    }

    Ok(())
}

async fn print_snapshot(collector: &TelemetryCollector, json: bool) -> Result<()> {
    let snapshot = collector.snapshot().await;
    if json {
        println!("{}", serde_json::to_string(&snapshot)?);
    } else {
        health_formatters::print_snapshot(&snapshot);
    }
    Ok(())
}

/// Collects on every tick until Ctrl-C.
async fn watch(collector: &TelemetryCollector, interval_ms: u64, json: bool) -> Result<()> {
    let mut ticker = interval(Duration::from_millis(interval_ms.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => print_snapshot(collector, json).await?,
            _ = &mut shutdown => break,
        }
    }

    Ok(())
}
