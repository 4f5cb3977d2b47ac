use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Print the result as JSON")
        .action(ArgAction::SetTrue)
}

fn cli() -> Command {
    Command::new("hwpulse")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Point-in-time hardware health telemetry: battery, thermal and sensors")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Read probe settings from this file instead of the user config")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true),
        )
        .subcommand(
            Command::new("battery")
                .about("Show charge, state and health of each battery")
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("thermal")
                .about("Show CPU temperature and fan speed")
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("sensors")
                .about("Show host temperature sensors")
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("snapshot")
                .about("Collect every category at once")
                .arg(json_flag())
                .arg(
                    Arg::new("watch")
                        .short('w')
                        .long("watch")
                        .value_name("MS")
                        .help("Repeat every MS milliseconds until Ctrl-C")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
}

fn main() -> Result<()> {
    hwpulse::init_logging();

    let matches = cli().get_matches();
    hwpulse::commands::health(&matches)
}
