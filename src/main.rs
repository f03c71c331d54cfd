use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use log::LevelFilter;
use std::net::SocketAddr;

use hwpulse::commands;

fn build_cli() -> Command {
    Command::new("hwpulse")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Local hardware telemetry collector")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("serve")
                .about("Run the snapshot server (GET /api/hwinfo, POST /api/exit)")
                .arg(
                    Arg::new("bind")
                        .short('b')
                        .long("bind")
                        .value_name("ADDR")
                        .help("Address to listen on")
                        .default_value("127.0.0.1:8000")
                        .value_parser(clap::value_parser!(SocketAddr)),
                )
                .arg(
                    Arg::new("probe-timeout")
                        .long("probe-timeout")
                        .value_name("MS")
                        .help("Time budget for one collection across all probes")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("monitor")
                .about("Live terminal dashboard for a snapshot server")
                .arg(
                    Arg::new("url")
                        .short('u')
                        .long("url")
                        .value_name("URL")
                        .help("Server base URL (defaults to the saved preference)"),
                )
                .arg(
                    Arg::new("floor")
                        .long("floor")
                        .value_name("MS")
                        .help("Poll interval after a success")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("ceiling")
                        .long("ceiling")
                        .value_name("MS")
                        .help("Longest delay between retries")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("timeout")
                        .long("timeout")
                        .value_name("MS")
                        .help("Request timeout for one fetch")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("list")
                        .long("list")
                        .help("Start in list layout")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("snapshot")
                .about("Collect one snapshot locally and print it as JSON")
                .arg(
                    Arg::new("pretty")
                        .short('p')
                        .long("pretty")
                        .help("Pretty-print the JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("bar")
                .about("Print status-bar JSON lines (text, tooltip, class, percentage)")
                .arg(
                    Arg::new("interval")
                        .short('i')
                        .long("interval")
                        .value_name("MS")
                        .help("Delay between lines")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("once")
                        .long("once")
                        .help("Print a single line and exit")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("serve", sub_matches)) => {
            hwpulse::init_logging(LevelFilter::Info);
            commands::serve(sub_matches)
        }
        Some(("monitor", sub_matches)) => {
            // Log lines would corrupt the alternate screen
            hwpulse::init_logging(LevelFilter::Error);
            commands::monitor(sub_matches)
        }
        Some(("snapshot", sub_matches)) => {
            hwpulse::init_logging(LevelFilter::Warn);
            commands::snapshot(sub_matches)
        }
        Some(("bar", sub_matches)) => {
            hwpulse::init_logging(LevelFilter::Warn);
            commands::bar(sub_matches)
        }
        _ => {
            println!("Use 'hwpulse --help' for more information.");
            Ok(())
        }
    }
}
