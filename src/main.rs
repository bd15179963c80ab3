use std::path::PathBuf;

use anyhow::Result;
use clap::{arg, command, value_parser, ArgAction, Command};
use httpreplay::replay::replay_workload;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbosity: u8) {
    let fallback = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .init();
}

fn main() -> Result<()> {
    let cmd = Command::new("httpreplay")
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            command!("run")
                .about("replay the requests of a workload file")
                .arg(
                    arg!(<FILE> "workload file")
                        .help("workload file listing one request per line")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    arg!(-s --server <URL>)
                        .help("Base URL the workload URIs are joined onto")
                        .required(true)
                        .value_parser(value_parser!(String)),
                )
                .arg(
                    arg!(-l --"loop")
                        .help("Restart from the first request after the last")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    arg!(-n --calls <COUNT>)
                        .help("Stop after issuing COUNT calls")
                        .value_parser(value_parser!(u64)),
                )
                .arg(
                    arg!(-v --verbose ...)
                        .help("Increase log detail - repeat for more")
                        .action(ArgAction::Count),
                ),
        );

    let matches = cmd.get_matches();
    let result = match matches.subcommand() {
        Some(("run", matches)) => {
            init_tracing(matches.get_count("verbose"));
            replay_workload(
                matches.get_one::<PathBuf>("FILE").unwrap(),
                matches.get_one::<String>("server").unwrap(),
                matches.get_flag("loop"),
                matches.get_one::<u64>("calls").copied(),
            )
        }
        _ => unreachable!("this should've been prevented"),
    };
    return result;
}
