use clap::{Arg, Command as ClapCommand, ArgAction};
use std::path::Path;
use std::process;
use log::{error, LevelFilter};

use rasterslice::utils::logger::Logger;
use rasterslice::commands::{CommandFactory, RasterSliceCommandFactory};

fn main() {
    let matches = ClapCommand::new("RasterSlice")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Maurice Schilpp")
        .about("Slice source images into named outputs and keep the leftovers")
        .arg(
            Arg::new("manifest")
                .help("Slice manifest (TOML)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .help("Directory the manifest's source paths are resolved against")
                .value_name("DIR")
                .required(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Directory outputs are written to")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("leftovers")
                .short('l')
                .long("leftovers")
                .help("Directory leftover images are written to")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("check")
                .short('c')
                .long("check")
                .help("Only parse the manifest and report missing inputs")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("keep-going")
                .long("keep-going")
                .help("Continue with the remaining inputs after a failure")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("progress")
                .long("progress")
                .help("Show a progress bar")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Write log records to this file instead of using RUST_LOG")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("report")
                .long("report")
                .help("Write a run report to this file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") { LevelFilter::Debug } else { LevelFilter::Info };
    if let Some(log_file) = matches.get_one::<String>("log-file") {
        if let Err(e) = Logger::init_global_logger(Path::new(log_file), level) {
            eprintln!("Error setting up global logger: {}", e);
            process::exit(1);
        }
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str()))
            .init();
    }

    let logger = match matches.get_one::<String>("report") {
        Some(report) => match Logger::new(Path::new(report)) {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error creating report file: {}", e);
                process::exit(1);
            }
        },
        None => Logger::sink(),
    };

    let factory = RasterSliceCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
