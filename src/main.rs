//! Main entry point for tabrecon CLI

use clap::Parser;
use tabrecon::cli::Cli;
use tabrecon::commands::execute_command;
use tabrecon::{config, engine, ReconError};

fn main() {
    let cli = Cli::parse();

    // Initialize logging; --verbose raises the default level to debug
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    config::load_env_file();

    if let Err(e) = engine::init_engine() {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    match execute_command(cli.command, &cli.sides) {
        Ok(()) | Err(ReconError::Cancelled) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
