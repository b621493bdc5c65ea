//! Desktop entry point.
//!
//! Startup runs config, connect, ping and schema in order; any failure prints
//! one diagnostic line to stdout and exits with status 1 before a window opens.
//! File logging starts only once the config has been read.

mod app;

use std::process::ExitCode;
use todo_core::{
    default_log_level, init_logging, load_config, open_store, StartupError, DEFAULT_CONFIG_FILE,
};

fn main() -> ExitCode {
    let config = match load_config(DEFAULT_CONFIG_FILE) {
        Ok(config) => config,
        Err(err) => {
            println!("{}", StartupError::Config(err));
            return ExitCode::FAILURE;
        }
    };

    start_logging();

    let gateway = match open_store(&config) {
        Ok(gateway) => gateway,
        Err(err) => {
            println!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match app::run(gateway) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("Error running window: {err}");
            ExitCode::FAILURE
        }
    }
}

fn start_logging() {
    let log_dir = match std::env::current_dir() {
        Ok(dir) => dir.join("logs"),
        Err(err) => {
            eprintln!("logging disabled: cannot resolve working directory: {err}");
            return;
        }
    };

    if let Err(err) = init_logging(default_log_level(), &log_dir.to_string_lossy()) {
        eprintln!("logging disabled: {err}");
    }
}
