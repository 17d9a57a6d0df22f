//! `hmm` command-line entry point.
//!
//! # Responsibility
//! - Parse arguments, load config and start file logging.
//! - Map every failure to one `hmm: <error>` line and exit code 1.

mod args;
mod commands;
mod editor;
mod error;

use clap::Parser;
use error::CliError;
use hammock_core::{init_logging, HammockConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = args::Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=command module=cli status=error error={err}");
            error::report(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: args::Args) -> Result<(), CliError> {
    let config = HammockConfig::load()?;
    start_logging(&config);
    let cwd = std::env::current_dir()?;
    let mut out = std::io::stdout().lock();
    commands::dispatch(args, &config, &cwd, &mut out)
}

/// Logging is best effort; the command still runs without it.
fn start_logging(config: &HammockConfig) {
    let Some(log_dir) = config.effective_log_dir() else {
        return;
    };
    if let Err(err) = init_logging(&config.effective_log_level(), &log_dir) {
        eprintln!("hmm: warning: logging disabled: {err}");
    }
}
