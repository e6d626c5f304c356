//! confenv - inspect configuration files as flat key/value pairs.
//!
//! Responsibilities:
//! - Parse arguments and install the tracing subscriber.
//! - Dispatch to the command implementations.
//! - Map failures to structured exit codes.

mod args;
mod commands;
mod error;

use args::Cli;
use clap::Parser;
use commands::run_command;
use error::ExitCodeExt;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.log_json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Err(e) = run_command(&cli, &mut out) {
        eprintln!("Error: {:#}", e);
        std::process::exit(e.exit_code().as_i32());
    }
}
