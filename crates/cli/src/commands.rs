//! Command implementations.
//!
//! Responsibilities:
//! - Resolve the effective format for the selected file.
//! - Run `detect`, `flatten`, and `get` and write their output.
//!
//! Invariants:
//! - Commands never modify the process environment; `get` loads into an
//!   isolated `MemoryStore`.
//! - Output goes to the provided writer; logs go to stderr.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use confenv::{
    ConfigFormat, ConfigHandle, KeyValueStore, MemoryStore, detect_format, load_flat,
};

use crate::args::{Cli, Commands, OutputFormat};
use crate::error::KeyNotFound;

/// The format given with `--format`, or the one detected from the path.
pub fn resolve_format(path: &Path, explicit: Option<&str>) -> Result<ConfigFormat> {
    match explicit {
        Some(name) => Ok(name.parse::<ConfigFormat>()?),
        None => Ok(detect_format(path)),
    }
}

/// Run the selected subcommand, writing its output to `out`.
pub fn run_command(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let format = resolve_format(&cli.file, cli.format.as_deref())?;
    tracing::debug!(path = %cli.file.display(), %format, "Resolved config format");

    match &cli.command {
        Commands::Detect => {
            writeln!(out, "{format}")?;
        }
        Commands::Flatten { output } => {
            let flat = load_flat(&cli.file, format)
                .with_context(|| format!("Failed to load {}", cli.file.display()))?;

            match output {
                OutputFormat::Text => {
                    for (key, value) in &flat {
                        writeln!(out, "{key}={value}")?;
                    }
                }
                OutputFormat::Json => {
                    serde_json::to_writer_pretty(&mut *out, &flat)?;
                    writeln!(out)?;
                }
            }
        }
        Commands::Get { key, default } => {
            let handle = ConfigHandle::try_with_format(&cli.file, format, MemoryStore::new())
                .with_context(|| format!("Failed to load {}", cli.file.display()))?;

            if default.is_none() && !handle.store().contains(key) {
                return Err(KeyNotFound {
                    key: key.clone(),
                    file: cli.file.display().to_string(),
                }
                .into());
            }

            writeln!(out, "{}", handle.str(key, default.as_deref()))?;
        }
    }

    Ok(())
}
