//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `commands` module).

use clap::{Parser, Subcommand, ValueEnum};
use confenv::DEFAULT_CONFIG_FILE;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "confenv")]
#[command(about = "Inspect env, JSON, and YAML configuration files as flat key/value pairs", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  confenv --file config.yaml flatten\n  confenv -f app.json flatten --output json\n  confenv -f .env get DATABASE_URL --default sqlite://local.db\n  confenv -f settings.conf --format yaml detect\n"
)]
pub struct Cli {
    /// Configuration file to read
    #[arg(short, long, global = true, env = "CONFENV_FILE", default_value = DEFAULT_CONFIG_FILE, value_name = "FILE")]
    pub file: PathBuf,

    /// Force a format (env, json, yaml) instead of detecting it from the extension
    #[arg(long, global = true, env = "CONFENV_FORMAT", value_name = "NAME")]
    pub format: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit log lines as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the format the file would be parsed as
    Detect,

    /// Print every key/value pair the file produces
    Flatten {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// Print a single value
    Get {
        /// Store key, e.g. DATABASE_HOST for `database.host`
        key: String,

        /// Value to print when the key is missing or empty
        #[arg(short, long)]
        default: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// One KEY=VALUE line per entry
    Text,
    /// A single JSON object
    Json,
}
