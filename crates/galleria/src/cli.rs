//! Command-line interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Assemble media albums in Telegram and publish them to Workers KV.
#[derive(Parser, Debug)]
#[command(name = "galleria")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to ./galleria.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands. Without one, `run` is assumed.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Start the bot and the cache reclamation loop
    Run,
    /// Validate configuration and print a summary
    Check,
    /// Print the current publish counter
    Counter,
    /// Run a single cache reclamation cycle
    Reclaim,
}
