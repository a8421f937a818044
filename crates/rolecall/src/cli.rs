//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Rolecall - self-assignable roles for Discord guilds
#[derive(Parser, Debug)]
#[command(name = "rolecall")]
#[command(about = "Self-assignable roles for Discord guilds", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Settings file (defaults to ./rolecall.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Connect to Discord and serve slash commands
    Run,

    /// Apply pending database migrations
    Migrate,

    /// Print a guild's stored role configuration as JSON
    Show {
        /// Guild identifier
        #[arg(long)]
        guild: String,
    },
}
