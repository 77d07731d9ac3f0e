//! Command-line interface for roundabouts.

use clap::{Parser, Subcommand};
use roundabouts::EventFormat;

/// Roundabouts - two players, one board, eight loops
#[derive(Parser, Debug)]
#[command(name = "roundabouts")]
#[command(about = "Play Roundabouts in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a two-player game on this terminal
    Play {
        /// Path to the session config (defaults are used if it is missing)
        #[arg(short, long, default_value = "roundabouts.toml")]
        config: std::path::PathBuf,

        /// Override the long-move tick in milliseconds
        #[arg(long)]
        tick_ms: Option<u64>,

        /// Override the event output format
        #[arg(long, value_enum)]
        format: Option<EventFormat>,
    },

    /// List the eight loops and their endpoints
    Connectors,
}
