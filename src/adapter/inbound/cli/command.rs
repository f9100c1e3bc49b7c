//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Betfair-style exchange client: price decoding and race results.
#[derive(Parser, Debug)]
#[command(name = "paddock")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file. Defaults apply when it is missing.
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode compressed market prices into JSON runner records
    Decode(DecodeArgs),

    /// Print the placed runners of a settled market in finishing order
    Winners {
        /// Market id.
        market_id: u32,
    },

    /// Print a runner's finishing position (0 if it did not place)
    Position {
        /// Market id.
        market_id: u32,
        /// Runner name as published in the results.
        runner: String,
    },

    /// Validate the configuration and print a summary
    Check,
}

#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// File holding the compressed string. Reads stdin when omitted.
    pub file: Option<PathBuf>,

    /// Emit one compact JSON document instead of pretty-printing.
    #[arg(long)]
    pub compact: bool,
}
