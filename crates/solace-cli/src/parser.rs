//! Root CLI parser and global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Ambient soundscapes with spoken encouragement.
#[derive(Parser)]
#[command(name = "solace")]
#[command(about = "Ambient soundscapes with spoken encouragement")]
#[command(version)]
pub struct Cli {
    /// Override the data directory (database and .env) for this invocation
    #[arg(long = "data-dir", global = true, env = "SOLACE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
