//! Custom phrase subcommands.

use std::path::PathBuf;

use clap::Subcommand;

/// Custom phrase command variants.
#[derive(Subcommand)]
pub enum PhrasesCommand {
    /// List custom phrases
    List,
    /// Add a phrase
    Add {
        /// Phrase text
        text: String,
    },
    /// Replace the text of a phrase
    Edit {
        /// Phrase id (see `solace phrases list`)
        id: String,
        /// New text
        text: String,
    },
    /// Remove a phrase
    Remove {
        /// Phrase id
        id: String,
    },
    /// Import phrases from a text file, one per line
    Import {
        /// File to read
        file: PathBuf,
    },
    /// Export phrases, one per line
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
