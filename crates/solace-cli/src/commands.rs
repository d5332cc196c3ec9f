//! Top-level commands.

use clap::Subcommand;

use crate::phrase_commands::PhrasesCommand;
use crate::settings_commands::SettingsCommand;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Play the background soundscape with scheduled encouragements
    Play {
        /// Background sound id (see `solace sounds`); saved to settings
        #[arg(short, long)]
        sound: Option<String>,
        /// Minutes between encouragements; saved to settings
        #[arg(short, long)]
        minutes: Option<u32>,
        /// Stop automatically after this many seconds
        #[arg(short, long)]
        duration: Option<u64>,
    },

    /// Speak a single encouragement now
    Encourage,

    /// List the ambient sound catalog
    Sounds,

    /// List the available voices
    Voices,

    /// View or change playback settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },

    /// Manage custom phrases
    Phrases {
        #[command(subcommand)]
        command: PhrasesCommand,
    },

    /// Show resolved data paths
    Paths,
}
