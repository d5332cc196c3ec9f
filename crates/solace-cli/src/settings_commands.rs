//! Settings subcommands.

use clap::{Subcommand, ValueEnum};

/// Settings command variants.
#[derive(Subcommand)]
pub enum SettingsCommand {
    /// Show the current playback settings
    Show {
        /// Print the stored JSON snapshot
        #[arg(long)]
        json: bool,
    },
    /// Change one setting
    Set {
        /// Setting to change
        #[arg(value_enum)]
        field: SettingField,
        /// New value
        value: String,
    },
    /// Reset all settings to defaults
    Reset,
}

/// Settings that can be changed from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SettingField {
    /// Background sound id
    Sound,
    /// Background volume, 0.0-1.0
    BackgroundVolume,
    /// Voice volume, 0.0-1.0
    VoiceVolume,
    /// Voice id or `random`
    Voice,
    /// gentle, motivating or calm
    Mode,
    /// Minutes between encouragements
    Frequency,
    /// Name used to personalize phrases (empty to disable)
    Name,
    /// Prefer custom phrases: true or false
    CustomPhrases,
    /// Whether a running `solace play` keeps playing: true or false
    Playing,
}
