//! `sounds` and `voices` command handlers.

use anyhow::Result;
use solace_core::domain::{sound_categories, sounds_by_category};
use solace_core::{RANDOM_VOICE_ID, VOICE_CHARACTERS};

use crate::bootstrap::CliContext;
use crate::presentation::{marker, print_separator};

/// List the ambient sound catalog grouped by category.
pub async fn sounds(ctx: &CliContext) -> Result<()> {
    let selected = ctx.app().settings().load_or_default().await.selected_sound;

    for category in sound_categories() {
        println!("{category}");
        print_separator(60);
        for sound in sounds_by_category(category) {
            println!(
                "{} {:<14} {:<16} {}",
                marker(sound.id == selected),
                sound.id,
                sound.name,
                sound.description
            );
        }
        println!();
    }
    println!("Use 'solace settings set sound <id>' to change the background.");
    Ok(())
}

/// List voices with their personas.
pub async fn voices(ctx: &CliContext) -> Result<()> {
    let selected = ctx.app().settings().load_or_default().await.selected_voice;

    for voice in VOICE_CHARACTERS {
        println!(
            "{} {:<8} {:<26} {}",
            marker(voice.id == selected),
            voice.id,
            voice.persona,
            voice.persona_description
        );
    }
    println!();
    println!("'{RANDOM_VOICE_ID}' picks a different voice for every encouragement.");
    Ok(())
}
