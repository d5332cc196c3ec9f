//! Phrase selection.
//!
//! Picks the phrase to speak from the custom or built-in pool, avoids
//! repeating the previous phrase, resolves the `random` voice and applies
//! name personalization.
//!
//! Selection is pure apart from its use of randomness. Callers pass the RNG
//! in, so a seeded [`rand::rngs::StdRng`] makes every draw reproducible.
//! The previously spoken phrase is likewise passed in by the caller and the
//! new one is returned in [`Selection::phrase`]; there is no hidden state.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::domain::{
    CustomPhrase, RANDOM_VOICE_ID, VoiceCharacter, builtin_phrases, concrete_voices, voice_by_id,
};
use crate::settings::PlaybackSettings;

/// Where a selected phrase came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhraseSource {
    Custom,
    BuiltIn,
}

/// Result of one selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// The phrase exactly as stored. Becomes the next `last_phrase`.
    pub phrase: String,
    /// The phrase after personalization; this is what gets spoken.
    pub spoken_text: String,
    /// Concrete voice to speak with, or `None` when the configured id is unknown.
    pub voice: Option<&'static VoiceCharacter>,
    pub source: PhraseSource,
}

/// Select a phrase and voice for one encouragement.
///
/// 1. Custom pool when enabled and non-empty, otherwise the built-in table
///    for the current voice mode.
/// 2. Entries equal to `last_phrase` are skipped unless that would leave
///    nothing to pick from.
/// 3. `random` resolves to a concrete voice on every call.
/// 4. A non-blank user name applies one of four personalization templates.
pub fn select_phrase<R: Rng + ?Sized>(
    settings: &PlaybackSettings,
    custom_phrases: &[CustomPhrase],
    last_phrase: Option<&str>,
    rng: &mut R,
) -> Selection {
    let custom: Vec<&str> = if settings.use_custom_phrases {
        custom_phrases.iter().map(|p| p.text.as_str()).collect()
    } else {
        Vec::new()
    };

    let (phrase, source) = match pick_avoiding(&custom, last_phrase, rng) {
        Some(phrase) => (phrase, PhraseSource::Custom),
        None => {
            let table = builtin_phrases(settings.voice_mode);
            // Built-in tables are never empty.
            let phrase = pick_avoiding(table, last_phrase, rng).unwrap_or_default();
            (phrase, PhraseSource::BuiltIn)
        }
    };

    let voice = resolve_voice(&settings.selected_voice, rng);

    let spoken_text = match settings.display_name() {
        Some(name) => personalize(phrase, name, rng),
        None => phrase.to_string(),
    };

    tracing::debug!(?source, voice = voice.map(|v| v.id), "Selected phrase");

    Selection {
        phrase: phrase.to_string(),
        spoken_text,
        voice,
        source,
    }
}

/// Pick uniformly from `pool`, skipping `last` when possible.
///
/// Returns `None` only for an empty pool.
pub fn pick_avoiding<'a, R: Rng + ?Sized>(
    pool: &[&'a str],
    last: Option<&str>,
    rng: &mut R,
) -> Option<&'a str> {
    let filtered: Vec<&'a str> = pool
        .iter()
        .copied()
        .filter(|candidate| Some(*candidate) != last)
        .collect();

    if filtered.is_empty() {
        pool.choose(rng).copied()
    } else {
        filtered.choose(rng).copied()
    }
}

/// Resolve a configured voice id to a concrete voice.
///
/// `random` draws uniformly from the concrete voices on every call.
pub fn resolve_voice<R: Rng + ?Sized>(
    selected: &str,
    rng: &mut R,
) -> Option<&'static VoiceCharacter> {
    if selected == RANDOM_VOICE_ID {
        let voices: Vec<&'static VoiceCharacter> = concrete_voices().collect();
        return voices.choose(rng).copied();
    }
    voice_by_id(selected).filter(|v| !v.is_random())
}

/// Address the phrase to `name` using one of four templates.
pub fn personalize<R: Rng + ?Sized>(phrase: &str, name: &str, rng: &mut R) -> String {
    match rng.gen_range(0..4) {
        0 => format!("{name}, {}", lowercase_first(phrase)),
        1 => format!("Hey {name}, {}", lowercase_first(phrase)),
        2 => format!("{}, {name}.", phrase.strip_suffix('.').unwrap_or(phrase)),
        _ => format!("{name}, {phrase}"),
    }
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
