//! Static ambient sound catalog.
//!
//! The catalog is immutable at runtime. Exactly one sound is selected at a
//! time; unknown ids resolve to the default entry.

use serde::Serialize;

use crate::settings::DEFAULT_SOUND_ID;

/// A loopable background soundscape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmbientSound {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Icon reference understood by the front end.
    pub icon: &'static str,
    pub category: &'static str,
    /// Remote audio stream that is looped while playing.
    pub stream_url: &'static str,
}

/// Every sound the engine can loop.
pub const AMBIENT_SOUNDS: &[AmbientSound] = &[
    AmbientSound {
        id: "nature_birds",
        name: "Forest Birds",
        description: "Peaceful birdsong",
        icon: "sun",
        category: "Nature",
        stream_url: "https://archive.org/download/various-bird-sounds/birds-in-forest-on-sunny-day-14444.mp3",
    },
    AmbientSound {
        id: "nature_rain",
        name: "Gentle Rain",
        description: "Light rainfall",
        icon: "cloud-rain",
        category: "Nature",
        stream_url: "https://archive.org/download/rain-sounds-gentle-rain-thunderstorms/relaxing-rain-8228.mp3",
    },
    AmbientSound {
        id: "thunder",
        name: "Thunder Storm",
        description: "Distant thunder with rain",
        icon: "cloud-lightning",
        category: "Nature",
        stream_url: "https://archive.org/download/RainSound13/Rain%20Sound%20with%20Thunderstorm.mp3",
    },
    AmbientSound {
        id: "cafe",
        name: "Coffee Shop",
        description: "Busy cafe ambiance",
        icon: "coffee",
        category: "Indoor",
        stream_url: "https://archive.org/download/coffee-shop-sounds-12/Coffee%20Shop%20Sounds%2018.mp3",
    },
    AmbientSound {
        id: "office",
        name: "Office Typing",
        description: "Keyboard sounds",
        icon: "briefcase",
        category: "Indoor",
        stream_url: "https://archive.org/download/SoundsOfTyping/typing.mp3",
    },
    AmbientSound {
        id: "city",
        name: "Rain on Window",
        description: "Cozy indoor rain",
        icon: "home",
        category: "Indoor",
        stream_url: "https://archive.org/download/rain-sounds-gentle-rain-thunderstorms/rain-on-roof-or-window-nature-sounds-8312.mp3",
    },
];

/// Look up a sound by id.
#[must_use]
pub fn sound_by_id(id: &str) -> Option<&'static AmbientSound> {
    AMBIENT_SOUNDS.iter().find(|s| s.id == id)
}

/// The fallback sound used when a selected id is unknown.
#[must_use]
pub fn default_sound() -> &'static AmbientSound {
    sound_by_id(DEFAULT_SOUND_ID).unwrap_or(&AMBIENT_SOUNDS[0])
}

/// Resolve a sound id, falling back to [`default_sound`].
#[must_use]
pub fn resolve_sound(id: &str) -> &'static AmbientSound {
    sound_by_id(id).unwrap_or_else(|| {
        tracing::debug!(sound = %id, "Unknown sound id, using default");
        default_sound()
    })
}

/// Distinct categories, in catalog order.
#[must_use]
pub fn sound_categories() -> Vec<&'static str> {
    let mut categories: Vec<&'static str> = Vec::new();
    for sound in AMBIENT_SOUNDS {
        if !categories.contains(&sound.category) {
            categories.push(sound.category);
        }
    }
    categories
}

/// All sounds in a category.
pub fn sounds_by_category(category: &str) -> impl Iterator<Item = &'static AmbientSound> + '_ {
    AMBIENT_SOUNDS.iter().filter(move |s| s.category == category)
}
