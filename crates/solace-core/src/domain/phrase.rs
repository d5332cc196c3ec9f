//! Custom phrases and the built-in phrase tables.

use serde::{Deserialize, Serialize};

use crate::settings::VoiceMode;

/// A user-owned affirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomPhrase {
    pub id: String,
    pub text: String,
    /// Creation time in milliseconds since the Unix epoch.
    pub created_at: i64,
}

impl CustomPhrase {
    /// Create a phrase with a fresh id, stamped now. The text is trimmed.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            id: new_phrase_id(),
            text: text.trim().to_string(),
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Generate a unique phrase id.
#[must_use]
pub fn new_phrase_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

const GENTLE: &[&str] = &[
    "You are doing better than you think.",
    "Take a breath. You are right where you need to be.",
    "Be kind to yourself today.",
    "Every small step still counts.",
    "It is okay to go at your own pace.",
    "You deserve the same care you give to others.",
    "Your effort matters, even when no one sees it.",
    "Rest is part of the work too.",
    "You have handled hard days before, and you will handle this one.",
    "Let this moment be enough.",
    "You are allowed to feel proud of yourself.",
    "Gentle progress is still progress.",
];

const MOTIVATING: &[&str] = &[
    "Keep going, you are building something great.",
    "You have got this. One more push.",
    "Focus on the next step and crush it.",
    "Your momentum is real. Keep it rolling.",
    "Progress beats perfection every single time.",
    "You are stronger than any excuse.",
    "Show up for yourself right now.",
    "Big things are made of small wins like this one.",
    "Stay locked in. You are closer than you think.",
    "Turn this energy into action.",
    "You were made for this challenge.",
    "Finish strong. Future you will thank you.",
];

const CALM: &[&str] = &[
    "Breathe in slowly, and let it all go.",
    "Nothing needs to be rushed right now.",
    "Let your shoulders drop and your jaw relax.",
    "Notice the sounds around you, and settle in.",
    "This moment is quiet, and so are you.",
    "Let each thought drift by like a cloud.",
    "You can return to your breath at any time.",
    "Stillness is always available to you.",
    "Soften your gaze and slow your mind.",
    "There is space here for you to simply be.",
    "Feel the ground beneath you, steady and sure.",
    "Peace is already here, waiting for you.",
];

/// The built-in phrase table for a voice mode. Never empty.
#[must_use]
pub const fn builtin_phrases(mode: VoiceMode) -> &'static [&'static str] {
    match mode {
        VoiceMode::Gentle => GENTLE,
        VoiceMode::Motivating => MOTIVATING,
        VoiceMode::Calm => CALM,
    }
}
