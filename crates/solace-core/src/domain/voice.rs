//! Voice characters.
//!
//! `random` is a sentinel, not a real voice. It is resolved to a concrete
//! voice at the moment of use so that repeated triggers vary.

use serde::Serialize;

/// Id of the sentinel voice that picks a concrete voice per delivery.
pub const RANDOM_VOICE_ID: &str = "random";

/// A selectable speaking voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceCharacter {
    pub id: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub persona: &'static str,
    pub persona_description: &'static str,
    /// Voice identifier understood by the synthesis service.
    pub synthesis_voice_id: &'static str,
}

impl VoiceCharacter {
    /// Whether this entry is the `random` sentinel.
    #[must_use]
    pub fn is_random(&self) -> bool {
        self.id == RANDOM_VOICE_ID
    }
}

/// All voices, including the `random` sentinel as the last entry.
pub const VOICE_CHARACTERS: &[VoiceCharacter] = &[
    VoiceCharacter {
        id: "sarah",
        display_name: "Sarah",
        description: "Warm female",
        persona: "Warm & Supportive Friend",
        persona_description: "Like a caring best friend who always knows the right thing to say",
        synthesis_voice_id: "EXAVITQu4vr4xnSDxMaL",
    },
    VoiceCharacter {
        id: "bill",
        display_name: "Bill",
        description: "Calm male",
        persona: "Calm Mentor",
        persona_description: "A steady, reassuring voice of experience and wisdom",
        synthesis_voice_id: "pqHfZKP75CvOlQylNhV4",
    },
    VoiceCharacter {
        id: "george",
        display_name: "George",
        description: "Wise grandfather",
        persona: "Wise Grandfather",
        persona_description: "A gentle, wise soul with life experience and warmth",
        synthesis_voice_id: "JBFqnCBsd6RMkjVDRZzb",
    },
    VoiceCharacter {
        id: "charlie",
        display_name: "Charlie",
        description: "Chill hippy",
        persona: "Chill Hippy Philosopher",
        persona_description: "A relaxed, free-spirited soul with unconventional wisdom",
        synthesis_voice_id: "IKne3meq5aSn9XLyUdCD",
    },
    VoiceCharacter {
        id: RANDOM_VOICE_ID,
        display_name: "Random",
        description: "Mix it up",
        persona: "Random Voice",
        persona_description: "A different voice each time for variety",
        synthesis_voice_id: RANDOM_VOICE_ID,
    },
];

/// Look up a voice (sentinel included) by id.
#[must_use]
pub fn voice_by_id(id: &str) -> Option<&'static VoiceCharacter> {
    VOICE_CHARACTERS.iter().find(|v| v.id == id)
}

/// Voices that can actually be synthesized (sentinel excluded).
pub fn concrete_voices() -> impl Iterator<Item = &'static VoiceCharacter> {
    VOICE_CHARACTERS.iter().filter(|v| !v.is_random())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concrete_voices_exclude_sentinel() {
        assert_eq!(concrete_voices().count(), VOICE_CHARACTERS.len() - 1);
        assert!(concrete_voices().all(|v| v.id != RANDOM_VOICE_ID));
    }

    #[test]
    fn test_lookup() {
        assert_eq!(voice_by_id("george").map(|v| v.display_name), Some("George"));
        assert!(voice_by_id("random").is_some_and(VoiceCharacter::is_random));
        assert!(voice_by_id("nobody").is_none());
    }
}
