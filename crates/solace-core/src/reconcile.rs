//! Settings reconciliation.
//!
//! Every settings write produces a new [`PlaybackSettings`] snapshot. The
//! audio session does not react to individual fields; it hands the previous
//! and the new snapshot to [`reconcile`] and applies the returned actions in
//! order. Applying the same snapshot twice yields no actions.

use std::time::Duration;

use serde::Serialize;

use crate::settings::PlaybackSettings;

/// What the running session currently holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    /// A background track is current in the controller.
    pub background_active: bool,
    /// The encouragement scheduler is armed.
    pub scheduler_armed: bool,
}

/// A single effect for the session runner to apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionAction {
    /// Crossfade to a new background track.
    StartBackground { sound_id: String, volume: f32 },
    /// Fade out and release the background track.
    StopBackground,
    /// Rescale the live background volume without a ramp.
    SetBackgroundVolume { volume: f32 },
    /// Tear down any armed timer and arm a fresh one.
    ArmScheduler { interval: Duration },
    /// Cancel the armed timer.
    CancelScheduler,
}

/// Compute the actions that move `session` from `old` to `new`.
///
/// - Playback turning on, or the sound changing while playing, starts the
///   background track.
/// - Playback turning on, the sound changing, or the frequency changing
///   while playing re-arms the scheduler. A playing session whose scheduler
///   is not armed is re-armed as well.
/// - A background volume change alone rescales the live volume.
/// - Playback turning off cancels the scheduler first, then stops the track.
#[must_use]
pub fn reconcile(
    old: &PlaybackSettings,
    new: &PlaybackSettings,
    session: SessionState,
) -> Vec<SessionAction> {
    let mut actions = Vec::new();

    if !new.is_playing {
        if old.is_playing || session.scheduler_armed {
            actions.push(SessionAction::CancelScheduler);
        }
        if old.is_playing || session.background_active {
            actions.push(SessionAction::StopBackground);
        }
        return actions;
    }

    let turned_on = !old.is_playing;
    let sound_changed = old.selected_sound != new.selected_sound;
    let frequency_changed =
        old.encouragement_frequency_minutes != new.encouragement_frequency_minutes;

    let restart_background = turned_on || sound_changed;
    if restart_background {
        actions.push(SessionAction::StartBackground {
            sound_id: new.selected_sound.clone(),
            volume: new.background_volume,
        });
    } else if session.background_active
        && (old.background_volume - new.background_volume).abs() > f32::EPSILON
    {
        actions.push(SessionAction::SetBackgroundVolume {
            volume: new.background_volume,
        });
    }

    if restart_background || frequency_changed || !session.scheduler_armed {
        actions.push(SessionAction::ArmScheduler {
            interval: new.encouragement_interval(),
        });
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing() -> PlaybackSettings {
        PlaybackSettings {
            is_playing: true,
            ..Default::default()
        }
    }

    const RUNNING: SessionState = SessionState {
        background_active: true,
        scheduler_armed: true,
    };

    #[test]
    fn test_start_playing_starts_background_and_arms() {
        let actions = reconcile(&PlaybackSettings::default(), &playing(), SessionState::default());
        assert_eq!(
            actions,
            vec![
                SessionAction::StartBackground {
                    sound_id: "nature_birds".to_string(),
                    volume: 0.5,
                },
                SessionAction::ArmScheduler {
                    interval: Duration::from_secs(300),
                },
            ]
        );
    }

    #[test]
    fn test_stop_playing_cancels_then_stops() {
        let actions = reconcile(&playing(), &PlaybackSettings::default(), RUNNING);
        assert_eq!(
            actions,
            vec![SessionAction::CancelScheduler, SessionAction::StopBackground]
        );
    }

    #[test]
    fn test_same_snapshot_is_idempotent() {
        assert!(reconcile(&playing(), &playing(), RUNNING).is_empty());
        assert!(
            reconcile(
                &PlaybackSettings::default(),
                &PlaybackSettings::default(),
                SessionState::default()
            )
            .is_empty()
        );
    }

    #[test]
    fn test_volume_only_change_rescales() {
        let new = PlaybackSettings {
            background_volume: 0.8,
            ..playing()
        };
        assert_eq!(
            reconcile(&playing(), &new, RUNNING),
            vec![SessionAction::SetBackgroundVolume { volume: 0.8 }]
        );
    }

    #[test]
    fn test_volume_change_without_track_is_ignored() {
        let new = PlaybackSettings {
            background_volume: 0.8,
            ..playing()
        };
        let session = SessionState {
            background_active: false,
            scheduler_armed: true,
        };
        assert!(reconcile(&playing(), &new, session).is_empty());
    }

    #[test]
    fn test_frequency_change_rearms_only() {
        let new = PlaybackSettings {
            encouragement_frequency_minutes: 10,
            ..playing()
        };
        assert_eq!(
            reconcile(&playing(), &new, RUNNING),
            vec![SessionAction::ArmScheduler {
                interval: Duration::from_secs(600),
            }]
        );
    }

    #[test]
    fn test_sound_change_crossfades_and_rearms() {
        let new = PlaybackSettings {
            selected_sound: "cafe".to_string(),
            background_volume: 0.9,
            ..playing()
        };
        let actions = reconcile(&playing(), &new, RUNNING);
        assert_eq!(actions.len(), 2);
        assert_eq!(
            actions[0],
            SessionAction::StartBackground {
                sound_id: "cafe".to_string(),
                volume: 0.9,
            }
        );
        assert!(matches!(actions[1], SessionAction::ArmScheduler { .. }));
    }

    #[test]
    fn test_voice_settings_do_not_touch_session() {
        let new = PlaybackSettings {
            voice_volume: 0.1,
            selected_voice: "random".to_string(),
            user_name: "Ada".to_string(),
            ..playing()
        };
        assert!(reconcile(&playing(), &new, RUNNING).is_empty());
    }

    #[test]
    fn test_disarmed_scheduler_is_repaired() {
        let session = SessionState {
            background_active: true,
            scheduler_armed: false,
        };
        assert_eq!(
            reconcile(&playing(), &playing(), session),
            vec![SessionAction::ArmScheduler {
                interval: Duration::from_secs(300),
            }]
        );
    }

    #[test]
    fn test_stopped_session_with_leftovers_is_cleaned() {
        let stopped = PlaybackSettings::default();
        assert_eq!(
            reconcile(&stopped, &stopped, RUNNING),
            vec![SessionAction::CancelScheduler, SessionAction::StopBackground]
        );
    }
}
