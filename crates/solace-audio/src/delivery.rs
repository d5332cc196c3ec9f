//! Speech Delivery Pipeline.
//!
//! One delivery: select a phrase, duck the background, synthesize, play the
//! clip, restore the background. Every exit path that ducked also un-ducks:
//!
//! | Path | Un-duck |
//! |---|---|
//! | Clip plays to the end | from the completion callback |
//! | Synthesis fails | immediately |
//! | Clip fails to start | immediately |
//! | Session ended meanwhile | by [`SpeechDeliveryPipeline::reset`] at teardown |
//!
//! Failures never escape: the caller always gets text to display.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use solace_core::services::Selection;
use solace_core::{
    CustomPhrase, PlaybackSettings, SpeechSynthesizer, SynthesisRequest, VoiceSettings,
    select_phrase,
};

use crate::controller::Ducking;
use crate::error::AudioError;
use crate::generation::SessionToken;
use crate::output::{AudioOutput, OneShot, PlaybackDoneCallback};

/// How a delivery ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DeliveryOutcome {
    /// The clip is playing.
    Spoken,
    /// Synthesis or playback failed; only text is shown.
    TextOnly { reason: String },
    /// The configured voice id is unknown; synthesis was skipped.
    UnknownVoice,
    /// The session ended while synthesis was in flight.
    Superseded,
}

/// Result of one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    /// Text to surface to the user.
    pub text: String,
    /// The phrase as selected, before personalization. Becomes the next
    /// `last_phrase`.
    pub phrase: String,
    /// Concrete voice used, if any.
    pub voice_id: Option<&'static str>,
    pub outcome: DeliveryOutcome,
}

impl Delivery {
    fn spoken(selection: Selection) -> Self {
        Self {
            text: selection.spoken_text,
            phrase: selection.phrase,
            voice_id: selection.voice.map(|v| v.id),
            outcome: DeliveryOutcome::Spoken,
        }
    }

    fn text_only(selection: Selection, outcome: DeliveryOutcome) -> Self {
        Self {
            text: selection.phrase.clone(),
            phrase: selection.phrase,
            voice_id: selection.voice.map(|v| v.id),
            outcome,
        }
    }

    pub const fn was_spoken(&self) -> bool {
        matches!(self.outcome, DeliveryOutcome::Spoken)
    }
}

/// Clips in flight. An entry is registered before playback starts and holds
/// no handle until `play_once` returns.
type ActiveClips = Arc<Mutex<Vec<(u64, Option<Box<dyn OneShot>>)>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Turns a settings snapshot into one spoken (or displayed) encouragement.
pub struct SpeechDeliveryPipeline {
    ducking: Arc<dyn Ducking>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    output: Arc<dyn AudioOutput>,
    token: SessionToken,
    voice_settings: VoiceSettings,
    rng: Mutex<StdRng>,
    active: ActiveClips,
    next_clip: AtomicU64,
}

impl SpeechDeliveryPipeline {
    pub fn new(
        ducking: Arc<dyn Ducking>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        output: Arc<dyn AudioOutput>,
        token: SessionToken,
    ) -> Self {
        Self {
            ducking,
            synthesizer,
            output,
            token,
            voice_settings: VoiceSettings::default(),
            rng: Mutex::new(StdRng::from_entropy()),
            active: Arc::new(Mutex::new(Vec::new())),
            next_clip: AtomicU64::new(0),
        }
    }

    /// Use a fixed random source (tests, reproducible runs).
    #[must_use]
    pub fn with_rng(self, rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            ..self
        }
    }

    #[must_use]
    pub const fn with_voice_settings(mut self, settings: VoiceSettings) -> Self {
        self.voice_settings = settings;
        self
    }

    /// Deliver one encouragement for `settings` on behalf of `generation`.
    ///
    /// `generation` is the session generation the caller captured when the
    /// work was requested. A stale generation yields a `Superseded` delivery
    /// without ducking or synthesizing.
    pub async fn deliver(
        &self,
        generation: u64,
        settings: &PlaybackSettings,
        custom_phrases: &[CustomPhrase],
        last_phrase: Option<&str>,
    ) -> Delivery {
        let selection = {
            let mut rng = lock(&self.rng);
            select_phrase(settings, custom_phrases, last_phrase, &mut *rng)
        };

        if !self.token.is_current(generation) {
            tracing::debug!(generation, "Session ended before delivery started, skipping");
            return Delivery::text_only(selection, DeliveryOutcome::Superseded);
        }

        let Some(voice) = selection.voice else {
            tracing::warn!(
                voice = %settings.selected_voice,
                "Unknown voice, showing phrase without speech"
            );
            return Delivery::text_only(selection, DeliveryOutcome::UnknownVoice);
        };

        self.ducking.duck(true);

        let request = SynthesisRequest {
            text: selection.spoken_text.clone(),
            voice_id: voice.synthesis_voice_id.to_string(),
            settings: self.voice_settings,
        };
        let result = self.synthesizer.synthesize(&request).await;

        if !self.token.is_current(generation) {
            tracing::debug!(voice = voice.id, "Session ended during synthesis, discarding");
            return Delivery::text_only(selection, DeliveryOutcome::Superseded);
        }

        let audio = match result {
            Ok(audio) => audio,
            Err(e) => {
                self.ducking.duck(false);
                tracing::warn!(voice = voice.id, error = %e, "Falling back to text encouragement");
                return Delivery::text_only(
                    selection,
                    DeliveryOutcome::TextOnly {
                        reason: e.to_string(),
                    },
                );
            }
        };

        match self.start_clip(audio.bytes, settings.voice_volume, generation) {
            Ok(false) => {
                tracing::debug!(voice = voice.id, "Session ended before playback, discarding");
                Delivery::text_only(selection, DeliveryOutcome::Superseded)
            }
            Ok(true) => {
                tracing::info!(voice = voice.id, text = %selection.spoken_text, "Speaking encouragement");
                Delivery::spoken(selection)
            }
            Err(e) => {
                self.ducking.duck(false);
                tracing::warn!(voice = voice.id, error = %e, "Failed to play encouragement");
                Delivery::text_only(
                    selection,
                    DeliveryOutcome::TextOnly {
                        reason: e.to_string(),
                    },
                )
            }
        }
    }

    /// Returns `Ok(false)` when the session moved on and nothing was played.
    fn start_clip(&self, bytes: Vec<u8>, volume: f32, generation: u64) -> Result<bool, AudioError> {
        let clip_id = self.next_clip.fetch_add(1, Ordering::SeqCst);
        let ducking = Arc::clone(&self.ducking);
        let token = self.token.clone();
        let active = Arc::clone(&self.active);

        let on_done: PlaybackDoneCallback = Box::new(move || {
            lock(&active).retain(|(id, _)| *id != clip_id);
            if token.is_current(generation) {
                ducking.duck(false);
                tracing::debug!("Encouragement finished");
            }
        });

        lock(&self.active).push((clip_id, None));
        // `reset` runs after the generation advances, so the entry is either
        // drained by it or caught here.
        if !self.token.is_current(generation) {
            lock(&self.active).retain(|(id, _)| *id != clip_id);
            return Ok(false);
        }
        match self.output.play_once(bytes, volume, on_done) {
            Ok(clip) => {
                let mut active = lock(&self.active);
                if let Some(entry) = active.iter_mut().find(|(id, _)| *id == clip_id) {
                    entry.1 = Some(clip);
                } else if !self.token.is_current(generation) {
                    // Drained by a concurrent `reset` while starting.
                    drop(active);
                    clip.stop();
                    return Ok(false);
                }
                Ok(true)
            }
            Err(e) => {
                lock(&self.active).retain(|(id, _)| *id != clip_id);
                Err(e)
            }
        }
    }

    /// Number of clips still playing.
    pub fn speaking_count(&self) -> usize {
        lock(&self.active).len()
    }

    /// Stop every clip and restore the background. Called at session teardown.
    pub fn reset(&self) {
        let clips: Vec<_> = lock(&self.active).drain(..).collect();
        for clip in clips.iter().filter_map(|(_, clip)| clip.as_ref()) {
            clip.stop();
        }
        self.ducking.duck(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeOutput, RecordingDuck};
    use async_trait::async_trait;
    use mockall::mock;
    use solace_core::{SynthesisError, SynthesizedAudio};

    mock! {
        pub Synth {}

        #[async_trait]
        impl SpeechSynthesizer for Synth {
            async fn synthesize(
                &self,
                request: &SynthesisRequest,
            ) -> Result<SynthesizedAudio, SynthesisError>;
        }
    }

    fn audio() -> SynthesizedAudio {
        SynthesizedAudio {
            bytes: vec![1, 2, 3],
            content_type: Some("audio/mpeg".to_string()),
        }
    }

    struct Rig {
        pipeline: SpeechDeliveryPipeline,
        duck: Arc<RecordingDuck>,
        output: Arc<FakeOutput>,
        token: SessionToken,
    }

    fn rig(synth: MockSynth, output: FakeOutput) -> Rig {
        let duck = Arc::new(RecordingDuck::new());
        let output = Arc::new(output);
        let token = SessionToken::new();
        let pipeline = SpeechDeliveryPipeline::new(
            duck.clone(),
            Arc::new(synth),
            output.clone(),
            token.clone(),
        )
        .with_rng(StdRng::seed_from_u64(42));
        Rig {
            pipeline,
            duck,
            output,
            token,
        }
    }

    impl Rig {
        async fn deliver(
            &self,
            settings: &PlaybackSettings,
            custom: &[CustomPhrase],
            last: Option<&str>,
        ) -> Delivery {
            self.pipeline
                .deliver(self.token.current(), settings, custom, last)
                .await
        }
    }

    fn named_settings() -> PlaybackSettings {
        PlaybackSettings {
            user_name: "Ada".to_string(),
            voice_volume: 0.9,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_success_ducks_until_clip_finishes() {
        let mut synth = MockSynth::new();
        synth
            .expect_synthesize()
            .withf(|req| req.voice_id == "EXAVITQu4vr4xnSDxMaL" && req.text.contains("Ada"))
            .times(1)
            .returning(|_| Ok(audio()));
        let rig = rig(synth, FakeOutput::new());

        let delivery = rig.deliver(&named_settings(), &[], None).await;

        assert!(delivery.was_spoken());
        assert!(delivery.text.contains("Ada"));
        assert_ne!(delivery.text, delivery.phrase);
        assert_eq!(delivery.voice_id, Some("sarah"));
        assert_eq!(rig.duck.calls(), vec![true]);

        let clips = rig.output.clips();
        assert_eq!(clips.len(), 1);
        assert_eq!(clips[0].volume, 0.9);
        assert_eq!(rig.pipeline.speaking_count(), 1);

        assert_eq!(rig.output.finish_all_clips(), 1);
        assert_eq!(rig.duck.calls(), vec![true, false]);
        assert_eq!(rig.pipeline.speaking_count(), 0);
    }

    #[tokio::test]
    async fn test_http_500_returns_plain_phrase_and_restores() {
        let mut synth = MockSynth::new();
        synth.expect_synthesize().times(1).returning(|_| {
            Err(SynthesisError::Status {
                status: 500,
                body: "internal".to_string(),
            })
        });
        let rig = rig(synth, FakeOutput::new());

        let delivery = rig.deliver(&named_settings(), &[], None).await;

        assert!(matches!(delivery.outcome, DeliveryOutcome::TextOnly { .. }));
        assert_eq!(delivery.text, delivery.phrase);
        assert!(!delivery.text.contains("Ada"));
        assert_eq!(rig.duck.calls(), vec![true, false]);
        assert!(rig.output.clips().is_empty());
    }

    #[tokio::test]
    async fn test_playback_failure_restores() {
        let mut synth = MockSynth::new();
        synth.expect_synthesize().returning(|_| Ok(audio()));
        let rig = rig(synth, FakeOutput::new().failing_playback());

        let delivery = rig.deliver(&PlaybackSettings::default(), &[], None).await;

        assert!(matches!(delivery.outcome, DeliveryOutcome::TextOnly { .. }));
        assert_eq!(rig.duck.calls(), vec![true, false]);
    }

    #[tokio::test]
    async fn test_missing_credential_falls_back() {
        let mut synth = MockSynth::new();
        synth
            .expect_synthesize()
            .returning(|_| Err(SynthesisError::MissingCredential));
        let rig = rig(synth, FakeOutput::new());

        let delivery = rig.deliver(&PlaybackSettings::default(), &[], None).await;
        assert!(!delivery.was_spoken());
        assert!(!rig.duck.is_ducked());
    }

    #[tokio::test]
    async fn test_unknown_voice_skips_synthesis_without_ducking() {
        let mut synth = MockSynth::new();
        synth.expect_synthesize().never();
        let rig = rig(synth, FakeOutput::new());

        let settings = PlaybackSettings {
            selected_voice: "nobody".to_string(),
            ..named_settings()
        };
        let delivery = rig.deliver(&settings, &[], None).await;

        assert_eq!(delivery.outcome, DeliveryOutcome::UnknownVoice);
        assert_eq!(delivery.text, delivery.phrase);
        assert!(rig.duck.calls().is_empty());
    }

    #[tokio::test]
    async fn test_stale_completion_does_not_touch_ducking() {
        let mut synth = MockSynth::new();
        synth.expect_synthesize().returning(|_| Ok(audio()));
        let rig = rig(synth, FakeOutput::new());

        rig.deliver(&PlaybackSettings::default(), &[], None).await;
        assert_eq!(rig.duck.calls(), vec![true]);

        // Session ends: generation moves on, teardown resets.
        rig.token.advance();
        rig.pipeline.reset();
        assert_eq!(rig.duck.calls(), vec![true, false]);
        assert!(rig.output.clips()[0].is_stopped());

        // A late completion changes nothing.
        assert!(!rig.output.clips()[0].finish());
        assert_eq!(rig.duck.calls(), vec![true, false]);
    }

    #[tokio::test]
    async fn test_stale_generation_never_ducks_or_synthesizes() {
        let mut synth = MockSynth::new();
        synth.expect_synthesize().never();
        let rig = rig(synth, FakeOutput::new());

        let captured = rig.token.current();
        rig.token.advance();
        let delivery = rig
            .pipeline
            .deliver(captured, &named_settings(), &[], None)
            .await;

        assert_eq!(delivery.outcome, DeliveryOutcome::Superseded);
        assert!(rig.duck.calls().is_empty());
        assert!(rig.output.clips().is_empty());
        assert_eq!(rig.pipeline.speaking_count(), 0);
    }

    #[tokio::test]
    async fn test_last_phrase_is_never_repeated() {
        let mut synth = MockSynth::new();
        synth
            .expect_synthesize()
            .returning(|_| Err(SynthesisError::Transport("offline".to_string())));
        let rig = rig(synth, FakeOutput::new());
        let settings = PlaybackSettings::default();

        let mut last: Option<String> = None;
        for _ in 0..30 {
            let delivery = rig.deliver(&settings, &[], last.as_deref()).await;
            assert_ne!(Some(delivery.phrase.as_str()), last.as_deref());
            last = Some(delivery.phrase);
        }
    }
}
