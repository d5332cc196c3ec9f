//! In-memory fakes of the audio, synthesis and phrase ports.
//!
//! Enabled for unit tests and, through the `test-utils` feature, for
//! integration tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use solace_core::{
    CustomPhrase, PhraseRepository, RepositoryError, SpeechSynthesizer, SynthesisError,
    SynthesisRequest, SynthesizedAudio,
};

use crate::controller::Ducking;
use crate::error::AudioError;
use crate::output::{AudioOutput, BackgroundTrack, OneShot, PlaybackDoneCallback};

/// A background track that records every volume it was set to.
pub struct FakeTrack {
    pub url: String,
    history: Mutex<Vec<f32>>,
    released: AtomicBool,
}

impl FakeTrack {
    fn new(url: &str, volume: f32) -> Self {
        Self {
            url: url.to_string(),
            history: Mutex::new(vec![volume]),
            released: AtomicBool::new(false),
        }
    }

    pub fn volume_history(&self) -> Vec<f32> {
        self.history.lock().unwrap().clone()
    }

    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}

impl BackgroundTrack for Arc<FakeTrack> {
    fn set_volume(&self, volume: f32) {
        self.history.lock().unwrap().push(volume);
    }

    fn volume(&self) -> f32 {
        self.history.lock().unwrap().last().copied().unwrap_or_default()
    }

    fn release(&self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

/// A voice clip that finishes only when the test says so.
pub struct FakeClip {
    pub bytes: Vec<u8>,
    pub volume: f32,
    on_done: Mutex<Option<PlaybackDoneCallback>>,
    stopped: AtomicBool,
}

impl FakeClip {
    /// Simulate natural completion. Returns whether the callback fired.
    pub fn finish(&self) -> bool {
        if self.stopped.load(Ordering::SeqCst) {
            return false;
        }
        let callback = self.on_done.lock().unwrap().take();
        callback.is_some_and(|cb| {
            cb();
            true
        })
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

impl OneShot for Arc<FakeClip> {
    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

/// Audio backend that keeps everything in memory.
#[derive(Default)]
pub struct FakeOutput {
    tracks: Mutex<Vec<Arc<FakeTrack>>>,
    clips: Mutex<Vec<Arc<FakeClip>>>,
    fail_loops: bool,
    fail_playback: bool,
    open_delay: Option<Duration>,
}

impl FakeOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `open_loop` fails as if the stream were unreachable.
    #[must_use]
    pub fn failing_loops(mut self) -> Self {
        self.fail_loops = true;
        self
    }

    /// Every `play_once` fails.
    #[must_use]
    pub fn failing_playback(mut self) -> Self {
        self.fail_playback = true;
        self
    }

    /// Delay track acquisition.
    #[must_use]
    pub fn with_open_delay(mut self, delay: Duration) -> Self {
        self.open_delay = Some(delay);
        self
    }

    /// The `index`-th track ever opened.
    pub fn track(&self, index: usize) -> Arc<FakeTrack> {
        Arc::clone(&self.tracks.lock().unwrap()[index])
    }

    pub fn track_count(&self) -> usize {
        self.tracks.lock().unwrap().len()
    }

    /// Tracks not yet released.
    pub fn live_tracks(&self) -> usize {
        self.tracks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| !t.is_released())
            .count()
    }

    pub fn clips(&self) -> Vec<Arc<FakeClip>> {
        self.clips.lock().unwrap().clone()
    }

    /// Finish every clip still playing. Returns how many callbacks fired.
    pub fn finish_all_clips(&self) -> usize {
        self.clips().iter().filter(|clip| clip.finish()).count()
    }
}

#[async_trait]
impl AudioOutput for FakeOutput {
    async fn open_loop(
        &self,
        url: &str,
        volume: f32,
    ) -> Result<Box<dyn BackgroundTrack>, AudioError> {
        if let Some(delay) = self.open_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_loops {
            return Err(AudioError::StreamUnavailable(format!("{url}: unreachable")));
        }
        let track = Arc::new(FakeTrack::new(url, volume));
        self.tracks.lock().unwrap().push(Arc::clone(&track));
        Ok(Box::new(track))
    }

    fn play_once(
        &self,
        bytes: Vec<u8>,
        volume: f32,
        on_done: PlaybackDoneCallback,
    ) -> Result<Box<dyn OneShot>, AudioError> {
        if self.fail_playback {
            return Err(AudioError::Decode("not audio".to_string()));
        }
        let clip = Arc::new(FakeClip {
            bytes,
            volume,
            on_done: Mutex::new(Some(on_done)),
            stopped: AtomicBool::new(false),
        });
        self.clips.lock().unwrap().push(Arc::clone(&clip));
        Ok(Box::new(clip))
    }
}

/// Records every duck transition.
#[derive(Default)]
pub struct RecordingDuck {
    calls: Mutex<Vec<bool>>,
}

impl RecordingDuck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<bool> {
        self.calls.lock().unwrap().clone()
    }

    /// Whether the most recent call left the background ducked.
    pub fn is_ducked(&self) -> bool {
        self.calls.lock().unwrap().last().copied().unwrap_or(false)
    }
}

impl Ducking for RecordingDuck {
    fn duck(&self, active: bool) {
        self.calls.lock().unwrap().push(active);
    }
}

/// Synthesizer that answers every request the same way.
pub struct FakeSynth {
    fail: bool,
    delay: Option<Duration>,
    calls: AtomicUsize,
    requests: Mutex<Vec<SynthesisRequest>>,
}

impl FakeSynth {
    /// Always returns a small audio payload.
    pub fn speaking() -> Self {
        Self {
            fail: false,
            delay: None,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always fails with an HTTP 500.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::speaking()
        }
    }

    /// Answer only after `delay` has passed.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<SynthesisRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for FakeSynth {
    async fn synthesize(
        &self,
        request: &SynthesisRequest,
    ) -> Result<SynthesizedAudio, SynthesisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(SynthesisError::Status {
                status: 500,
                body: "internal error".to_string(),
            });
        }
        Ok(SynthesizedAudio {
            bytes: vec![0xFF, 0xFB, 0x90],
            content_type: Some("audio/mpeg".to_string()),
        })
    }
}

/// Phrase store kept in a vector.
#[derive(Default)]
pub struct MemoryPhraseRepository {
    phrases: Mutex<Vec<CustomPhrase>>,
}

impl MemoryPhraseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_phrases(texts: &[&str]) -> Self {
        Self {
            phrases: Mutex::new(texts.iter().map(|t| CustomPhrase::new(t)).collect()),
        }
    }
}

#[async_trait]
impl PhraseRepository for MemoryPhraseRepository {
    async fn list(&self) -> Result<Vec<CustomPhrase>, RepositoryError> {
        Ok(self.phrases.lock().unwrap().clone())
    }

    async fn insert(&self, phrase: &CustomPhrase) -> Result<(), RepositoryError> {
        self.phrases.lock().unwrap().push(phrase.clone());
        Ok(())
    }

    async fn insert_many(&self, phrases: &[CustomPhrase]) -> Result<(), RepositoryError> {
        self.phrases.lock().unwrap().extend_from_slice(phrases);
        Ok(())
    }

    async fn update_text(&self, id: &str, text: &str) -> Result<(), RepositoryError> {
        let mut phrases = self.phrases.lock().unwrap();
        let phrase = phrases
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("phrase {id}")))?;
        phrase.text = text.to_string();
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        self.phrases.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }
}
