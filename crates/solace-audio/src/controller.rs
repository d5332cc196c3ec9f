//! Audio Session Controller.
//!
//! Sole owner of the background track and of the ducking flag. At any instant
//! at most one track is *current*; a replaced track is detached (the
//! reference nulled) before its fade-out begins, so later calls never touch a
//! half torn-down handle.
//!
//! ```text
//!   start(B) while A is current:
//!     A  ──fade out (detached task)──► release
//!     B  ◄─acquire at 0── ramp up to target ──►
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use solace_core::AmbientSound;
use tokio::time::sleep;

use crate::error::AudioError;
use crate::fade::FadeCurve;
use crate::output::{AudioOutput, BackgroundTrack};

/// Background volume multiplier while speech plays.
pub const DUCK_FACTOR: f32 = 0.3;

/// Something that can lower and restore the background volume.
pub trait Ducking: Send + Sync {
    fn duck(&self, active: bool);
}

const fn effective_volume(volume: f32, ducked: bool) -> f32 {
    if ducked { volume * DUCK_FACTOR } else { volume }
}

struct CurrentTrack {
    id: u64,
    sound_id: &'static str,
    track: Arc<dyn BackgroundTrack>,
    /// Un-ducked target volume.
    volume: f32,
}

#[derive(Default)]
struct ControllerState {
    current: Option<CurrentTrack>,
    ducked: bool,
    /// Bumped by every start/stop; an acquisition that finishes under a
    /// different epoch is stale.
    epoch: u64,
    next_id: u64,
}

/// Owns the background audio resource and its volume choreography.
pub struct AudioSessionController {
    output: Arc<dyn AudioOutput>,
    fade: FadeCurve,
    state: Mutex<ControllerState>,
}

impl AudioSessionController {
    /// Create a controller over an audio backend.
    pub fn new(output: Arc<dyn AudioOutput>) -> Self {
        Self {
            output,
            fade: FadeCurve::default(),
            state: Mutex::new(ControllerState::default()),
        }
    }

    /// Override the crossfade curve.
    #[must_use]
    pub const fn with_fade(mut self, fade: FadeCurve) -> Self {
        self.fade = fade;
        self
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Crossfade to `sound` at `volume`.
    ///
    /// The previous track, if any, fades out on a detached task while the
    /// new one is acquired silent and ramped up. On acquisition failure the
    /// controller is left without a current track.
    pub async fn start(&self, sound: &AmbientSound, volume: f32) -> Result<(), AudioError> {
        let (epoch, previous) = {
            let mut state = self.lock();
            state.epoch += 1;
            (state.epoch, state.current.take())
        };
        if let Some(previous) = previous {
            tracing::debug!(sound = previous.sound_id, "Fading out previous background");
            tokio::spawn(fade_out(previous.track, self.fade));
        }

        let track: Arc<dyn BackgroundTrack> =
            match self.output.open_loop(sound.stream_url, 0.0).await {
                Ok(track) => Arc::from(track),
                Err(e) => {
                    tracing::error!(sound = sound.id, error = %e, "Failed to start background audio");
                    return Err(e);
                }
            };

        let id = {
            let mut state = self.lock();
            if state.epoch != epoch {
                drop(state);
                tracing::debug!(sound = sound.id, "Background start superseded during acquisition");
                track.release();
                return Ok(());
            }
            state.next_id += 1;
            let id = state.next_id;
            state.current = Some(CurrentTrack {
                id,
                sound_id: sound.id,
                track,
                volume,
            });
            id
        };
        tracing::info!(sound = sound.id, volume, "Background audio started");

        for progress in self.fade.progress() {
            sleep(self.fade.step_interval()).await;
            let state = self.lock();
            let Some(current) = state.current.as_ref().filter(|c| c.id == id) else {
                return Ok(());
            };
            current
                .track
                .set_volume(effective_volume(current.volume, state.ducked) * progress);
        }
        Ok(())
    }

    /// Fade out and release the current track. No-op without one.
    pub async fn stop(&self) {
        let previous = {
            let mut state = self.lock();
            state.epoch += 1;
            state.current.take()
        };
        let Some(previous) = previous else {
            return;
        };
        fade_out(previous.track, self.fade).await;
        tracing::info!(sound = previous.sound_id, "Background audio stopped");
    }

    /// Release the current track immediately, without a ramp.
    pub fn shutdown(&self) {
        let previous = {
            let mut state = self.lock();
            state.epoch += 1;
            state.current.take()
        };
        if let Some(previous) = previous {
            previous.track.release();
        }
    }

    /// Rescale the live volume immediately, honoring the duck state.
    pub fn set_volume(&self, volume: f32) {
        let mut state = self.lock();
        let ducked = state.ducked;
        if let Some(current) = state.current.as_mut() {
            current.volume = volume;
            current.track.set_volume(effective_volume(volume, ducked));
        }
    }

    /// Record the duck state and rescale the live volume immediately.
    pub fn duck(&self, active: bool) {
        let mut state = self.lock();
        state.ducked = active;
        if let Some(current) = state.current.as_ref() {
            current
                .track
                .set_volume(effective_volume(current.volume, active));
        }
        tracing::debug!(ducked = active, "Background ducking changed");
    }

    /// Whether a track is current.
    pub fn is_active(&self) -> bool {
        self.lock().current.is_some()
    }

    /// Whether speech is lowering the background.
    pub fn is_ducked(&self) -> bool {
        self.lock().ducked
    }

    /// Live volume of the current track.
    pub fn current_volume(&self) -> Option<f32> {
        self.lock().current.as_ref().map(|c| c.track.volume())
    }

    /// Id of the sound that is current.
    pub fn current_sound(&self) -> Option<&'static str> {
        self.lock().current.as_ref().map(|c| c.sound_id)
    }
}

impl Ducking for AudioSessionController {
    fn duck(&self, active: bool) {
        Self::duck(self, active);
    }
}

async fn fade_out(track: Arc<dyn BackgroundTrack>, fade: FadeCurve) {
    let from = track.volume();
    for volume in fade.volumes(from, 0.0).collect::<Vec<_>>() {
        sleep(fade.step_interval()).await;
        track.set_volume(volume);
    }
    track.release();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeOutput;
    use solace_core::sound_by_id;
    use std::time::Duration;

    fn sound(id: &str) -> &'static AmbientSound {
        sound_by_id(id).unwrap()
    }

    fn controller() -> (AudioSessionController, Arc<FakeOutput>) {
        let output = Arc::new(FakeOutput::new());
        (AudioSessionController::new(output.clone()), output)
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_ramps_from_silence() {
        let (controller, output) = controller();
        controller.start(sound("nature_birds"), 0.5).await.unwrap();

        let track = output.track(0);
        let history = track.volume_history();
        assert_eq!(history[0], 0.0);
        assert_eq!(history.len(), 11);
        assert!(history.windows(2).all(|w| w[1] >= w[0]));
        assert!(close(track.volume(), 0.5));
        assert!(controller.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_while_ducked_ramps_to_ducked_level() {
        let (controller, output) = controller();
        controller.duck(true);
        controller.start(sound("nature_birds"), 0.5).await.unwrap();
        assert!(close(output.track(0).volume(), 0.15));
    }

    #[tokio::test(start_paused = true)]
    async fn test_crossfade_keeps_single_current_track() {
        let (controller, output) = controller();
        controller.start(sound("nature_birds"), 0.5).await.unwrap();
        controller.start(sound("cafe"), 0.5).await.unwrap();

        assert_eq!(controller.current_sound(), Some("cafe"));
        // Old track fades out concurrently and is released afterwards.
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(output.track(0).is_released());
        assert!(!output.track(1).is_released());
        assert_eq!(output.live_tracks(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_is_idempotent() {
        let (controller, output) = controller();
        controller.stop().await;

        controller.start(sound("nature_rain"), 0.4).await.unwrap();
        controller.stop().await;
        controller.stop().await;

        assert!(!controller.is_active());
        let track = output.track(0);
        assert!(track.is_released());
        assert!(close(track.volume(), 0.0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_acquisition_leaves_no_track() {
        let output = Arc::new(FakeOutput::new().failing_loops());
        let controller = AudioSessionController::new(output);
        assert!(controller.start(sound("nature_rain"), 0.5).await.is_err());
        assert!(!controller.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_duck_and_set_volume_are_immediate() {
        let (controller, output) = controller();
        controller.start(sound("thunder"), 0.6).await.unwrap();

        controller.duck(true);
        assert!(close(output.track(0).volume(), 0.18));
        controller.set_volume(1.0);
        assert!(close(output.track(0).volume(), 0.3));
        controller.duck(false);
        assert!(close(output.track(0).volume(), 1.0));
        assert!(!controller.is_ducked());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_during_acquisition_discards_track() {
        let output = Arc::new(FakeOutput::new().with_open_delay(Duration::from_millis(200)));
        let controller = Arc::new(AudioSessionController::new(output.clone()));

        let starter = {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move { controller.start(sound("office"), 0.5).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        controller.stop().await;
        starter.await.unwrap().unwrap();

        assert!(!controller.is_active());
        assert!(output.track(0).is_released());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_releases_without_ramp() {
        let (controller, output) = controller();
        controller.start(sound("city"), 0.5).await.unwrap();
        controller.shutdown();
        assert!(output.track(0).is_released());
        assert!(!controller.is_active());
    }
}
