//! Audio backend port.
//!
//! The controller and the delivery pipeline never talk to an audio device
//! directly. They go through [`AudioOutput`], which hands back owned handles:
//!
//! | Handle | Lifetime |
//! |---|---|
//! | [`BackgroundTrack`] | Looping soundscape; lives until `release` |
//! | [`OneShot`] | One voice clip; finishes on its own or via `stop` |
//!
//! All methods take `&self`; implementations use interior mutability.

use async_trait::async_trait;

use crate::error::AudioError;

/// Callback invoked when a one-shot clip finishes naturally.
pub type PlaybackDoneCallback = Box<dyn FnOnce() + Send + 'static>;

/// A looping background audio resource.
pub trait BackgroundTrack: Send + Sync {
    /// Set the live volume (0.0 - 1.0), effective immediately.
    fn set_volume(&self, volume: f32);

    /// Current live volume.
    fn volume(&self) -> f32;

    /// Stop playback and free the resource. Further calls are no-ops.
    fn release(&self);
}

/// A single voice clip that is playing.
pub trait OneShot: Send + Sync {
    /// Halt playback. The completion callback does not fire afterwards.
    fn stop(&self);
}

/// Abstraction over an audio output device.
#[async_trait]
pub trait AudioOutput: Send + Sync {
    /// Acquire a looping track for `url`, already playing at `volume`.
    async fn open_loop(
        &self,
        url: &str,
        volume: f32,
    ) -> Result<Box<dyn BackgroundTrack>, AudioError>;

    /// Start playing `bytes` once at `volume`. `on_done` fires when the clip
    /// drains on its own.
    fn play_once(
        &self,
        bytes: Vec<u8>,
        volume: f32,
        on_done: PlaybackDoneCallback,
    ) -> Result<Box<dyn OneShot>, AudioError>;
}
