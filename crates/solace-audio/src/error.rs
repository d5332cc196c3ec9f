//! Audio engine error types.

/// Errors raised by audio backends and the session controller.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// A background stream could not be fetched.
    #[error("Background stream unavailable: {0}")]
    StreamUnavailable(String),

    /// Audio bytes could not be decoded.
    #[error("Failed to decode audio: {0}")]
    Decode(String),

    /// Failed to open the audio output device.
    #[error("Failed to open audio output stream: {0}")]
    OutputStream(String),

    /// The dedicated audio thread is gone.
    #[error("Audio thread is no longer running")]
    AudioThreadDied,

    /// A one-shot clip could not be started.
    #[error("Playback failed: {0}")]
    Playback(String),
}
