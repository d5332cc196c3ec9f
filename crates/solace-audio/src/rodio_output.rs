//! [`AudioOutput`] backed by the default output device.
//!
//! Background streams are downloaded in full, decoded and looped forever on
//! their own sink. Voice clips get a sink each plus a watcher thread that
//! fires the completion callback when the sink drains.

use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use rodio::{Decoder, Sink};

use crate::audio_thread::AudioThreadHandle;
use crate::error::AudioError;
use crate::output::{AudioOutput, BackgroundTrack, OneShot, PlaybackDoneCallback};

/// Audio backend using `rodio`.
pub struct RodioOutput {
    audio: AudioThreadHandle,
    http: reqwest::Client,
}

impl RodioOutput {
    /// Open the default output device.
    pub fn new() -> Result<Self, AudioError> {
        Ok(Self {
            audio: AudioThreadHandle::spawn()?,
            http: reqwest::Client::new(),
        })
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, AudioError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| AudioError::StreamUnavailable(format!("{url}: {e}")))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AudioError::StreamUnavailable(format!("{url}: {e}")))?;
        tracing::debug!(url, size = bytes.len(), "Fetched background stream");
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl AudioOutput for RodioOutput {
    async fn open_loop(
        &self,
        url: &str,
        volume: f32,
    ) -> Result<Box<dyn BackgroundTrack>, AudioError> {
        let bytes = self.fetch(url).await?;
        let source =
            Decoder::new_looped(Cursor::new(bytes)).map_err(|e| AudioError::Decode(e.to_string()))?;

        let sink = self.audio.new_sink()?;
        sink.set_volume(volume);
        sink.append(source);
        Ok(Box::new(RodioTrack { sink }))
    }

    fn play_once(
        &self,
        bytes: Vec<u8>,
        volume: f32,
        on_done: PlaybackDoneCallback,
    ) -> Result<Box<dyn OneShot>, AudioError> {
        let source = Decoder::new(Cursor::new(bytes)).map_err(|e| AudioError::Decode(e.to_string()))?;

        let sink = self
            .audio
            .new_sink()
            .map_err(|e| AudioError::Playback(e.to_string()))?;
        sink.set_volume(volume);
        sink.append(source);

        let stopped = Arc::new(AtomicBool::new(false));
        let watcher_sink = Arc::clone(&sink);
        let watcher_stopped = Arc::clone(&stopped);
        std::thread::Builder::new()
            .name("solace-clip".into())
            .spawn(move || {
                watcher_sink.sleep_until_end();
                if !watcher_stopped.swap(true, Ordering::SeqCst) {
                    on_done();
                }
            })
            .map_err(|e| AudioError::Playback(format!("failed to spawn clip watcher: {e}")))?;

        Ok(Box::new(RodioClip { sink, stopped }))
    }
}

struct RodioTrack {
    sink: Arc<Sink>,
}

impl BackgroundTrack for RodioTrack {
    fn set_volume(&self, volume: f32) {
        self.sink.set_volume(volume.clamp(0.0, 1.0));
    }

    fn volume(&self) -> f32 {
        self.sink.volume()
    }

    fn release(&self) {
        self.sink.stop();
    }
}

struct RodioClip {
    sink: Arc<Sink>,
    stopped: Arc<AtomicBool>,
}

impl OneShot for RodioClip {
    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        self.sink.stop();
    }
}
