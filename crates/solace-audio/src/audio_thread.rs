//! Dedicated audio thread owning the output device.
//!
//! `rodio::OutputStream` is `!Send` on some platforms. It lives on one OS
//! thread for its whole lifetime; the rest of the engine holds an
//! [`AudioThreadHandle`] and asks it for sinks over a channel. Sinks
//! themselves are `Send + Sync` and are used directly by their owners.

use std::sync::{Arc, mpsc};
use std::thread;

use rodio::{OutputStream, Sink};

use crate::error::AudioError;

enum AudioCommand {
    /// Create a fresh sink on the output stream.
    NewSink {
        reply: mpsc::Sender<Result<Arc<Sink>, AudioError>>,
    },

    /// Drop the output stream and exit.
    Shutdown,
}

/// `Send + Sync` proxy to the audio thread.
pub struct AudioThreadHandle {
    cmd_tx: mpsc::Sender<AudioCommand>,
    thread: Option<thread::JoinHandle<()>>,
}

impl AudioThreadHandle {
    /// Spawn the audio thread and open the default output device on it.
    pub fn spawn() -> Result<Self, AudioError> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<AudioCommand>();
        let (init_tx, init_rx) = mpsc::channel::<Result<(), AudioError>>();

        let thread = thread::Builder::new()
            .name("solace-audio".into())
            .spawn(move || Self::run(&cmd_rx, &init_tx))
            .map_err(|e| AudioError::OutputStream(format!("failed to spawn audio thread: {e}")))?;

        init_rx.recv().map_err(|_| AudioError::AudioThreadDied)??;

        Ok(Self {
            cmd_tx,
            thread: Some(thread),
        })
    }

    /// A new sink attached to the output device.
    pub fn new_sink(&self) -> Result<Arc<Sink>, AudioError> {
        let (tx, rx) = mpsc::channel();
        self.cmd_tx
            .send(AudioCommand::NewSink { reply: tx })
            .map_err(|_| AudioError::AudioThreadDied)?;
        rx.recv().map_err(|_| AudioError::AudioThreadDied)?
    }

    fn run(cmd_rx: &mpsc::Receiver<AudioCommand>, init_tx: &mpsc::Sender<Result<(), AudioError>>) {
        let (_stream, handle) = match OutputStream::try_default() {
            Ok(pair) => pair,
            Err(e) => {
                let _ = init_tx.send(Err(AudioError::OutputStream(e.to_string())));
                return;
            }
        };
        if init_tx.send(Ok(())).is_err() {
            return;
        }
        tracing::info!("Audio output initialized on default device");

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                AudioCommand::NewSink { reply } => {
                    let sink = Sink::try_new(&handle)
                        .map(Arc::new)
                        .map_err(|e| AudioError::OutputStream(e.to_string()));
                    let _ = reply.send(sink);
                }
                AudioCommand::Shutdown => break,
            }
        }

        tracing::debug!("Audio thread shutting down");
    }
}

impl Drop for AudioThreadHandle {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(AudioCommand::Shutdown);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}
