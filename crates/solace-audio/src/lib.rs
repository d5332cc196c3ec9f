#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unsafe_code)]

mod audio_thread;
pub mod controller;
pub mod delivery;
mod error;
pub mod events;
pub mod fade;
pub mod generation;
pub mod output;
mod rodio_output;
pub mod scheduler;
pub mod session;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// ============================================================================
// Public API
// ============================================================================

pub use controller::{AudioSessionController, DUCK_FACTOR, Ducking};
pub use delivery::{Delivery, DeliveryOutcome, SpeechDeliveryPipeline};
pub use error::AudioError;
pub use events::SessionEvent;
pub use fade::{CROSSFADE_STEPS, CROSSFADE_WINDOW, FadeCurve};
pub use generation::SessionToken;
pub use output::{AudioOutput, BackgroundTrack, OneShot, PlaybackDoneCallback};
pub use rodio_output::RodioOutput;
pub use scheduler::{EncouragementScheduler, SchedulerState, SchedulerStats, TickHandler};
pub use session::{AmbientSession, AmbientSessionBuilder};

#[cfg(test)]
use tokio_test as _;
