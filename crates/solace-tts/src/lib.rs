#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// ElevenLabsSynthesizer is meant to be used through the SpeechSynthesizer
// port, not its internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod models;

// ============================================================================
// Public API
// ============================================================================

pub use client::ElevenLabsSynthesizer;
pub use config::{API_KEY_ENV, BASE_URL_ENV, MODEL_ENV, TtsClientConfig};
pub use error::{TtsError, TtsResult};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
