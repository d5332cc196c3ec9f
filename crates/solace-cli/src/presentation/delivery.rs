//! Rendering of session events.

use solace_audio::{Delivery, DeliveryOutcome, SessionEvent};

/// One line for a delivered encouragement.
pub fn format_delivery(delivery: &Delivery) -> String {
    match &delivery.outcome {
        DeliveryOutcome::Spoken => format!(
            "🗣  {} ({})",
            delivery.text,
            delivery.voice_id.unwrap_or("?")
        ),
        DeliveryOutcome::TextOnly { .. } | DeliveryOutcome::UnknownVoice => {
            format!("💬 {}", delivery.text)
        }
        DeliveryOutcome::Superseded => format!("💬 {} (interrupted)", delivery.text),
    }
}

/// A line for the terminal, or `None` for events that are only logged.
pub fn describe_event(event: &SessionEvent) -> Option<String> {
    match event {
        SessionEvent::BackgroundStarted { sound_id } => Some(format!("♪ Playing {sound_id}")),
        SessionEvent::BackgroundFailed { sound_id, error } => Some(format!(
            "⚠ Could not start {sound_id}: {error}. Continuing without background."
        )),
        SessionEvent::SchedulerArmed { interval_secs } => Some(format!(
            "⏱ Encouragement every {} min",
            interval_secs / 60
        )),
        SessionEvent::Encouragement(delivery) => Some(format_delivery(delivery)),
        SessionEvent::BackgroundStopped | SessionEvent::SchedulerCancelled => None,
    }
}
