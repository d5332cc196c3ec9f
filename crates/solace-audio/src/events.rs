//! Notifications emitted by a running session.

use serde::Serialize;

use crate::delivery::Delivery;

/// Something observable happened inside an [`crate::AmbientSession`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionEvent {
    BackgroundStarted { sound_id: String },
    /// The background could not be acquired; the session keeps running
    /// without it.
    BackgroundFailed { sound_id: String, error: String },
    BackgroundStopped,
    SchedulerArmed { interval_secs: u64 },
    SchedulerCancelled,
    Encouragement(Delivery),
}
