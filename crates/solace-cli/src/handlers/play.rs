//! Play command handler: runs an ambient session until interrupted.
//!
//! The stored settings are the source of truth while playing. They are
//! re-read every few seconds, so `solace settings set ...` from another
//! terminal reaches the running session; setting `playing false` ends it.

use std::time::Duration;

use anyhow::Result;
use solace_audio::AmbientSession;
use solace_core::services::SettingsService;
use solace_core::{PlaybackSettings, SettingsUpdate};
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::describe_event;

/// How often stored settings are checked for changes.
pub const SETTINGS_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Arguments for the play command.
#[derive(Debug, Default)]
pub struct PlayArgs {
    pub sound: Option<String>,
    pub minutes: Option<u32>,
    pub duration: Option<u64>,
}

/// Why the play loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopReason {
    Interrupted,
    DurationElapsed,
    StoppedFromSettings,
}

/// What one settings poll did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PollOutcome {
    Unchanged,
    Applied,
    Stopped,
}

/// Reconcile the session with the stored settings.
///
/// An unreadable store leaves the session on its last applied snapshot.
async fn poll_settings(settings: &SettingsService, session: &AmbientSession) -> PollOutcome {
    let stored = match settings.get().await {
        Ok(stored) => stored,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read settings, keeping current session");
            return PollOutcome::Unchanged;
        }
    };
    if stored == session.applied_settings() {
        return PollOutcome::Unchanged;
    }

    tracing::debug!("Stored settings changed, reconciling");
    let playing = stored.is_playing;
    session.apply(stored).await;
    if playing {
        PollOutcome::Applied
    } else {
        PollOutcome::Stopped
    }
}

/// Execute the play command.
pub async fn execute(ctx: &CliContext, args: PlayArgs) -> Result<()> {
    let update = SettingsUpdate {
        selected_sound: args.sound,
        encouragement_frequency_minutes: args.minutes,
        is_playing: Some(true),
        ..Default::default()
    };
    let (_, settings) = ctx
        .app()
        .settings()
        .update(update)
        .await
        .map_err(CliError::from)?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let session = ctx.open_session(tx)?;
    session.apply(settings).await;
    println!("Press Ctrl+C to stop");

    let deadline = args.duration.map(|secs| Instant::now() + Duration::from_secs(secs));
    let stop_after = async move {
        match deadline {
            Some(deadline) => tokio::time::sleep_until(deadline).await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(stop_after);

    let mut poll = tokio::time::interval(SETTINGS_POLL_INTERVAL);
    poll.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let reason = loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break StopReason::Interrupted,
            () = &mut stop_after => break StopReason::DurationElapsed,
            Some(event) = rx.recv() => {
                if let Some(line) = describe_event(&event) {
                    println!("{line}");
                }
            }
            _ = poll.tick() => {
                if poll_settings(ctx.app().settings(), &session).await == PollOutcome::Stopped {
                    break StopReason::StoppedFromSettings;
                }
            }
        }
    };

    tracing::info!(?reason, "Stopping playback");
    session.stop().await;
    if reason != StopReason::StoppedFromSettings {
        mark_stopped(ctx).await;
    }
    println!("Stopped.");
    Ok(())
}

/// Persist `is_playing = false`. Failures are logged; the session is
/// already down.
async fn mark_stopped(ctx: &CliContext) {
    let update = SettingsUpdate {
        is_playing: Some(false),
        ..Default::default()
    };
    if let Err(e) = ctx.app().settings().update(update).await {
        tracing::warn!(error = %e, "Failed to record stopped playback");
    }
}

/// Settings used for a one-off delivery: the stored snapshot, never playing.
pub fn idle_snapshot(stored: PlaybackSettings) -> PlaybackSettings {
    PlaybackSettings {
        is_playing: false,
        ..stored
    }
}
