//! Encourage command handler: one delivery, no background.

use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep};

use crate::bootstrap::CliContext;
use crate::handlers::play::idle_snapshot;
use crate::presentation::format_delivery;

/// Longest wait for a clip to finish before exiting.
const MAX_CLIP_WAIT: Duration = Duration::from_secs(60);

/// Execute the encourage command.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let stored = ctx.app().settings().load_or_default().await;

    let (tx, _rx) = mpsc::unbounded_channel();
    let session = ctx.open_session(tx)?;
    session.apply(idle_snapshot(stored)).await;

    let delivery = session.encourage_now().await;
    println!("{}", format_delivery(&delivery));

    if delivery.was_spoken() {
        let give_up = Instant::now() + MAX_CLIP_WAIT;
        while session.speaking_count() > 0 && Instant::now() < give_up {
            sleep(Duration::from_millis(100)).await;
        }
    }
    Ok(())
}
