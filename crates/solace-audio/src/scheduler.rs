//! Encouragement Scheduler.
//!
//! ```text
//!   Idle ──arm──► Armed ──cancel──► Idle
//!                  │  ▲
//!                  └──┘ arm (new interval: old timer torn down first)
//! ```
//!
//! At most one timer exists. The first tick fires one full interval after
//! arming. Each tick calls the handler once and never waits on it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

/// Called on every tick. Must not block; spawn work instead.
pub type TickHandler = Arc<dyn Fn() + Send + Sync + 'static>;

/// Scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Armed { interval: Duration },
}

/// Lifetime counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Timers armed.
    pub armed: u64,
    /// Timers torn down (by cancel or by re-arm).
    pub torn_down: u64,
    /// Ticks delivered to the handler.
    pub ticks: u64,
}

#[derive(Default)]
struct Inner {
    generation: u64,
    interval: Option<Duration>,
    task: Option<JoinHandle<()>>,
    stats: SchedulerStats,
}

impl Inner {
    fn teardown(&mut self) -> bool {
        self.generation += 1;
        self.interval = None;
        match self.task.take() {
            Some(task) => {
                task.abort();
                self.stats.torn_down += 1;
                true
            }
            None => false,
        }
    }
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Repeating encouragement timer.
#[derive(Default)]
pub struct EncouragementScheduler {
    inner: Arc<Mutex<Inner>>,
}

impl EncouragementScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a timer firing every `interval`, replacing any armed one.
    pub fn arm(&self, interval: Duration, on_tick: TickHandler) {
        let interval = interval.max(Duration::from_millis(1));
        let mut inner = lock(&self.inner);
        inner.teardown();
        let generation = inner.generation;
        inner.interval = Some(interval);
        inner.stats.armed += 1;

        let shared = Arc::clone(&self.inner);
        inner.task = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                {
                    let mut inner = lock(&shared);
                    // A tick racing cancellation is dropped here.
                    if inner.generation != generation {
                        break;
                    }
                    inner.stats.ticks += 1;
                }
                on_tick();
            }
        }));
        drop(inner);

        tracing::debug!(interval_secs = interval.as_secs(), "Encouragement scheduler armed");
    }

    /// Cancel the armed timer. No-op when idle.
    pub fn cancel(&self) {
        if lock(&self.inner).teardown() {
            tracing::debug!("Encouragement scheduler cancelled");
        }
    }

    pub fn state(&self) -> SchedulerState {
        lock(&self.inner)
            .interval
            .map_or(SchedulerState::Idle, |interval| SchedulerState::Armed { interval })
    }

    /// Whether a timer is running.
    pub fn is_armed(&self) -> bool {
        matches!(self.state(), SchedulerState::Armed { .. })
    }

    /// Interval of the armed timer.
    pub fn armed_interval(&self) -> Option<Duration> {
        lock(&self.inner).interval
    }

    /// Arm, teardown and tick counters since creation.
    pub fn stats(&self) -> SchedulerStats {
        lock(&self.inner).stats
    }

    pub fn tick_count(&self) -> u64 {
        self.stats().ticks
    }
}

impl Drop for EncouragementScheduler {
    fn drop(&mut self) {
        lock(&self.inner).teardown();
    }
}
