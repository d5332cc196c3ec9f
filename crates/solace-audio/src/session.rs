//! Ambient session: the effect runner behind every settings snapshot.
//!
//! [`AmbientSession::apply`] receives each new [`PlaybackSettings`], asks
//! [`reconcile`] what changed and drives the controller, the scheduler and
//! the delivery pipeline accordingly. The session owns all three plus the
//! last spoken phrase; dropping it releases everything at once.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use rand::rngs::StdRng;
use solace_core::services::PhraseLibrary;
use solace_core::{
    PhraseRepository, PlaybackSettings, SessionAction, SessionState, SpeechSynthesizer,
    reconcile, resolve_sound,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::controller::AudioSessionController;
use crate::delivery::{Delivery, SpeechDeliveryPipeline};
use crate::events::SessionEvent;
use crate::fade::FadeCurve;
use crate::generation::SessionToken;
use crate::output::AudioOutput;
use crate::scheduler::{EncouragementScheduler, SchedulerState, TickHandler};

#[derive(Default)]
struct Shared {
    /// Last snapshot handed to `apply`.
    applied: PlaybackSettings,
    last_phrase: Option<String>,
}

struct SessionInner {
    controller: Arc<AudioSessionController>,
    scheduler: EncouragementScheduler,
    delivery: SpeechDeliveryPipeline,
    phrases: PhraseLibrary,
    token: SessionToken,
    shared: Mutex<Shared>,
    events: Option<UnboundedSender<SessionEvent>>,
}

impl SessionInner {
    fn shared(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: SessionEvent) {
        let Some(tx) = &self.events else {
            return;
        };
        if tx.send(event).is_err() {
            tracing::trace!("Session event receiver dropped");
        }
    }

    /// One delivery on behalf of `generation`.
    async fn encourage(&self, generation: u64) -> Delivery {
        let (settings, last_phrase) = {
            let shared = self.shared();
            (shared.applied.clone(), shared.last_phrase.clone())
        };
        let custom = if settings.use_custom_phrases {
            self.phrases.list_or_empty().await
        } else {
            Vec::new()
        };

        let delivery = self
            .delivery
            .deliver(generation, &settings, &custom, last_phrase.as_deref())
            .await;

        self.shared().last_phrase = Some(delivery.phrase.clone());
        self.emit(SessionEvent::Encouragement(delivery.clone()));
        delivery
    }
}

impl Drop for SessionInner {
    fn drop(&mut self) {
        self.token.advance();
        self.scheduler.cancel();
        self.delivery.reset();
        self.controller.shutdown();
    }
}

/// Builder for [`AmbientSession`].
pub struct AmbientSessionBuilder {
    output: Arc<dyn AudioOutput>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    phrases: Arc<dyn PhraseRepository>,
    fade: FadeCurve,
    rng: Option<StdRng>,
    events: Option<UnboundedSender<SessionEvent>>,
}

impl AmbientSessionBuilder {
    #[must_use]
    pub const fn fade(mut self, fade: FadeCurve) -> Self {
        self.fade = fade;
        self
    }

    /// Seed phrase and voice selection.
    #[must_use]
    pub fn rng(mut self, rng: StdRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Receive [`SessionEvent`]s on `tx`.
    #[must_use]
    pub fn events(mut self, tx: UnboundedSender<SessionEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    pub fn build(self) -> AmbientSession {
        let token = SessionToken::new();
        let controller =
            Arc::new(AudioSessionController::new(Arc::clone(&self.output)).with_fade(self.fade));
        let mut delivery = SpeechDeliveryPipeline::new(
            controller.clone(),
            self.synthesizer,
            self.output,
            token.clone(),
        );
        if let Some(rng) = self.rng {
            delivery = delivery.with_rng(rng);
        }

        AmbientSession {
            inner: Arc::new(SessionInner {
                controller,
                scheduler: EncouragementScheduler::new(),
                delivery,
                phrases: PhraseLibrary::new(self.phrases),
                token,
                shared: Mutex::new(Shared::default()),
                events: self.events,
            }),
        }
    }
}

/// A playback session driven by settings snapshots.
pub struct AmbientSession {
    inner: Arc<SessionInner>,
}

impl AmbientSession {
    pub fn builder(
        output: Arc<dyn AudioOutput>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        phrases: Arc<dyn PhraseRepository>,
    ) -> AmbientSessionBuilder {
        AmbientSessionBuilder {
            output,
            synthesizer,
            phrases,
            fade: FadeCurve::default(),
            rng: None,
            events: None,
        }
    }

    /// Reconcile the session with a new settings snapshot.
    ///
    /// Returns the actions that were applied, in order. Background failures
    /// are logged and reported as events; they never fail the call.
    pub async fn apply(&self, settings: PlaybackSettings) -> Vec<SessionAction> {
        let inner = &self.inner;
        let previous = std::mem::replace(&mut inner.shared().applied, settings.clone());

        if previous.is_playing != settings.is_playing {
            let generation = inner.token.advance();
            tracing::debug!(generation, playing = settings.is_playing, "Session generation advanced");
        }

        let state = SessionState {
            background_active: inner.controller.is_active(),
            scheduler_armed: inner.scheduler.is_armed(),
        };
        let actions = reconcile(&previous, &settings, state);

        for action in &actions {
            self.execute(action).await;
        }

        if previous.is_playing && !settings.is_playing {
            inner.delivery.reset();
            tracing::info!("Session stopped");
        }

        actions
    }

    async fn execute(&self, action: &SessionAction) {
        let inner = &self.inner;
        match action {
            SessionAction::StartBackground { sound_id, volume } => {
                let sound = resolve_sound(sound_id);
                if sound.id != sound_id.as_str() {
                    tracing::warn!(requested = %sound_id, using = sound.id, "Unknown sound, using default");
                }
                match inner.controller.start(sound, *volume).await {
                    Ok(()) => inner.emit(SessionEvent::BackgroundStarted {
                        sound_id: sound.id.to_string(),
                    }),
                    Err(e) => inner.emit(SessionEvent::BackgroundFailed {
                        sound_id: sound.id.to_string(),
                        error: e.to_string(),
                    }),
                }
            }
            SessionAction::StopBackground => {
                inner.controller.stop().await;
                inner.emit(SessionEvent::BackgroundStopped);
            }
            SessionAction::SetBackgroundVolume { volume } => {
                inner.controller.set_volume(*volume);
            }
            SessionAction::ArmScheduler { interval } => {
                inner.scheduler.arm(*interval, self.tick_handler());
                inner.emit(SessionEvent::SchedulerArmed {
                    interval_secs: interval.as_secs(),
                });
            }
            SessionAction::CancelScheduler => {
                inner.scheduler.cancel();
                inner.emit(SessionEvent::SchedulerCancelled);
            }
        }
    }

    /// Each tick spawns one delivery and does not wait for it.
    ///
    /// The generation is captured when the tick fires, so a spawned delivery
    /// that only starts running after a stop is dropped.
    fn tick_handler(&self) -> TickHandler {
        let weak: Weak<SessionInner> = Arc::downgrade(&self.inner);
        Arc::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let generation = inner.token.current();
            tokio::spawn(async move {
                inner.encourage(generation).await;
            });
        })
    }

    /// Deliver one encouragement right away, outside the schedule.
    pub async fn encourage_now(&self) -> Delivery {
        let generation = self.inner.token.current();
        self.inner.encourage(generation).await
    }

    /// Apply the current snapshot with playback turned off.
    pub async fn stop(&self) -> Vec<SessionAction> {
        let settings = PlaybackSettings {
            is_playing: false,
            ..self.applied_settings()
        };
        self.apply(settings).await
    }

    pub fn applied_settings(&self) -> PlaybackSettings {
        self.inner.shared().applied.clone()
    }

    pub fn last_phrase(&self) -> Option<String> {
        self.inner.shared().last_phrase.clone()
    }

    pub fn is_background_active(&self) -> bool {
        self.inner.controller.is_active()
    }

    /// Id of the background sound that is playing.
    pub fn current_sound(&self) -> Option<&'static str> {
        self.inner.controller.current_sound()
    }

    pub fn background_volume(&self) -> Option<f32> {
        self.inner.controller.current_volume()
    }

    pub fn is_ducked(&self) -> bool {
        self.inner.controller.is_ducked()
    }

    pub fn scheduler_state(&self) -> SchedulerState {
        self.inner.scheduler.state()
    }

    /// Scheduler ticks since the session was created.
    pub fn tick_count(&self) -> u64 {
        self.inner.scheduler.tick_count()
    }

    /// Voice clips still playing.
    pub fn speaking_count(&self) -> usize {
        self.inner.delivery.speaking_count()
    }
}
