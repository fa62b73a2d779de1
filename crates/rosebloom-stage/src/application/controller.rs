//! The stage controller.
//!
//! Owns the timer queue, the live stage runtime and the controller-owned
//! footer run. Every input (an intent or the passage of virtual time) is
//! handled to completion before the next one, and a stage transition always
//! tears the old runtime down before the new one is constructed.

use std::fmt;
use std::sync::Arc;

use rosebloom_core::clock::Clock;
use rosebloom_core::command::Command;
use rosebloom_core::error::DomainError;
use rosebloom_core::event::EventMetadata;
use rosebloom_core::sequence::{Sequence, Sequencer, StepOutcome};
use rosebloom_core::timer::{Fired, TimerQueue};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::domain::commands::SubmitIntent;
use crate::domain::content::Element;
use crate::domain::effects::StageEffect;
use crate::domain::events::{StageEvent, StageEventKind};
use crate::domain::runtime::{RuntimeContext, Signal, StageDetail, StageRuntime, build_runtime};
use crate::domain::stage::Stage;
use crate::domain::storyboard::Storyboard;

/// Whether the controller acted on an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentOutcome {
    /// The live stage accepted the intent.
    Accepted,
    /// The intent does not apply right now; nothing changed.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    NotStarted,
    Running,
    ShutDown,
}

/// Drives the experience from `Intro` to `Memory`.
pub struct StageController {
    clock: Arc<dyn Clock>,
    storyboard: Storyboard,
    queue: TimerQueue<StageEffect>,
    runtime: Option<Box<dyn StageRuntime>>,
    lifecycle: Lifecycle,
    stage: Stage,
    footer_run: Sequence<StageEffect>,
    footer: Sequencer,
    footer_visible: bool,
    correlation_id: Uuid,
    next_sequence: i64,
    uncommitted_events: Vec<StageEvent>,
}

impl fmt::Debug for StageController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageController")
            .field("lifecycle", &self.lifecycle)
            .field("stage", &self.stage)
            .field("now_ms", &self.queue.now_ms())
            .field("pending_timers", &self.queue.len())
            .field("runtime", &self.runtime)
            .finish_non_exhaustive()
    }
}

impl StageController {
    /// Creates a controller over the authored storyboard.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if the authored storyboard fails validation.
    pub fn new(clock: Arc<dyn Clock>) -> Result<Self, DomainError> {
        Self::with_storyboard(clock, Storyboard::authored()?)
    }

    /// Creates a controller over a custom storyboard.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the storyboard fails
    /// [`Storyboard::validate`].
    pub fn with_storyboard(clock: Arc<dyn Clock>, storyboard: Storyboard) -> Result<Self, DomainError> {
        storyboard.validate()?;
        Ok(Self {
            clock,
            footer_run: storyboard.footer.clone(),
            storyboard,
            queue: TimerQueue::new(),
            runtime: None,
            lifecycle: Lifecycle::NotStarted,
            stage: Stage::first(),
            footer: Sequencer::new("controller.footer"),
            footer_visible: false,
            correlation_id: Uuid::nil(),
            next_sequence: 1,
            uncommitted_events: Vec::new(),
        })
    }

    /// Enters the first stage and starts the footer run. Returns `false` if
    /// the controller was already started or has shut down.
    pub fn start(&mut self, correlation_id: Uuid) -> bool {
        if self.lifecycle != Lifecycle::NotStarted {
            warn!(lifecycle = ?self.lifecycle, "start ignored");
            return false;
        }
        self.lifecycle = Lifecycle::Running;
        self.correlation_id = correlation_id;
        info!(%correlation_id, "stage controller started");

        self.footer.start(&mut self.queue, &self.footer_run);
        self.enter(Stage::first());
        true
    }

    /// Delivers a user intent to the live stage.
    pub fn handle_intent(&mut self, command: &SubmitIntent) -> IntentOutcome {
        let intent = command.intent;
        debug!(
            command = command.command_type(),
            correlation_id = %command.correlation_id(),
            %intent,
            "intent received"
        );
        if self.lifecycle != Lifecycle::Running {
            warn!(%intent, lifecycle = ?self.lifecycle, "intent ignored, controller not running");
            return IntentOutcome::Ignored;
        }
        let Some(runtime) = self.runtime.as_mut() else {
            warn!(%intent, "intent ignored, no live stage");
            return IntentOutcome::Ignored;
        };

        let mut emitted = Vec::new();
        let signal = runtime.on_intent(
            intent,
            &mut RuntimeContext {
                queue: &mut self.queue,
                emitted: &mut emitted,
            },
        );
        let stage = runtime.stage();
        if signal != Signal::Ignored {
            self.correlation_id = command.correlation_id;
        }
        self.record(stage, emitted);

        match signal {
            Signal::Ignored => {
                warn!(%intent, %stage, "intent ignored by live stage");
                IntentOutcome::Ignored
            }
            Signal::Handled => {
                debug!(%intent, %stage, "intent handled");
                IntentOutcome::Accepted
            }
            Signal::Complete => {
                info!(%intent, %stage, "stage complete");
                self.advance();
                IntentOutcome::Accepted
            }
        }
    }

    /// Dispatches every timer due at or before `elapsed_ms`, in deadline
    /// order, then moves virtual time to `elapsed_ms`. Returns how many timers
    /// were dispatched.
    pub fn advance_to(&mut self, elapsed_ms: u64) -> usize {
        if self.lifecycle != Lifecycle::Running {
            return 0;
        }
        let mut dispatched = 0;
        while let Some(fired) = self.queue.pop_due(elapsed_ms) {
            dispatched += 1;
            self.dispatch(&fired);
        }
        self.queue.advance_to(elapsed_ms);
        dispatched
    }

    /// Tears down the live stage and the footer run. Further intents and
    /// timers are ignored. Returns how many timers were cancelled.
    pub fn shutdown(&mut self) -> usize {
        if self.lifecycle == Lifecycle::ShutDown {
            return 0;
        }
        let was_running = self.lifecycle == Lifecycle::Running;
        self.lifecycle = Lifecycle::ShutDown;
        if !was_running {
            info!("stage controller shut down before start");
            return 0;
        }

        let cancelled_by_stage = self.exit().unwrap_or_default();
        let cancelled_footer = self.footer.teardown(&mut self.queue);
        let cancelled = cancelled_by_stage + cancelled_footer;
        info!(
            cancelled_timers = cancelled,
            at_ms = self.queue.now_ms(),
            "stage controller shut down"
        );
        cancelled
    }

    /// Earliest pending timer deadline while running.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        match self.lifecycle {
            Lifecycle::Running => self.queue.next_deadline(),
            Lifecycle::NotStarted | Lifecycle::ShutDown => None,
        }
    }

    /// Virtual milliseconds since start.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.queue.now_ms()
    }

    /// The live stage, or `None` before start and after shutdown.
    #[must_use]
    pub fn current_stage(&self) -> Option<Stage> {
        self.runtime.as_ref().map(|runtime| runtime.stage())
    }

    /// Number of timers waiting to fire.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` between `start` and `shutdown`.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    /// Returns `true` once the footer caption has been revealed.
    #[must_use]
    pub fn footer_visible(&self) -> bool {
        self.footer_visible
    }

    /// Stage-specific view state of the live runtime.
    #[must_use]
    pub fn detail(&self) -> StageDetail {
        self.runtime
            .as_ref()
            .map_or(StageDetail::Idle, |runtime| runtime.detail())
    }

    /// Events recorded since the last drain.
    #[must_use]
    pub fn uncommitted_events(&self) -> &[StageEvent] {
        &self.uncommitted_events
    }

    /// Takes the recorded events, leaving the buffer empty.
    pub fn drain_events(&mut self) -> Vec<StageEvent> {
        std::mem::take(&mut self.uncommitted_events)
    }

    fn dispatch(&mut self, fired: &Fired<StageEffect>) {
        if self.footer.acknowledge(fired.handle) != StepOutcome::Foreign {
            self.on_footer(fired.effect);
            return;
        }

        let Some(runtime) = self.runtime.as_mut() else {
            error!(timer = fired.handle.id(), effect = ?fired.effect, "timer fired with no live stage");
            return;
        };
        let mut emitted = Vec::new();
        let signal = runtime.on_timer(
            fired,
            &mut RuntimeContext {
                queue: &mut self.queue,
                emitted: &mut emitted,
            },
        );
        let stage = runtime.stage();
        self.record(stage, emitted);

        match signal {
            Signal::Ignored => {
                error!(
                    timer = fired.handle.id(),
                    effect = ?fired.effect,
                    %stage,
                    "timer fired that the live stage does not own"
                );
            }
            Signal::Handled => {}
            Signal::Complete => {
                info!(%stage, at_ms = fired.at_ms, "stage complete");
                self.advance();
            }
        }
    }

    fn on_footer(&mut self, effect: StageEffect) {
        if effect != StageEffect::Show(Element::Footer) || self.footer_visible {
            return;
        }
        self.footer_visible = true;
        debug!(at_ms = self.queue.now_ms(), "footer shown");
        self.record(
            self.stage,
            vec![StageEventKind::ElementShown {
                element: Element::Footer,
            }],
        );
    }

    fn advance(&mut self) {
        if self.exit().is_none() {
            return;
        }
        let stage = self.stage;
        match stage.next() {
            Some(next) => self.enter(next),
            None => warn!(%stage, "final stage reported completion, staying put"),
        }
    }

    fn enter(&mut self, stage: Stage) {
        let mut runtime = build_runtime(stage, &self.storyboard);
        self.stage = stage;
        let mut emitted = vec![StageEventKind::StageEntered { stage }];
        runtime.enter(&mut RuntimeContext {
            queue: &mut self.queue,
            emitted: &mut emitted,
        });
        info!(
            %stage,
            at_ms = self.queue.now_ms(),
            pending_timers = self.queue.len(),
            "stage entered"
        );
        self.runtime = Some(runtime);
        self.record(stage, emitted);
    }

    /// Tears the live runtime down. Returns the number of timers it
    /// cancelled, or `None` if no stage was live.
    fn exit(&mut self) -> Option<usize> {
        let mut runtime = self.runtime.take()?;
        let stage = runtime.stage();
        let cancelled_timers = runtime.teardown(&mut self.queue);
        info!(%stage, cancelled_timers, at_ms = self.queue.now_ms(), "stage exited");
        self.record(
            stage,
            vec![StageEventKind::StageExited {
                stage,
                cancelled_timers,
            }],
        );
        Some(cancelled_timers)
    }

    fn record(&mut self, stage: Stage, kinds: Vec<StageEventKind>) {
        for kind in kinds {
            let event = StageEvent {
                metadata: EventMetadata {
                    event_id: Uuid::new_v4(),
                    event_type: kind.event_type().to_owned(),
                    sequence_number: self.next_sequence,
                    correlation_id: self.correlation_id,
                    occurred_at: self.clock.now(),
                    elapsed_ms: self.queue.now_ms(),
                },
                stage,
                kind,
            };
            self.next_sequence += 1;
            self.uncommitted_events.push(event);
        }
    }
}
