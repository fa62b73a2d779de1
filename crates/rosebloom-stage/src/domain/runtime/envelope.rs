//! Envelope and the cinematic wish.

use rosebloom_core::sequence::{Sequence, Sequencer, StepOutcome};
use rosebloom_core::timer::{Fired, TimerQueue};
use serde::Serialize;
use tracing::debug;

use super::{RuntimeContext, Signal, StageDetail, StageRuntime, Visibility};
use crate::domain::commands::Intent;
use crate::domain::content::Element;
use crate::domain::effects::StageEffect;
use crate::domain::events::StageEventKind;
use crate::domain::stage::Stage;
use crate::domain::storyboard::Storyboard;

/// Envelope phase. Each intent is only meaningful in one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopePhase {
    /// Waiting for `Open`.
    Sealed,
    /// Letter visible, waiting for `Continue`.
    Opened,
    /// The cinematic run is playing; the stage completes when it ends.
    Playing,
}

/// Sealed envelope, opened letter, then a cinematic run that ends the stage.
#[derive(Debug)]
pub struct EnvelopeRuntime {
    phase: EnvelopePhase,
    heading_run: Sequence<StageEffect>,
    letter_run: Sequence<StageEffect>,
    cinematic_run: Sequence<StageEffect>,
    heading: Sequencer,
    letter: Sequencer,
    cinematic: Sequencer,
    visible: Visibility,
}

impl EnvelopeRuntime {
    /// Creates the runtime.
    #[must_use]
    pub fn new(storyboard: &Storyboard) -> Self {
        Self {
            phase: EnvelopePhase::Sealed,
            heading_run: storyboard.envelope_heading.clone(),
            letter_run: storyboard.envelope_letter.clone(),
            cinematic_run: storyboard.cinematic.clone(),
            heading: Sequencer::new("envelope.heading"),
            letter: Sequencer::new("envelope.letter"),
            cinematic: Sequencer::new("envelope.cinematic"),
            visible: Visibility::default(),
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> EnvelopePhase {
        self.phase
    }

    fn open(&mut self, ctx: &mut RuntimeContext<'_>) -> Signal {
        self.phase = EnvelopePhase::Opened;
        ctx.emit(StageEventKind::EnvelopeOpened);
        self.visible.hide(Element::EnvelopeTapHint, ctx);
        self.letter.start(ctx.queue, &self.letter_run);
        Signal::Handled
    }

    fn play(&mut self, ctx: &mut RuntimeContext<'_>) -> Signal {
        if self.cinematic.start_if_idle(ctx.queue, &self.cinematic_run).is_none() {
            return Signal::Ignored;
        }
        self.phase = EnvelopePhase::Playing;
        ctx.emit(StageEventKind::CinematicStarted);
        self.visible.show(Element::CinematicOverlay, ctx);
        Signal::Handled
    }
}

impl StageRuntime for EnvelopeRuntime {
    fn stage(&self) -> Stage {
        Stage::Envelope
    }

    fn enter(&mut self, ctx: &mut RuntimeContext<'_>) {
        self.heading.start(ctx.queue, &self.heading_run);
    }

    fn on_intent(&mut self, intent: Intent, ctx: &mut RuntimeContext<'_>) -> Signal {
        match (self.phase, intent) {
            (EnvelopePhase::Sealed, Intent::Open) => self.open(ctx),
            (EnvelopePhase::Opened, Intent::Continue) => self.play(ctx),
            (phase, intent) => {
                debug!(?phase, %intent, "envelope intent ignored");
                Signal::Ignored
            }
        }
    }

    fn on_timer(&mut self, fired: &Fired<StageEffect>, ctx: &mut RuntimeContext<'_>) -> Signal {
        let owned = [&mut self.heading, &mut self.letter, &mut self.cinematic]
            .into_iter()
            .any(|sequencer| sequencer.acknowledge(fired.handle) != StepOutcome::Foreign);
        if !owned {
            return Signal::Ignored;
        }

        match fired.effect {
            StageEffect::Complete => Signal::Complete,
            StageEffect::Show(Element::EnvelopeTapHint) if self.phase != EnvelopePhase::Sealed => {
                Signal::Handled
            }
            effect => {
                self.visible.apply(effect, ctx);
                Signal::Handled
            }
        }
    }

    fn teardown(&mut self, queue: &mut TimerQueue<StageEffect>) -> usize {
        self.heading.teardown(queue) + self.letter.teardown(queue) + self.cinematic.teardown(queue)
    }

    fn detail(&self) -> StageDetail {
        StageDetail::Envelope {
            phase: self.phase,
            visible: self.visible.to_vec(),
        }
    }
}
