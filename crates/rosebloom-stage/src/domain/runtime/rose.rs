//! Hero rose.

use rosebloom_core::sequence::{Sequence, Sequencer, StepOutcome};
use rosebloom_core::timer::{Fired, TimerQueue};

use super::{RuntimeContext, Signal, StageDetail, StageRuntime, Visibility};
use crate::domain::commands::Intent;
use crate::domain::effects::StageEffect;
use crate::domain::events::StageEventKind;
use crate::domain::stage::Stage;
use crate::domain::storyboard::Storyboard;

/// Shows the rose title; `Hint` shakes the rose and `BloomClick` moves on.
#[derive(Debug)]
pub struct RoseRuntime {
    title_run: Sequence<StageEffect>,
    shake_run: Sequence<StageEffect>,
    title: Sequencer,
    shake: Sequencer,
    visible: Visibility,
}

impl RoseRuntime {
    /// Creates the runtime.
    #[must_use]
    pub fn new(storyboard: &Storyboard) -> Self {
        Self {
            title_run: storyboard.rose_title.clone(),
            shake_run: storyboard.rose_shake.clone(),
            title: Sequencer::new("rose.title"),
            shake: Sequencer::new("rose.shake"),
            visible: Visibility::default(),
        }
    }

    /// Returns `true` while a shake run is pending.
    #[must_use]
    pub fn is_shaking(&self) -> bool {
        self.shake.is_running()
    }
}

impl StageRuntime for RoseRuntime {
    fn stage(&self) -> Stage {
        Stage::Rose
    }

    fn enter(&mut self, ctx: &mut RuntimeContext<'_>) {
        self.title.start(ctx.queue, &self.title_run);
    }

    fn on_intent(&mut self, intent: Intent, ctx: &mut RuntimeContext<'_>) -> Signal {
        match intent {
            Intent::Hint => {
                // A new hint restarts the shake instead of stacking another one.
                self.shake.start(ctx.queue, &self.shake_run);
                ctx.emit(StageEventKind::ShakeStarted);
                Signal::Handled
            }
            Intent::BloomClick => Signal::Complete,
            _ => Signal::Ignored,
        }
    }

    fn on_timer(&mut self, fired: &Fired<StageEffect>, ctx: &mut RuntimeContext<'_>) -> Signal {
        if self.title.acknowledge(fired.handle) != StepOutcome::Foreign {
            self.visible.apply(fired.effect, ctx);
            return Signal::Handled;
        }
        if self.shake.acknowledge(fired.handle) != StepOutcome::Foreign {
            ctx.emit(StageEventKind::ShakeStopped);
            return Signal::Handled;
        }
        Signal::Ignored
    }

    fn teardown(&mut self, queue: &mut TimerQueue<StageEffect>) -> usize {
        self.title.teardown(queue) + self.shake.teardown(queue)
    }

    fn detail(&self) -> StageDetail {
        StageDetail::Rose {
            shaking: self.is_shaking(),
            visible: self.visible.to_vec(),
        }
    }
}
