//! Watering stage.

use rosebloom_core::timer::{Fired, TimerQueue};
use rosebloom_watering::application::query_handlers::watering_view;
use rosebloom_watering::domain::machine::{SettleOutcome, TapOutcome, WateringMachine};

use super::{RuntimeContext, Signal, StageDetail, StageRuntime};
use crate::domain::commands::Intent;
use crate::domain::effects::StageEffect;
use crate::domain::events::StageEventKind;
use crate::domain::stage::Stage;
use crate::domain::storyboard::Storyboard;

/// Hosts the tap-to-grow machine and completes once its settle delay elapses.
#[derive(Debug)]
pub struct WateringRuntime {
    machine: WateringMachine<StageEffect>,
    messages: &'static [&'static str],
}

impl WateringRuntime {
    /// Creates the runtime.
    #[must_use]
    pub fn new(storyboard: &Storyboard) -> Self {
        Self {
            machine: WateringMachine::new(
                storyboard.watering_messages.len(),
                storyboard.watering_settle_ms,
                StageEffect::Complete,
            ),
            messages: storyboard.watering_messages,
        }
    }
}

impl StageRuntime for WateringRuntime {
    fn stage(&self) -> Stage {
        Stage::Watering
    }

    fn enter(&mut self, _ctx: &mut RuntimeContext<'_>) {}

    fn on_intent(&mut self, intent: Intent, ctx: &mut RuntimeContext<'_>) -> Signal {
        if intent != Intent::Tap {
            return Signal::Ignored;
        }
        match self.machine.tap(ctx.queue) {
            TapOutcome::Watered { tap_count, progress } => {
                ctx.emit(StageEventKind::Watered {
                    tap_count,
                    progress,
                    message_index: self.machine.message_index(),
                });
                Signal::Handled
            }
            TapOutcome::Bloomed { tap_count } => {
                ctx.emit(StageEventKind::Watered {
                    tap_count,
                    progress: self.machine.progress(),
                    message_index: self.machine.message_index(),
                });
                ctx.emit(StageEventKind::Bloomed { tap_count });
                Signal::Handled
            }
            TapOutcome::Rejected => Signal::Ignored,
        }
    }

    fn on_timer(&mut self, fired: &Fired<StageEffect>, _ctx: &mut RuntimeContext<'_>) -> Signal {
        match self.machine.on_timer(fired.handle) {
            SettleOutcome::Settled => Signal::Complete,
            SettleOutcome::Foreign => Signal::Ignored,
        }
    }

    fn teardown(&mut self, queue: &mut TimerQueue<StageEffect>) -> usize {
        self.machine.teardown(queue)
    }

    fn detail(&self) -> StageDetail {
        let view = watering_view(&self.machine);
        let message = self.messages.get(view.message_index).copied().unwrap_or_default();
        StageDetail::Watering { view, message }
    }
}
