//! Final memory card.

use rosebloom_core::sequence::{Sequence, Sequencer, StepOutcome};
use rosebloom_core::timer::{Fired, TimerQueue};

use super::{RuntimeContext, Signal, StageDetail, StageRuntime, Visibility};
use crate::domain::commands::Intent;
use crate::domain::effects::StageEffect;
use crate::domain::stage::Stage;
use crate::domain::storyboard::Storyboard;

/// Terminal stage: reveals its lines and never completes.
#[derive(Debug)]
pub struct MemoryRuntime {
    reveal_run: Sequence<StageEffect>,
    reveals: Sequencer,
    visible: Visibility,
}

impl MemoryRuntime {
    /// Creates the runtime.
    #[must_use]
    pub fn new(storyboard: &Storyboard) -> Self {
        Self {
            reveal_run: storyboard.memory.clone(),
            reveals: Sequencer::new("memory.reveal"),
            visible: Visibility::default(),
        }
    }
}

impl StageRuntime for MemoryRuntime {
    fn stage(&self) -> Stage {
        Stage::Memory
    }

    fn enter(&mut self, ctx: &mut RuntimeContext<'_>) {
        self.reveals.start(ctx.queue, &self.reveal_run);
    }

    fn on_intent(&mut self, _intent: Intent, _ctx: &mut RuntimeContext<'_>) -> Signal {
        Signal::Ignored
    }

    fn on_timer(&mut self, fired: &Fired<StageEffect>, ctx: &mut RuntimeContext<'_>) -> Signal {
        if self.reveals.acknowledge(fired.handle) == StepOutcome::Foreign {
            return Signal::Ignored;
        }
        self.visible.apply(fired.effect, ctx);
        Signal::Handled
    }

    fn teardown(&mut self, queue: &mut TimerQueue<StageEffect>) -> usize {
        self.reveals.teardown(queue)
    }

    fn detail(&self) -> StageDetail {
        StageDetail::Memory {
            visible: self.visible.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::Element;
    use crate::domain::runtime::test_support::Harness;

    #[test]
    fn test_reveals_lines_and_ignores_every_intent() {
        // Arrange
        let mut harness = Harness::enter(MemoryRuntime::new(&Storyboard::authored().unwrap()));

        // Act
        harness.run_until(3_000);
        let signals: Vec<Signal> = [Intent::Continue, Intent::Tap, Intent::KeepRose]
            .into_iter()
            .map(|intent| harness.intent(intent))
            .collect();

        // Assert
        assert_eq!(
            harness.shown(),
            vec![Element::MemoryFirstLine, Element::MemorySecondLine, Element::MemoryCard]
        );
        assert!(signals.iter().all(|signal| *signal == Signal::Ignored));
        assert!(harness.queue.is_empty());
        assert_eq!(harness.completed_at, None);
    }
}
