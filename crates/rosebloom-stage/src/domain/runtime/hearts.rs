//! Heart overlay interlude.

use rosebloom_core::sequence::{Sequence, Sequencer, StepOutcome};
use rosebloom_core::timer::{Fired, TimerQueue};

use super::{RuntimeContext, Signal, StageDetail, StageRuntime, Visibility};
use crate::domain::commands::Intent;
use crate::domain::content::Element;
use crate::domain::effects::StageEffect;
use crate::domain::stage::Stage;
use crate::domain::storyboard::Storyboard;

/// Plays the heart overlay for a fixed time, then completes.
#[derive(Debug)]
pub struct HeartsRuntime {
    overlay_run: Sequence<StageEffect>,
    overlay: Sequencer,
    visible: Visibility,
}

impl HeartsRuntime {
    /// Creates the runtime.
    #[must_use]
    pub fn new(storyboard: &Storyboard) -> Self {
        Self {
            overlay_run: storyboard.hearts.clone(),
            overlay: Sequencer::new("hearts.overlay"),
            visible: Visibility::default(),
        }
    }
}

impl StageRuntime for HeartsRuntime {
    fn stage(&self) -> Stage {
        Stage::Hearts
    }

    fn enter(&mut self, ctx: &mut RuntimeContext<'_>) {
        self.visible.show(Element::HeartOverlay, ctx);
        self.overlay.start(ctx.queue, &self.overlay_run);
    }

    fn on_intent(&mut self, _intent: Intent, _ctx: &mut RuntimeContext<'_>) -> Signal {
        Signal::Ignored
    }

    fn on_timer(&mut self, fired: &Fired<StageEffect>, ctx: &mut RuntimeContext<'_>) -> Signal {
        if self.overlay.acknowledge(fired.handle) == StepOutcome::Foreign {
            return Signal::Ignored;
        }
        if fired.effect == StageEffect::Complete {
            self.visible.hide(Element::HeartOverlay, ctx);
            return Signal::Complete;
        }
        self.visible.apply(fired.effect, ctx);
        Signal::Handled
    }

    fn teardown(&mut self, queue: &mut TimerQueue<StageEffect>) -> usize {
        self.overlay.teardown(queue)
    }

    fn detail(&self) -> StageDetail {
        StageDetail::Hearts {
            overlay_active: self.visible.contains(Element::HeartOverlay),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::StageEventKind;
    use crate::domain::runtime::test_support::Harness;

    #[test]
    fn test_overlay_active_on_entry_and_cleared_on_completion() {
        // Arrange
        let mut harness = Harness::enter(HeartsRuntime::new(&Storyboard::authored().unwrap()));
        let on_entry = harness.runtime.detail();

        // Act
        harness.run_until(4_000);

        // Assert
        assert_eq!(on_entry, StageDetail::Hearts { overlay_active: true });
        assert_eq!(harness.completed_at, Some(4_000));
        assert_eq!(
            harness.events.last(),
            Some(&StageEventKind::ElementHidden {
                element: Element::HeartOverlay,
            })
        );
        assert_eq!(harness.runtime.detail(), StageDetail::Hearts { overlay_active: false });
    }
}
