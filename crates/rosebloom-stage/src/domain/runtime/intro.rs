//! Intro card.

use rosebloom_core::sequence::{Sequence, Sequencer, StepOutcome};
use rosebloom_core::timer::{Fired, TimerQueue};

use super::{RuntimeContext, Signal, StageDetail, StageRuntime, Visibility};
use crate::domain::commands::Intent;
use crate::domain::effects::StageEffect;
use crate::domain::stage::Stage;
use crate::domain::storyboard::Storyboard;

/// Reveals the greeting card piece by piece; `Continue` completes the stage.
#[derive(Debug)]
pub struct IntroRuntime {
    reveal_run: Sequence<StageEffect>,
    reveals: Sequencer,
    visible: Visibility,
}

impl IntroRuntime {
    /// Creates the runtime.
    #[must_use]
    pub fn new(storyboard: &Storyboard) -> Self {
        Self {
            reveal_run: storyboard.intro.clone(),
            reveals: Sequencer::new("intro.reveal"),
            visible: Visibility::default(),
        }
    }
}

impl StageRuntime for IntroRuntime {
    fn stage(&self) -> Stage {
        Stage::Intro
    }

    fn enter(&mut self, ctx: &mut RuntimeContext<'_>) {
        self.reveals.start(ctx.queue, &self.reveal_run);
    }

    fn on_intent(&mut self, intent: Intent, _ctx: &mut RuntimeContext<'_>) -> Signal {
        match intent {
            Intent::Continue => Signal::Complete,
            _ => Signal::Ignored,
        }
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
        StageDetail::Intro {
            visible: self.visible.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::Element;
    use crate::domain::runtime::test_support::Harness;

    fn harness() -> Harness<IntroRuntime> {
        Harness::enter(IntroRuntime::new(&Storyboard::authored().unwrap()))
    }

    #[test]
    fn test_reveals_card_in_authored_order() {
        // Arrange
        let mut harness = harness();

        // Act
        harness.run_until(1_200);

        // Assert
        assert_eq!(
            harness.shown(),
            vec![
                Element::IntroCard,
                Element::IntroRose,
                Element::IntroTitle,
                Element::IntroDivider,
                Element::IntroSubtitle,
                Element::IntroButton,
            ]
        );
    }

    #[test]
    fn test_continue_completes_and_other_intents_are_ignored() {
        // Arrange
        let mut harness = harness();

        // Act
        let tap = harness.intent(Intent::Tap);
        let proceed = harness.intent(Intent::Continue);

        // Assert
        assert_eq!(tap, Signal::Ignored);
        assert_eq!(proceed, Signal::Complete);
    }

    #[test]
    fn test_teardown_mid_reveal_cancels_remaining_steps() {
        // Arrange
        let mut harness = harness();
        harness.run_until(600);

        // Act
        let cancelled = harness.teardown();
        harness.run_until(10_000);

        // Assert
        assert_eq!(cancelled, 3);
        assert_eq!(harness.shown().len(), 3);
    }
}
