//! Typewritten message.

use rosebloom_core::sequence::{Sequence, Sequencer, StepOutcome};
use rosebloom_core::timer::{Fired, TimerQueue};
use rosebloom_core::typewriter::{TickOutcome, Typewriter};
use tracing::debug;

use super::{RuntimeContext, Signal, StageDetail, StageRuntime, Visibility};
use crate::domain::commands::Intent;
use crate::domain::content::Element;
use crate::domain::effects::StageEffect;
use crate::domain::events::StageEventKind;
use crate::domain::stage::Stage;
use crate::domain::storyboard::Storyboard;

/// Types the main message, then reveals the follow-up lines.
///
/// The closing run starts on entry and is independent of the typewriter, so
/// the keep-rose button appears at a fixed time whether or not typing is done.
#[derive(Debug)]
pub struct MessageRuntime {
    typewriter: Typewriter<StageEffect>,
    follow_up_run: Sequence<StageEffect>,
    closing_run: Sequence<StageEffect>,
    follow_up: Sequencer,
    closing: Sequencer,
    visible: Visibility,
}

impl MessageRuntime {
    /// Creates the runtime.
    #[must_use]
    pub fn new(storyboard: &Storyboard) -> Self {
        Self {
            typewriter: storyboard.message_typewriter.clone(),
            follow_up_run: storyboard.message_follow_up.clone(),
            closing_run: storyboard.message_closing.clone(),
            follow_up: Sequencer::new("message.follow_up"),
            closing: Sequencer::new("message.closing"),
            visible: Visibility::default(),
        }
    }

    fn on_tick(&mut self, fired: &Fired<StageEffect>, ctx: &mut RuntimeContext<'_>) -> Signal {
        match self.typewriter.on_tick(ctx.queue, fired.handle) {
            TickOutcome::Stale => Signal::Ignored,
            TickOutcome::Revealed { revealed } => {
                ctx.emit(StageEventKind::TextAdvanced { revealed });
                Signal::Handled
            }
            TickOutcome::Completed { revealed } => {
                ctx.emit(StageEventKind::TextCompleted { length: revealed });
                self.follow_up.start(ctx.queue, &self.follow_up_run);
                Signal::Handled
            }
        }
    }
}

impl StageRuntime for MessageRuntime {
    fn stage(&self) -> Stage {
        Stage::Message
    }

    fn enter(&mut self, ctx: &mut RuntimeContext<'_>) {
        self.typewriter.start(ctx.queue);
        self.closing.start(ctx.queue, &self.closing_run);
    }

    fn on_intent(&mut self, intent: Intent, _ctx: &mut RuntimeContext<'_>) -> Signal {
        match intent {
            Intent::KeepRose if self.visible.contains(Element::KeepRoseButton) => Signal::Complete,
            Intent::KeepRose => {
                debug!("keep rose ignored, button not revealed yet");
                Signal::Ignored
            }
            _ => Signal::Ignored,
        }
    }

    fn on_timer(&mut self, fired: &Fired<StageEffect>, ctx: &mut RuntimeContext<'_>) -> Signal {
        if fired.effect == StageEffect::TypeTick {
            return self.on_tick(fired, ctx);
        }
        let owned = self.follow_up.acknowledge(fired.handle) != StepOutcome::Foreign
            || self.closing.acknowledge(fired.handle) != StepOutcome::Foreign;
        if !owned {
            return Signal::Ignored;
        }
        self.visible.apply(fired.effect, ctx);
        Signal::Handled
    }

    fn teardown(&mut self, queue: &mut TimerQueue<StageEffect>) -> usize {
        usize::from(self.typewriter.cancel(queue))
            + self.follow_up.teardown(queue)
            + self.closing.teardown(queue)
    }

    fn detail(&self) -> StageDetail {
        StageDetail::Message {
            displayed: self.typewriter.displayed().to_owned(),
            typing_complete: self.typewriter.is_completed(),
            visible: self.visible.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::MAIN_MESSAGE;
    use crate::domain::runtime::test_support::Harness;
    use crate::domain::timing::TYPEWRITER_TICK_MS;

    fn harness() -> Harness<MessageRuntime> {
        Harness::enter(MessageRuntime::new(&Storyboard::authored().unwrap()))
    }

    fn typing_done_ms() -> u64 {
        MAIN_MESSAGE.chars().count() as u64 * TYPEWRITER_TICK_MS
    }

    #[test]
    fn test_text_completes_once_then_follow_up_runs() {
        // Arrange
        let mut harness = harness();

        // Act
        harness.run_until(typing_done_ms() + 1_000);

        // Assert
        let completions: Vec<&StageEventKind> = harness
            .events
            .iter()
            .filter(|event| matches!(event, StageEventKind::TextCompleted { .. }))
            .collect();
        assert_eq!(
            completions,
            vec![&StageEventKind::TextCompleted {
                length: MAIN_MESSAGE.chars().count(),
            }]
        );
        assert_eq!(harness.shown(), vec![Element::ThankYou, Element::SecondaryMessage]);
    }

    #[test]
    fn test_displayed_text_is_a_prefix_while_typing() {
        // Arrange
        let mut harness = harness();

        // Act
        harness.run_until(10 * TYPEWRITER_TICK_MS);

        // Assert
        match harness.runtime.detail() {
            StageDetail::Message {
                displayed,
                typing_complete,
                ..
            } => {
                assert_eq!(displayed.chars().count(), 10);
                assert!(MAIN_MESSAGE.starts_with(&displayed));
                assert!(!typing_complete);
            }
            other => panic!("expected Message detail, got {other:?}"),
        }
    }

    #[test]
    fn test_keep_rose_only_after_button_revealed() {
        // Arrange
        let mut harness = harness();
        harness.run_until(13_499);

        // Act
        let early = harness.intent(Intent::KeepRose);
        harness.run_until(13_500);
        let late = harness.intent(Intent::KeepRose);

        // Assert
        assert_eq!(early, Signal::Ignored);
        assert_eq!(late, Signal::Complete);
    }

    #[test]
    fn test_teardown_stops_typing_and_closing_run() {
        // Arrange
        let mut harness = harness();
        harness.run_until(500);

        // Act
        let cancelled = harness.teardown();
        let events_before = harness.events.len();
        harness.run_until(60_000);

        // Assert
        assert_eq!(cancelled, 3);
        assert_eq!(harness.events.len(), events_before);
        assert!(harness.queue.is_empty());
    }
}
