//! Captioned flipbook.

use rosebloom_core::sequence::{Sequence, Sequencer, StepOutcome};
use rosebloom_core::timer::{Fired, TimerQueue};
use tracing::debug;

use super::{RuntimeContext, Signal, StageDetail, StageRuntime};
use crate::domain::commands::Intent;
use crate::domain::effects::StageEffect;
use crate::domain::events::StageEventKind;
use crate::domain::stage::Stage;
use crate::domain::storyboard::Storyboard;

/// Pages through the captions one `Continue` at a time.
///
/// A turn starts a short animation run; `Continue` is ignored until it
/// settles. `Continue` on the last page completes the stage.
#[derive(Debug)]
pub struct FlipbookRuntime {
    pages: &'static [&'static str],
    page: usize,
    turn_run: Sequence<StageEffect>,
    turn: Sequencer,
}

impl FlipbookRuntime {
    /// Creates the runtime on the first page.
    #[must_use]
    pub fn new(storyboard: &Storyboard) -> Self {
        Self {
            pages: storyboard.flipbook_pages,
            page: 0,
            turn_run: storyboard.flipbook_turn.clone(),
            turn: Sequencer::new("flipbook.turn"),
        }
    }

    /// Zero-based page showing.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }
}

impl StageRuntime for FlipbookRuntime {
    fn stage(&self) -> Stage {
        Stage::Flipbook
    }

    fn enter(&mut self, _ctx: &mut RuntimeContext<'_>) {}

    fn on_intent(&mut self, intent: Intent, ctx: &mut RuntimeContext<'_>) -> Signal {
        if intent != Intent::Continue {
            return Signal::Ignored;
        }
        if self.turn.is_running() {
            debug!(page = self.page, "page turn ignored, previous turn in flight");
            return Signal::Ignored;
        }
        if self.page + 1 >= self.pages.len() {
            return Signal::Complete;
        }
        self.page += 1;
        self.turn.start(ctx.queue, &self.turn_run);
        ctx.emit(StageEventKind::PageTurned { page: self.page });
        Signal::Handled
    }

    fn on_timer(&mut self, fired: &Fired<StageEffect>, _ctx: &mut RuntimeContext<'_>) -> Signal {
        match self.turn.acknowledge(fired.handle) {
            StepOutcome::Foreign => Signal::Ignored,
            StepOutcome::Fired | StepOutcome::Finished => Signal::Handled,
        }
    }

    fn teardown(&mut self, queue: &mut TimerQueue<StageEffect>) -> usize {
        self.turn.teardown(queue)
    }

    fn detail(&self) -> StageDetail {
        StageDetail::Flipbook {
            page: self.page,
            page_count: self.pages.len(),
            caption: self.pages.get(self.page).copied().unwrap_or_default(),
            turning: self.turn.is_running(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::FLIPBOOK_PAGES;
    use crate::domain::runtime::test_support::Harness;

    fn harness() -> Harness<FlipbookRuntime> {
        Harness::enter(FlipbookRuntime::new(&Storyboard::authored().unwrap()))
    }

    #[test]
    fn test_turn_is_ignored_while_animating() {
        // Arrange
        let mut harness = harness();
        harness.intent(Intent::Continue);

        // Act
        harness.run_until(599);
        let during = harness.intent(Intent::Continue);
        harness.run_until(600);
        let after = harness.intent(Intent::Continue);

        // Assert
        assert_eq!(during, Signal::Ignored);
        assert_eq!(after, Signal::Handled);
        assert_eq!(harness.runtime.page(), 2);
    }

    #[test]
    fn test_continue_on_last_page_completes() {
        // Arrange
        let mut harness = harness();
        let mut signals = Vec::new();

        // Act
        for turn in 0..FLIPBOOK_PAGES.len() as u64 {
            harness.run_until(turn * 1_000);
            signals.push(harness.intent(Intent::Continue));
        }

        // Assert
        assert_eq!(
            signals,
            vec![Signal::Handled, Signal::Handled, Signal::Handled, Signal::Complete]
        );
        assert_eq!(
            harness.runtime.detail(),
            StageDetail::Flipbook {
                page: 3,
                page_count: 4,
                caption: FLIPBOOK_PAGES[3],
                turning: false,
            }
        );
    }
}
