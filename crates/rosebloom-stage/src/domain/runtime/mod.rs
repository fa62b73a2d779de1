//! Stage runtimes.
//!
//! A runtime is created when its stage is entered and owns every timer the
//! stage schedules. The controller tears it down before constructing the next
//! one, so no effect of a superseded stage can fire.

mod envelope;
mod flipbook;
mod hearts;
mod intro;
mod memory;
mod message;
mod rose;
mod watering;

use std::collections::BTreeSet;

use rosebloom_core::timer::{Fired, TimerQueue};
use rosebloom_watering::application::query_handlers::WateringView;
use serde::Serialize;

use super::commands::Intent;
use super::content::Element;
use super::effects::StageEffect;
use super::events::StageEventKind;
use super::stage::Stage;
use super::storyboard::Storyboard;

pub use envelope::{EnvelopePhase, EnvelopeRuntime};
pub use flipbook::FlipbookRuntime;
pub use hearts::HeartsRuntime;
pub use intro::IntroRuntime;
pub use memory::MemoryRuntime;
pub use message::MessageRuntime;
pub use rose::RoseRuntime;
pub use watering::WateringRuntime;

/// What a runtime made of an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// The input does not apply in the runtime's current state.
    Ignored,
    /// The input changed state; the stage continues.
    Handled,
    /// The stage is complete and the controller should advance.
    Complete,
}

/// Mutable access a runtime gets while handling one input.
#[derive(Debug)]
pub struct RuntimeContext<'a> {
    /// The controller's timer queue.
    pub queue: &'a mut TimerQueue<StageEffect>,
    /// Events produced while handling the input, in order.
    pub emitted: &'a mut Vec<StageEventKind>,
}

impl RuntimeContext<'_> {
    /// Records an event.
    pub fn emit(&mut self, kind: StageEventKind) {
        self.emitted.push(kind);
    }
}

/// Stage-specific part of the view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum StageDetail {
    /// The controller has not started or has shut down.
    Idle,
    Intro {
        visible: Vec<Element>,
    },
    Watering {
        #[serde(flatten)]
        view: WateringView,
        message: &'static str,
    },
    Envelope {
        phase: EnvelopePhase,
        visible: Vec<Element>,
    },
    Rose {
        shaking: bool,
        visible: Vec<Element>,
    },
    Message {
        displayed: String,
        typing_complete: bool,
        visible: Vec<Element>,
    },
    Flipbook {
        page: usize,
        page_count: usize,
        caption: &'static str,
        turning: bool,
    },
    Hearts {
        overlay_active: bool,
    },
    Memory {
        visible: Vec<Element>,
    },
}

/// Behaviour shared by every stage runtime.
pub trait StageRuntime: Send + std::fmt::Debug {
    /// The stage this runtime implements.
    fn stage(&self) -> Stage;

    /// Starts the stage's entry runs. Called once, right after construction.
    fn enter(&mut self, ctx: &mut RuntimeContext<'_>);

    /// Handles a user intent.
    fn on_intent(&mut self, intent: Intent, ctx: &mut RuntimeContext<'_>) -> Signal;

    /// Handles a fired timer. Returns [`Signal::Ignored`] if the timer is not
    /// owned by this runtime.
    fn on_timer(&mut self, fired: &Fired<StageEffect>, ctx: &mut RuntimeContext<'_>) -> Signal;

    /// Cancels every timer the runtime still owns. Returns how many were pending.
    fn teardown(&mut self, queue: &mut TimerQueue<StageEffect>) -> usize;

    /// Stage-specific view state.
    fn detail(&self) -> StageDetail;
}

/// Constructs the runtime for `stage`.
#[must_use]
pub fn build_runtime(stage: Stage, storyboard: &Storyboard) -> Box<dyn StageRuntime> {
    match stage {
        Stage::Intro => Box::new(IntroRuntime::new(storyboard)),
        Stage::Watering => Box::new(WateringRuntime::new(storyboard)),
        Stage::Envelope => Box::new(EnvelopeRuntime::new(storyboard)),
        Stage::Rose => Box::new(RoseRuntime::new(storyboard)),
        Stage::Message => Box::new(MessageRuntime::new(storyboard)),
        Stage::Flipbook => Box::new(FlipbookRuntime::new(storyboard)),
        Stage::Hearts => Box::new(HeartsRuntime::new(storyboard)),
        Stage::Memory => Box::new(MemoryRuntime::new(storyboard)),
    }
}

/// Elements a runtime currently shows.
#[derive(Debug, Default)]
pub(crate) struct Visibility {
    shown: BTreeSet<Element>,
}

impl Visibility {
    pub(crate) fn show(&mut self, element: Element, ctx: &mut RuntimeContext<'_>) {
        if self.shown.insert(element) {
            ctx.emit(StageEventKind::ElementShown { element });
        }
    }

    pub(crate) fn hide(&mut self, element: Element, ctx: &mut RuntimeContext<'_>) {
        if self.shown.remove(&element) {
            ctx.emit(StageEventKind::ElementHidden { element });
        }
    }

    /// Applies a `Show`/`Hide` effect. Returns `false` for any other effect.
    pub(crate) fn apply(&mut self, effect: StageEffect, ctx: &mut RuntimeContext<'_>) -> bool {
        match effect {
            StageEffect::Show(element) => self.show(element, ctx),
            StageEffect::Hide(element) => self.hide(element, ctx),
            _ => return false,
        }
        true
    }

    pub(crate) fn contains(&self, element: Element) -> bool {
        self.shown.contains(&element)
    }

    pub(crate) fn to_vec(&self) -> Vec<Element> {
        self.shown.iter().copied().collect()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use rosebloom_core::timer::TimerQueue;

    use super::{RuntimeContext, Signal, StageRuntime};
    use crate::domain::commands::Intent;
    use crate::domain::effects::StageEffect;
    use crate::domain::events::StageEventKind;

    /// Drives one runtime against its own queue, as the controller would.
    pub(crate) struct Harness<R> {
        pub runtime: R,
        pub queue: TimerQueue<StageEffect>,
        pub events: Vec<StageEventKind>,
        pub completed_at: Option<u64>,
    }

    impl<R: StageRuntime> Harness<R> {
        pub(crate) fn enter(runtime: R) -> Self {
            let mut harness = Self {
                runtime,
                queue: TimerQueue::new(),
                events: Vec::new(),
                completed_at: None,
            };
            let mut ctx = RuntimeContext {
                queue: &mut harness.queue,
                emitted: &mut harness.events,
            };
            harness.runtime.enter(&mut ctx);
            harness
        }

        pub(crate) fn intent(&mut self, intent: Intent) -> Signal {
            let mut ctx = RuntimeContext {
                queue: &mut self.queue,
                emitted: &mut self.events,
            };
            let signal = self.runtime.on_intent(intent, &mut ctx);
            if signal == Signal::Complete && self.completed_at.is_none() {
                self.completed_at = Some(self.queue.now_ms());
            }
            signal
        }

        /// Dispatches every timer due up to `horizon`, returning the signals.
        pub(crate) fn run_until(&mut self, horizon: u64) -> Vec<Signal> {
            let mut signals = Vec::new();
            while let Some(fired) = self.queue.pop_due(horizon) {
                let mut ctx = RuntimeContext {
                    queue: &mut self.queue,
                    emitted: &mut self.events,
                };
                let signal = self.runtime.on_timer(&fired, &mut ctx);
                if signal == Signal::Complete && self.completed_at.is_none() {
                    self.completed_at = Some(fired.at_ms);
                }
                signals.push(signal);
            }
            self.queue.advance_to(horizon);
            signals
        }

        pub(crate) fn teardown(&mut self) -> usize {
            self.runtime.teardown(&mut self.queue)
        }

        pub(crate) fn shown(&self) -> Vec<crate::domain::content::Element> {
            self.events
                .iter()
                .filter_map(|event| match event {
                    StageEventKind::ElementShown { element } => Some(*element),
                    _ => None,
                })
                .collect()
        }
    }
}
