//! Effect tags carried by stage timers.

use super::content::Element;

/// What a stage timer does when it fires.
///
/// The timer queue only stores these tags; the runtime that owns the timer
/// applies them to its own state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageEffect {
    /// Make an element visible.
    Show(Element),
    /// Hide a visible element.
    Hide(Element),
    /// Reveal the next character of the typewriter.
    TypeTick,
    /// The rose stops shaking.
    StopShake,
    /// A flipbook page turn finished animating.
    TurnSettled,
    /// The stage is complete.
    Complete,
}
