//! Shared test helpers for stage controller integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use rosebloom_core::clock::Clock;
use rosebloom_stage::application::controller::{IntentOutcome, StageController};
use rosebloom_stage::domain::commands::{Intent, SubmitIntent};
use rosebloom_stage::domain::events::{StageEvent, StageEventKind};
use rosebloom_stage::domain::stage::Stage;
use rosebloom_test_support::FixedClock;
use uuid::Uuid;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 2, 7, 9, 0, 0).unwrap(),
    ))
}

/// A started controller at virtual time zero.
pub fn started_controller() -> StageController {
    let mut controller = StageController::new(fixed_clock()).unwrap();
    assert!(controller.start(Uuid::new_v4()));
    controller
}

/// Advances to `at_ms`, then submits `intent`.
pub fn intent_at(controller: &mut StageController, at_ms: u64, intent: Intent) -> IntentOutcome {
    controller.advance_to(at_ms);
    controller.handle_intent(&SubmitIntent::new(intent))
}

/// Drives a fresh controller to the moment the envelope stage is entered,
/// with five taps one second apart.
pub fn controller_at_envelope() -> StageController {
    let mut controller = started_controller();
    intent_at(&mut controller, 0, Intent::Continue);
    for second in 0..5 {
        intent_at(&mut controller, second * 1_000, Intent::Tap);
    }
    controller.advance_to(7_000);
    assert_eq!(controller.current_stage(), Some(Stage::Envelope));
    controller
}

/// `(stage, elapsed_ms)` of every `stage.entered` event, in order.
pub fn entries(events: &[StageEvent]) -> Vec<(Stage, u64)> {
    events
        .iter()
        .filter_map(|event| match event.kind {
            StageEventKind::StageEntered { stage } => Some((stage, event.metadata.elapsed_ms)),
            _ => None,
        })
        .collect()
}
