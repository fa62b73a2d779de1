//! Integration tests for the terminal driver.

use rosebloom_cli::driver::{Driver, run};
use rosebloom_stage::application::controller::{IntentOutcome, StageController};
use rosebloom_stage::domain::commands::Intent;
use rosebloom_stage::domain::stage::Stage;
use rosebloom_test_support::fixed_clock;

fn driver(emit_events: bool) -> Driver {
    let controller = StageController::new(fixed_clock()).unwrap();
    Driver::new(controller, emit_events)
}

#[test]
fn test_start_renders_the_intro_frame() {
    // Arrange
    let mut driver = driver(false);

    // Act
    let output = driver.start();

    // Assert
    assert_eq!(output, vec!["[1/8] intro\n".to_owned()]);
}

#[test]
fn test_unchanged_view_produces_no_output() {
    // Arrange
    let mut driver = driver(false);
    driver.start();

    // Act
    let output = driver.advance(299);

    // Assert
    assert!(output.is_empty());
}

#[test]
fn test_submit_catches_up_before_delivering_the_intent() {
    // Arrange
    let mut driver = driver(false);
    driver.start();
    driver.submit(Intent::Continue, 0);
    for second in 0..5 {
        driver.submit(Intent::Tap, second * 1_000);
    }

    // Act
    let (outcome, output) = driver.submit(Intent::Open, 7_000);

    // Assert
    assert_eq!(outcome, IntentOutcome::Accepted);
    assert_eq!(driver.controller().current_stage(), Some(Stage::Envelope));
    assert!(output.last().unwrap().contains("envelope: Opened"));
}

#[test]
fn test_emitted_events_are_json_lines_before_the_frame() {
    // Arrange
    let mut driver = driver(true);

    // Act
    let output = driver.start();

    // Assert
    assert_eq!(output.len(), 2);
    let event: serde_json::Value = serde_json::from_str(&output[0]).unwrap();
    assert_eq!(event["metadata"]["event_type"], "stage.entered");
    assert_eq!(event["metadata"]["sequence_number"], 1);
    assert_eq!(event["payload"]["kind"], "stage_entered");
    assert_eq!(event["stage"], "intro");
    assert!(output[1].starts_with("[1/8] intro"));
}

#[tokio::test]
async fn test_run_loop_processes_lines_until_quit() {
    // Arrange
    let input: &[u8] = b"continue\nwater\n\ntap\nquit\ntap\n";
    let mut out = Vec::new();

    // Act
    run(driver(false), input, &mut out).await.unwrap();

    // Assert
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("[1/8] intro\n"));
    assert!(text.contains("[2/8] watering"));
    assert!(text.contains("(4 taps left)"));
    assert!(!text.contains("(3 taps left)"));
    assert!(text.trim_end().ends_with("[idle]"));
}
