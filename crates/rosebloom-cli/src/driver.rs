//! Drives a stage controller from input lines and wall-clock time.

use std::io::Write;
use std::time::Duration;

use rosebloom_core::event::DomainEvent;
use rosebloom_stage::application::controller::{IntentOutcome, StageController};
use rosebloom_stage::application::query_handlers::stage_view;
use rosebloom_stage::domain::commands::{Intent, SubmitIntent};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::input::{Input, parse_line};
use crate::render::render;

/// Owns the controller and turns its state changes into output lines.
#[derive(Debug)]
pub struct Driver {
    controller: StageController,
    emit_events: bool,
    last_frame: Option<String>,
}

impl Driver {
    /// Wraps a controller that has not been started yet.
    #[must_use]
    pub fn new(controller: StageController, emit_events: bool) -> Self {
        Self {
            controller,
            emit_events,
            last_frame: None,
        }
    }

    /// Starts the experience and returns the first output.
    pub fn start(&mut self) -> Vec<String> {
        self.controller.start(Uuid::new_v4());
        self.flush()
    }

    /// Catches up to `elapsed_ms`, then delivers `intent`.
    pub fn submit(&mut self, intent: Intent, elapsed_ms: u64) -> (IntentOutcome, Vec<String>) {
        self.controller.advance_to(elapsed_ms);
        let outcome = self.controller.handle_intent(&SubmitIntent::new(intent));
        (outcome, self.flush())
    }

    /// Dispatches every timer due by `elapsed_ms`.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<String> {
        self.controller.advance_to(elapsed_ms);
        self.flush()
    }

    /// Earliest pending deadline, in controller milliseconds.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.controller.next_deadline()
    }

    /// Shuts the controller down and returns the final output.
    pub fn shutdown(&mut self) -> Vec<String> {
        self.controller.shutdown();
        self.flush()
    }

    /// The controller being driven.
    #[must_use]
    pub fn controller(&self) -> &StageController {
        &self.controller
    }

    fn flush(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        for event in self.controller.drain_events() {
            if self.emit_events {
                let line = serde_json::json!({
                    "metadata": event.metadata(),
                    "stage": event.stage,
                    "payload": event.to_payload(),
                });
                lines.push(line.to_string());
            }
        }

        let frame = render(&stage_view(&self.controller));
        if self.last_frame.as_deref() != Some(frame.as_str()) {
            lines.push(frame.clone());
            self.last_frame = Some(frame);
        }
        lines
    }
}

fn millis_since(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn write_lines(out: &mut impl Write, lines: &[String]) -> Result<(), AppError> {
    for line in lines {
        writeln!(out, "{}", line.trim_end())?;
    }
    out.flush()?;
    Ok(())
}

/// Runs the interactive loop until `quit` or end of input.
///
/// Between input lines the loop sleeps until the controller's next deadline,
/// so virtual time tracks wall-clock milliseconds since start.
///
/// # Errors
///
/// Returns `AppError::Io` if reading input or writing output fails.
pub async fn run<R, W>(mut driver: Driver, reader: R, out: &mut W) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let started = Instant::now();
    let mut lines = reader.lines();
    write_lines(out, &driver.start())?;

    loop {
        let deadline = driver
            .next_deadline()
            .map(|ms| started + Duration::from_millis(ms));

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("input closed");
                    break;
                };
                match parse_line(&line) {
                    Ok(Some(Input::Quit)) => break,
                    Ok(Some(Input::Intent(intent))) => {
                        let (outcome, output) = driver.submit(intent, millis_since(started));
                        debug!(%intent, ?outcome, "intent submitted");
                        write_lines(out, &output)?;
                    }
                    Ok(None) => {}
                    Err(e) => warn!(error = %e, "input line skipped"),
                }
            }
            () = sleep_until(deadline.unwrap_or(started)), if deadline.is_some() => {
                write_lines(out, &driver.advance(millis_since(started)))?;
            }
        }
    }

    write_lines(out, &driver.shutdown())?;
    info!(elapsed_ms = millis_since(started), "session ended");
    Ok(())
}
