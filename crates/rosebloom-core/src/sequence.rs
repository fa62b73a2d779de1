//! Timed reveal sequencer.
//!
//! A [`Sequence`] is a validated list of `(offset, effect)` steps whose
//! offsets are absolute from the moment a run starts. A [`Sequencer`] turns a
//! sequence into one pending timer per step and owns those timers until they
//! fire or the run is stopped.

use serde::Serialize;
use tracing::debug;

use crate::error::DomainError;
use crate::timer::{TimerHandle, TimerQueue, TimerSet};

/// One step of a sequence: `effect` becomes due `offset_ms` after the run starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceStep<E> {
    /// Absolute offset from the run start, not a delta from the previous step.
    pub offset_ms: u64,
    /// Effect tag dispatched by the owner when the step fires.
    pub effect: E,
}

impl<E> SequenceStep<E> {
    /// Creates a step.
    pub const fn new(offset_ms: u64, effect: E) -> Self {
        Self { offset_ms, effect }
    }
}

/// An ordered, validated list of steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence<E> {
    steps: Vec<SequenceStep<E>>,
}

impl<E> Sequence<E> {
    /// Builds a sequence from steps declared in offset order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NonMonotonicOffset` if an offset is smaller than
    /// the one declared before it. Equal offsets are allowed.
    pub fn new(steps: Vec<SequenceStep<E>>) -> Result<Self, DomainError> {
        for (index, pair) in steps.windows(2).enumerate() {
            if pair[1].offset_ms < pair[0].offset_ms {
                return Err(DomainError::NonMonotonicOffset {
                    index: index + 1,
                    offset_ms: pair[1].offset_ms,
                    previous_ms: pair[0].offset_ms,
                });
            }
        }
        Ok(Self { steps })
    }

    /// Builds a sequence with a single step, such as a settle delay.
    #[must_use]
    pub fn once(offset_ms: u64, effect: E) -> Self {
        Self {
            steps: vec![SequenceStep::new(offset_ms, effect)],
        }
    }

    /// Returns the steps in declaration order.
    #[must_use]
    pub fn steps(&self) -> &[SequenceStep<E>] {
        &self.steps
    }

    /// Offset of the last step, or zero for an empty sequence.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.steps.last().map_or(0, |step| step.offset_ms)
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if the sequence has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Identifies one run of a sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RunHandle(u64);

/// What a fired timer meant to the sequencer that was asked about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The timer does not belong to the current run; its effect must be dropped.
    Foreign,
    /// A step of the current run fired and more steps are pending.
    Fired,
    /// The last pending step of the current run fired; the sequencer is idle.
    Finished,
}

#[derive(Debug)]
enum SequencerState {
    Idle,
    Running { run: RunHandle, timers: TimerSet },
}

/// Runs sequences one at a time, owning the timers of the current run.
#[derive(Debug)]
pub struct Sequencer {
    label: &'static str,
    next_run: u64,
    state: SequencerState,
}

impl Sequencer {
    /// Creates an idle sequencer. `label` only appears in logs.
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            next_run: 1,
            state: SequencerState::Idle,
        }
    }

    /// Returns `true` while a run has steps pending.
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.state, SequencerState::Running { .. })
    }

    /// The run whose steps are pending, if any.
    #[must_use]
    pub fn current_run(&self) -> Option<RunHandle> {
        match &self.state {
            SequencerState::Running { run, .. } => Some(*run),
            SequencerState::Idle => None,
        }
    }

    /// Number of steps of the current run still pending.
    #[must_use]
    pub fn pending_steps(&self) -> usize {
        match &self.state {
            SequencerState::Running { timers, .. } => timers.len(),
            SequencerState::Idle => 0,
        }
    }

    /// Starts a run of `sequence` at the queue's current time.
    ///
    /// A run still in progress is stopped first, so two runs never interleave.
    pub fn start<E: Clone>(&mut self, queue: &mut TimerQueue<E>, sequence: &Sequence<E>) -> RunHandle {
        if let Some(previous) = self.current_run() {
            let cancelled = self.stop(queue, previous);
            debug!(sequencer = self.label, cancelled, "superseded running sequence");
        }

        let run = RunHandle(self.next_run);
        self.next_run += 1;

        let mut timers = TimerSet::new();
        for step in sequence.steps() {
            timers.track(queue.schedule(step.offset_ms, step.effect.clone()));
        }
        debug!(
            sequencer = self.label,
            run = run.0,
            steps = sequence.len(),
            start_ms = queue.now_ms(),
            "sequence started"
        );

        if !timers.is_empty() {
            self.state = SequencerState::Running { run, timers };
        }
        run
    }

    /// Starts a run only if no run is in progress.
    pub fn start_if_idle<E: Clone>(
        &mut self,
        queue: &mut TimerQueue<E>,
        sequence: &Sequence<E>,
    ) -> Option<RunHandle> {
        if self.is_running() {
            debug!(sequencer = self.label, "start ignored, sequence already running");
            return None;
        }
        Some(self.start(queue, sequence))
    }

    /// Cancels every pending step of `run`. No-op if `run` already finished
    /// or was superseded. Returns how many timers were cancelled.
    pub fn stop<E>(&mut self, queue: &mut TimerQueue<E>, run: RunHandle) -> usize {
        if self.current_run() != Some(run) {
            return 0;
        }
        self.teardown(queue)
    }

    /// Cancels whatever run is in progress. Returns how many timers were cancelled.
    pub fn teardown<E>(&mut self, queue: &mut TimerQueue<E>) -> usize {
        match std::mem::replace(&mut self.state, SequencerState::Idle) {
            SequencerState::Running { run, mut timers } => {
                let cancelled = timers.cancel_all(queue);
                debug!(sequencer = self.label, run = run.0, cancelled, "sequence stopped");
                cancelled
            }
            SequencerState::Idle => 0,
        }
    }

    /// Records that `handle` fired and reports whether it belonged to the
    /// current run.
    pub fn acknowledge(&mut self, handle: TimerHandle) -> StepOutcome {
        let SequencerState::Running { run, timers } = &mut self.state else {
            return StepOutcome::Foreign;
        };
        if !timers.forget(handle) {
            return StepOutcome::Foreign;
        }
        if timers.is_empty() {
            debug!(sequencer = self.label, run = run.0, "sequence finished");
            self.state = SequencerState::Idle;
            StepOutcome::Finished
        } else {
            StepOutcome::Fired
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Reveal {
        Title,
        Body,
        Button,
    }

    fn reveal_sequence() -> Sequence<Reveal> {
        Sequence::new(vec![
            SequenceStep::new(0, Reveal::Title),
            SequenceStep::new(500, Reveal::Body),
            SequenceStep::new(500, Reveal::Button),
        ])
        .unwrap()
    }

    fn drain(
        queue: &mut TimerQueue<Reveal>,
        sequencer: &mut Sequencer,
        horizon: u64,
    ) -> Vec<(u64, Reveal, StepOutcome)> {
        let mut seen = Vec::new();
        while let Some(fired) = queue.pop_due(horizon) {
            let outcome = sequencer.acknowledge(fired.handle);
            seen.push((fired.at_ms, fired.effect, outcome));
        }
        queue.advance_to(horizon);
        seen
    }

    #[test]
    fn test_new_rejects_decreasing_offsets() {
        // Act
        let result = Sequence::new(vec![
            SequenceStep::new(100, Reveal::Title),
            SequenceStep::new(50, Reveal::Body),
        ]);

        // Assert
        assert_eq!(
            result.unwrap_err(),
            DomainError::NonMonotonicOffset {
                index: 1,
                offset_ms: 50,
                previous_ms: 100,
            }
        );
    }

    #[test]
    fn test_offsets_are_absolute_from_run_start() {
        // Arrange
        let mut queue = TimerQueue::new();
        queue.advance_to(1_000);
        let mut sequencer = Sequencer::new("test");

        // Act
        sequencer.start(&mut queue, &reveal_sequence());
        let seen = drain(&mut queue, &mut sequencer, 10_000);

        // Assert
        assert_eq!(
            seen,
            vec![
                (1_000, Reveal::Title, StepOutcome::Fired),
                (1_500, Reveal::Body, StepOutcome::Fired),
                (1_500, Reveal::Button, StepOutcome::Finished),
            ]
        );
        assert!(!sequencer.is_running());
    }

    #[test]
    fn test_stop_before_steps_fire_prevents_all_effects() {
        // Arrange
        let mut queue = TimerQueue::new();
        let mut sequencer = Sequencer::new("test");
        let run = sequencer.start(&mut queue, &reveal_sequence());

        // Act
        let cancelled = sequencer.stop(&mut queue, run);
        let seen = drain(&mut queue, &mut sequencer, 10_000);

        // Assert
        assert_eq!(cancelled, 3);
        assert!(seen.is_empty());
    }

    #[test]
    fn test_stop_after_run_finished_is_noop() {
        // Arrange
        let mut queue = TimerQueue::new();
        let mut sequencer = Sequencer::new("test");
        let run = sequencer.start(&mut queue, &reveal_sequence());
        drain(&mut queue, &mut sequencer, 10_000);

        // Act
        let cancelled = sequencer.stop(&mut queue, run);

        // Assert
        assert_eq!(cancelled, 0);
    }

    #[test]
    fn test_start_supersedes_previous_run() {
        // Arrange
        let mut queue = TimerQueue::new();
        let mut sequencer = Sequencer::new("test");
        let first = sequencer.start(&mut queue, &reveal_sequence());
        drain(&mut queue, &mut sequencer, 100);

        // Act
        let second = sequencer.start(&mut queue, &reveal_sequence());
        let seen = drain(&mut queue, &mut sequencer, 10_000);

        // Assert
        assert_ne!(first, second);
        assert_eq!(seen.len(), 3);
        assert!(seen.iter().all(|(at, _, _)| *at >= 100));
        assert_eq!(sequencer.stop(&mut queue, first), 0);
    }

    #[test]
    fn test_start_if_idle_ignores_second_trigger() {
        // Arrange
        let mut queue = TimerQueue::new();
        let mut sequencer = Sequencer::new("test");
        let first = sequencer.start_if_idle(&mut queue, &reveal_sequence());

        // Act
        let second = sequencer.start_if_idle(&mut queue, &reveal_sequence());

        // Assert
        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_acknowledge_rejects_timers_from_other_owners() {
        // Arrange
        let mut queue = TimerQueue::new();
        let mut sequencer = Sequencer::new("test");
        sequencer.start(&mut queue, &reveal_sequence());
        let stranger = queue.schedule(0, Reveal::Title);

        // Act
        let outcome = sequencer.acknowledge(stranger);

        // Assert
        assert_eq!(outcome, StepOutcome::Foreign);
        assert_eq!(sequencer.pending_steps(), 3);
    }

    #[test]
    fn test_empty_sequence_finishes_immediately() {
        // Arrange
        let mut queue: TimerQueue<Reveal> = TimerQueue::new();
        let mut sequencer = Sequencer::new("test");

        // Act
        sequencer.start(&mut queue, &Sequence::new(Vec::new()).unwrap());

        // Assert
        assert!(!sequencer.is_running());
        assert!(queue.is_empty());
    }
}
