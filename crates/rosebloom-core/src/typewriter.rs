//! Character-paced text reveal.

use tracing::debug;

use crate::error::DomainError;
use crate::timer::{TimerHandle, TimerQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypewriterPhase {
    Idle,
    Typing(TimerHandle),
    Cancelled,
    Completed,
}

/// Result of delivering a tick to the typewriter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer is not the typewriter's live tick; nothing changed.
    Stale,
    /// One more character is visible and another tick is scheduled.
    Revealed {
        /// Characters now visible.
        revealed: usize,
    },
    /// The whole text is visible. Reported exactly once per typewriter.
    Completed {
        /// Characters now visible, equal to the source length.
        revealed: usize,
    },
}

/// Reveals one character of `source` per tick until it is exhausted.
///
/// The engine is a single repeating timer: each tick schedules the next one
/// `tick_interval_ms` after its own deadline, so the pace does not drift with
/// dispatch latency. `E` is the effect tag the owner uses to route ticks back.
#[derive(Debug, Clone)]
pub struct Typewriter<E> {
    source: String,
    source_len: usize,
    revealed: usize,
    revealed_bytes: usize,
    tick_interval_ms: u64,
    tick_effect: E,
    phase: TypewriterPhase,
}

impl<E: Clone> Typewriter<E> {
    /// Creates an idle typewriter over `source`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ZeroTickInterval` if `tick_interval_ms` is zero.
    pub fn new(
        source: impl Into<String>,
        tick_interval_ms: u64,
        tick_effect: E,
    ) -> Result<Self, DomainError> {
        if tick_interval_ms == 0 {
            return Err(DomainError::ZeroTickInterval);
        }
        let source = source.into();
        Ok(Self {
            source_len: source.chars().count(),
            source,
            revealed: 0,
            revealed_bytes: 0,
            tick_interval_ms,
            tick_effect,
            phase: TypewriterPhase::Idle,
        })
    }

    /// Schedules the first tick. Ignored unless the typewriter is idle.
    pub fn start(&mut self, queue: &mut TimerQueue<E>) -> Option<TimerHandle> {
        if self.phase != TypewriterPhase::Idle {
            return None;
        }
        let handle = queue.schedule(self.tick_interval_ms, self.tick_effect.clone());
        self.phase = TypewriterPhase::Typing(handle);
        debug!(
            chars = self.source_len,
            interval_ms = self.tick_interval_ms,
            "typewriter started"
        );
        Some(handle)
    }

    /// Advances by one character in response to the timer `handle` firing.
    pub fn on_tick(&mut self, queue: &mut TimerQueue<E>, handle: TimerHandle) -> TickOutcome {
        if self.phase != TypewriterPhase::Typing(handle) {
            return TickOutcome::Stale;
        }

        if let Some(next) = self.source[self.revealed_bytes..].chars().next() {
            self.revealed += 1;
            self.revealed_bytes += next.len_utf8();
        }

        if self.revealed == self.source_len {
            self.phase = TypewriterPhase::Completed;
            debug!(chars = self.revealed, "typewriter completed");
            return TickOutcome::Completed {
                revealed: self.revealed,
            };
        }

        let next = queue.schedule(self.tick_interval_ms, self.tick_effect.clone());
        self.phase = TypewriterPhase::Typing(next);
        TickOutcome::Revealed {
            revealed: self.revealed,
        }
    }

    /// Stops future ticks, freezing the visible text. Returns `true` if a
    /// tick was pending.
    pub fn cancel(&mut self, queue: &mut TimerQueue<E>) -> bool {
        match self.phase {
            TypewriterPhase::Typing(handle) => {
                self.phase = TypewriterPhase::Cancelled;
                queue.cancel(handle)
            }
            TypewriterPhase::Idle => {
                self.phase = TypewriterPhase::Cancelled;
                false
            }
            TypewriterPhase::Cancelled | TypewriterPhase::Completed => false,
        }
    }
}

impl<E> Typewriter<E> {
    /// The visible prefix of the source text.
    #[must_use]
    pub fn displayed(&self) -> &str {
        &self.source[..self.revealed_bytes]
    }

    /// The full source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Characters visible so far.
    #[must_use]
    pub fn revealed_len(&self) -> usize {
        self.revealed
    }

    /// Characters in the source text.
    #[must_use]
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    /// Returns `true` once the whole text is visible.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.phase == TypewriterPhase::Completed
    }

    /// Returns `true` while ticks are scheduled.
    #[must_use]
    pub fn is_typing(&self) -> bool {
        matches!(self.phase, TypewriterPhase::Typing(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Tick;

    fn run(typewriter: &mut Typewriter<Tick>, queue: &mut TimerQueue<Tick>, horizon: u64) -> Vec<(u64, TickOutcome)> {
        let mut seen = Vec::new();
        while let Some(fired) = queue.pop_due(horizon) {
            seen.push((fired.at_ms, typewriter.on_tick(queue, fired.handle)));
        }
        queue.advance_to(horizon);
        seen
    }

    #[test]
    fn test_new_rejects_zero_interval() {
        // Act
        let result = Typewriter::new("hello", 0, Tick);

        // Assert
        assert_eq!(result.unwrap_err(), DomainError::ZeroTickInterval);
    }

    #[test]
    fn test_completes_exactly_once_at_length_times_interval() {
        // Arrange
        let mut queue = TimerQueue::new();
        let mut typewriter = Typewriter::new("rose", 50, Tick).unwrap();
        typewriter.start(&mut queue);

        // Act
        let seen = run(&mut typewriter, &mut queue, 10_000);

        // Assert
        assert_eq!(
            seen,
            vec![
                (50, TickOutcome::Revealed { revealed: 1 }),
                (100, TickOutcome::Revealed { revealed: 2 }),
                (150, TickOutcome::Revealed { revealed: 3 }),
                (200, TickOutcome::Completed { revealed: 4 }),
            ]
        );
        assert_eq!(typewriter.displayed(), "rose");
        assert!(queue.is_empty());
    }

    #[test]
    fn test_never_completes_before_full_reveal() {
        // Arrange
        let mut queue = TimerQueue::new();
        let mut typewriter = Typewriter::new("petals", 40, Tick).unwrap();
        typewriter.start(&mut queue);

        // Act
        let seen = run(&mut typewriter, &mut queue, 239);

        // Assert
        assert_eq!(typewriter.revealed_len(), 5);
        assert!(!typewriter.is_completed());
        assert!(seen
            .iter()
            .all(|(_, outcome)| matches!(outcome, TickOutcome::Revealed { .. })));
    }

    #[test]
    fn test_empty_text_completes_on_first_tick() {
        // Arrange
        let mut queue = TimerQueue::new();
        let mut typewriter = Typewriter::new("", 50, Tick).unwrap();
        typewriter.start(&mut queue);

        // Act
        let seen = run(&mut typewriter, &mut queue, 1_000);

        // Assert
        assert_eq!(seen, vec![(50, TickOutcome::Completed { revealed: 0 })]);
        assert_eq!(typewriter.displayed(), "");
    }

    #[test]
    fn test_cancel_freezes_revealed_text() {
        // Arrange
        let mut queue = TimerQueue::new();
        let mut typewriter = Typewriter::new("blooming", 10, Tick).unwrap();
        typewriter.start(&mut queue);
        run(&mut typewriter, &mut queue, 30);

        // Act
        let cancelled = typewriter.cancel(&mut queue);
        let after = run(&mut typewriter, &mut queue, 10_000);

        // Assert
        assert!(cancelled);
        assert!(after.is_empty());
        assert_eq!(typewriter.displayed(), "blo");
        assert!(!typewriter.is_completed());
    }

    #[test]
    fn test_reveals_multibyte_characters_whole() {
        // Arrange
        let mut queue = TimerQueue::new();
        let mut typewriter = Typewriter::new("a🌹b", 10, Tick).unwrap();
        typewriter.start(&mut queue);

        // Act
        run(&mut typewriter, &mut queue, 20);

        // Assert
        assert_eq!(typewriter.displayed(), "a🌹");
        assert_eq!(typewriter.source_len(), 3);
    }

    #[test]
    fn test_start_twice_is_ignored() {
        // Arrange
        let mut queue = TimerQueue::new();
        let mut typewriter = Typewriter::new("hi", 10, Tick).unwrap();
        typewriter.start(&mut queue);

        // Act
        let second = typewriter.start(&mut queue);

        // Assert
        assert!(second.is_none());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_stale_tick_is_ignored() {
        // Arrange
        let mut queue = TimerQueue::new();
        let mut typewriter = Typewriter::new("hi", 10, Tick).unwrap();
        typewriter.start(&mut queue);
        let stranger = queue.schedule(0, Tick);
        let fired = queue.pop_due(0).unwrap();

        // Act
        let outcome = typewriter.on_tick(&mut queue, fired.handle);

        // Assert
        assert_eq!(fired.handle, stranger);
        assert_eq!(outcome, TickOutcome::Stale);
        assert_eq!(typewriter.revealed_len(), 0);
    }
}
