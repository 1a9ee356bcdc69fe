//! Delayed continuations on a virtual clock.
//!
//! The engine never sleeps. Pacing delays (AI thinking, result display)
//! become tasks on a min-heap keyed by due time. Each task records the
//! session generation and phase it was scheduled in; the session drops any
//! task whose generation or phase no longer matches when it comes due.
//!
//! ```
//! use blackjack_battler::session::{Continuation, RoundPhase, Scheduler};
//!
//! let mut scheduler = Scheduler::new();
//! scheduler.schedule(500, 0, Continuation::AiTakeTurn);
//! scheduler.schedule(100, 0, Continuation::AiOpeningDraw);
//!
//! let first = scheduler.pop_due(1000).unwrap();
//! assert_eq!(first.continuation, Continuation::AiOpeningDraw);
//! assert_eq!(first.expected_phase, RoundPhase::AiTurn);
//! assert_eq!(scheduler.now_ms(), 100);
//! ```

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use super::state::RoundPhase;

/// Work the session resumes after a delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Continuation {
    /// Second card of the AI's opening deal.
    AiOpeningDraw,
    /// One AI decision.
    AiTakeTurn,
    /// Clear the table and start the next round.
    NextRound,
    /// Advance to the next encounter.
    NextEncounter,
}

impl Continuation {
    /// Phase the session must still be in for this continuation to run.
    #[must_use]
    pub const fn expected_phase(self) -> RoundPhase {
        match self {
            Continuation::AiOpeningDraw | Continuation::AiTakeTurn => RoundPhase::AiTurn,
            Continuation::NextRound | Continuation::NextEncounter => RoundPhase::Resolution,
        }
    }
}

/// A continuation waiting on the clock.
#[derive(Clone, Copy, Debug)]
pub struct ScheduledTask {
    pub due_ms: u64,
    /// Tie-breaker: tasks due at the same time run in scheduling order.
    pub seq: u64,
    pub generation: u64,
    pub expected_phase: RoundPhase,
    pub continuation: Continuation,
}

impl ScheduledTask {
    fn key(&self) -> (u64, u64) {
        (self.due_ms, self.seq)
    }
}

impl PartialEq for ScheduledTask {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ScheduledTask {}

impl PartialOrd for ScheduledTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledTask {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Virtual clock plus pending continuations.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_seq: u64,
    queue: BinaryHeap<Reverse<ScheduledTask>>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `continuation` to run `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u64, generation: u64, continuation: Continuation) {
        let task = ScheduledTask {
            due_ms: self.now_ms.saturating_add(delay_ms),
            seq: self.next_seq,
            generation,
            expected_phase: continuation.expected_phase(),
            continuation,
        };
        self.next_seq += 1;
        self.queue.push(Reverse(task));
    }

    /// Pop the earliest task due at or before `until_ms`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<ScheduledTask> {
        let due = self.queue.peek().is_some_and(|Reverse(t)| t.due_ms <= until_ms);
        if !due {
            return None;
        }
        self.pop_next()
    }

    /// Pop the earliest task regardless of time, moving the clock forward to it.
    pub fn pop_next(&mut self) -> Option<ScheduledTask> {
        let Reverse(task) = self.queue.pop()?;
        self.now_ms = self.now_ms.max(task.due_ms);
        Some(task)
    }

    /// Move the clock forward. Never moves it backwards.
    pub fn advance_to(&mut self, ms: u64) {
        self.now_ms = self.now_ms.max(ms);
    }

    /// Due time of the earliest pending task.
    #[must_use]
    pub fn next_due_ms(&self) -> Option<u64> {
        self.queue.peek().map(|Reverse(t)| t.due_ms)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_by_due_then_seq() {
        let mut s = Scheduler::new();
        s.schedule(200, 0, Continuation::NextRound);
        s.schedule(100, 0, Continuation::AiTakeTurn);
        s.schedule(100, 0, Continuation::AiOpeningDraw);

        assert_eq!(s.pop_next().map(|t| t.continuation), Some(Continuation::AiTakeTurn));
        assert_eq!(s.pop_next().map(|t| t.continuation), Some(Continuation::AiOpeningDraw));
        assert_eq!(s.pop_next().map(|t| t.continuation), Some(Continuation::NextRound));
        assert!(s.pop_next().is_none());
        assert_eq!(s.now_ms(), 200);
    }

    #[test]
    fn test_pop_due_respects_deadline() {
        let mut s = Scheduler::new();
        s.schedule(500, 3, Continuation::NextEncounter);

        assert!(s.pop_due(499).is_none());
        let task = s.pop_due(500).unwrap();
        assert_eq!(task.generation, 3);
        assert_eq!(task.expected_phase, RoundPhase::Resolution);
        assert!(s.is_empty());
    }

    #[test]
    fn test_delays_are_relative_to_now() {
        let mut s = Scheduler::new();
        s.advance_to(1000);
        s.schedule(250, 0, Continuation::AiTakeTurn);
        assert_eq!(s.next_due_ms(), Some(1250));

        // Clock never runs backwards
        s.advance_to(10);
        assert_eq!(s.now_ms(), 1000);
    }
}
