//! Deferred steps of a round.
//!
//! Dealing is paced: every card arrives a fixed delay after the previous
//! one. Instead of nesting timers, the table queues the follow-up work as
//! plain [`Step`] values with the delay to wait before each. Whoever drives
//! the table (a terminal loop, a test) decides how to wait; tests simply
//! run the queue back to back.
//!
//! Each queued step is stamped with the token of the round that queued it.
//! Cancelling bumps the token, so nothing queued by an abandoned round can
//! touch the next one.

use crate::round::{HandSide, Seat};
use std::collections::VecDeque;
use std::time::Duration;

/// Deferred mutations of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// One card of the opening deal
    DealInitial(Seat),
    /// All four opening cards are out: check for a natural and for a pair
    FinishDeal,
    /// Supplemental card for one split hand
    DealSplit(HandSide),
    /// Both split hands have two cards
    CheckSplit,
    /// One iteration of the dealer drawing to 17
    DealerTurn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RoundToken(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pending {
    /// Wait this long after the previous step before applying
    pub delay: Duration,
    pub token: RoundToken,
    pub step: Step,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    queue: VecDeque<Pending>,
    token: RoundToken,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, delay: Duration, step: Step) {
        self.queue.push_back(Pending {
            delay,
            token: self.token,
            step,
        });
    }

    /// Delay of the step that runs next
    pub fn next_delay(&self) -> Option<Duration> {
        self.queue.front().map(|p| p.delay)
    }

    pub fn pop_next(&mut self) -> Option<Pending> {
        self.queue.pop_front()
    }

    /// Whether the step was queued by the current round
    pub fn is_current(&self, pending: &Pending) -> bool {
        pending.token == self.token
    }

    /// Drop everything queued and invalidate steps already handed out.
    /// Returns how many queued steps were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        self.token = RoundToken(self.token.0.wrapping_add(1));
        dropped
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }
}
