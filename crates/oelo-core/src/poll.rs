// ── Poll bookkeeping ──
//
// Tracks consecutive read failures and the poll loop's phase. The loop
// itself lives in the coordinator; this is the part worth testing alone.

use serde::Serialize;
use strum::Display;

/// Where the poll loop is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PollPhase {
    Idle,
    Polling,
    /// The last poll failed; waiting for the next tick.
    Backoff,
}

/// Effect of one poll result on controller reachability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reachability {
    Unchanged,
    BecameAvailable,
    BecameUnavailable,
}

#[derive(Debug)]
pub struct PollTracker {
    threshold: u32,
    consecutive_failures: u32,
    phase: PollPhase,
    reachable: bool,
}

impl PollTracker {
    /// Starts out unreachable: nothing has been read yet.
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(1),
            consecutive_failures: 0,
            phase: PollPhase::Idle,
            reachable: false,
        }
    }

    pub fn phase(&self) -> PollPhase {
        self.phase
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn begin(&mut self) {
        self.phase = PollPhase::Polling;
    }

    /// Poll result discarded (shutdown); go back to idle without counting it.
    pub fn abandon(&mut self) {
        self.phase = PollPhase::Idle;
    }

    pub fn record_success(&mut self) -> Reachability {
        self.phase = PollPhase::Idle;
        self.consecutive_failures = 0;
        if self.reachable {
            Reachability::Unchanged
        } else {
            self.reachable = true;
            Reachability::BecameAvailable
        }
    }

    pub fn record_failure(&mut self) -> Reachability {
        self.phase = PollPhase::Backoff;
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        if self.reachable && self.consecutive_failures >= self.threshold {
            self.reachable = false;
            Reachability::BecameUnavailable
        } else {
            Reachability::Unchanged
        }
    }
}
