//! Acquisition budget helpers.

use std::time::{Duration, SystemTime};

/// Default suspension between acquisition attempts.
pub const DEFAULT_STEP: Duration = Duration::from_millis(100);

/// Wall-clock budget for a polling acquisition.
///
/// The deadline is checked against fresh `SystemTime` snapshots rather than a
/// monotonic instant, so enforcement granularity is bounded by the step
/// interval between checks.
#[derive(Debug, Clone, Copy)]
pub struct PollDeadline {
    start: SystemTime,
    budget: Duration,
}

impl PollDeadline {
    /// Starts the budget clock now.
    pub fn start(budget: Duration) -> Self {
        Self {
            start: SystemTime::now(),
            budget,
        }
    }

    /// A zero budget allows exactly one attempt.
    pub fn is_single_attempt(&self) -> bool {
        self.budget.is_zero()
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Whether the current time has reached `start + budget`.
    pub fn has_elapsed(&self) -> bool {
        match self.start.checked_add(self.budget) {
            Some(end) => SystemTime::now() >= end,
            None => false,
        }
    }
}
