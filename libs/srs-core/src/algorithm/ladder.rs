//! Interval ladder policy.
//!
//! The ladder is the single source of truth for interval values: the
//! transition function never computes or hard-codes a day count elsewhere.

use chrono::Duration;

use crate::error::{Result, SrsError};
use crate::types::Stage;

/// Number of ladder rungs: one zero entry for New plus four learning steps.
pub const LADDER_STEPS: usize = 5;

/// Day intervals indexed by learning step, with the mastery cutoff and the
/// short-retry fallback used for failed cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ladder {
    steps: [i64; LADDER_STEPS],
    mastery_interval_days: i64,
    short_retry: Duration,
}

impl Default for Ladder {
    /// Primary profile: `[0, 2, 5, 10, 20]` days.
    fn default() -> Self {
        Self {
            steps: [0, 2, 5, 10, 20],
            mastery_interval_days: 36500,
            short_retry: Duration::minutes(10),
        }
    }
}

impl Ladder {
    /// Build a ladder from explicit step intervals.
    ///
    /// Step 0 must be 0 days (New has no interval) and the remaining steps
    /// must be strictly increasing.
    pub fn new(steps: [i64; LADDER_STEPS]) -> Result<Self> {
        if steps[0] != 0 {
            return Err(SrsError::LadderLeadingStep(steps[0]));
        }
        for step in 1..LADDER_STEPS {
            if steps[step] <= steps[step - 1] {
                return Err(SrsError::LadderNotAscending {
                    step,
                    prev: steps[step - 1],
                    value: steps[step],
                });
            }
        }
        Ok(Self {
            steps,
            ..Self::default()
        })
    }

    /// Legacy profile from the earlier 4-state design: `[0, 1, 3, 12, 30]`.
    pub fn legacy() -> Self {
        Self {
            steps: [0, 1, 3, 12, 30],
            ..Self::default()
        }
    }

    /// Override the short-retry fallback used for failed cards.
    pub fn with_short_retry(mut self, short_retry: Duration) -> Self {
        self.short_retry = short_retry;
        self
    }

    /// Interval in days for a learning step. Saturates at the top rung;
    /// this clamp is deliberate policy, not an error path.
    pub fn interval_for_step(&self, step: u8) -> i64 {
        let index = (step as usize).min(LADDER_STEPS - 1);
        self.steps[index]
    }

    /// Step index at which a card becomes mastered.
    pub fn max_step(&self) -> u8 {
        Stage::Mastered.as_step()
    }

    /// Sentinel interval for mastered cards: effectively never again.
    pub fn mastery_interval_days(&self) -> i64 {
        self.mastery_interval_days
    }

    /// Near-term retry delay persisted for a failed card, so an abandoned
    /// session never strands it outside standard due review.
    pub fn short_retry(&self) -> Duration {
        self.short_retry
    }
}
