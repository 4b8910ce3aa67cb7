//! Review transition logic.
//!
//! `Scheduler::review` is pure: it reads a card and a rating and returns the
//! next stage, interval, and due timestamp. The caller persists the result.

pub mod ladder;

use chrono::{DateTime, Duration, Utc};
use tracing::trace;

use crate::types::{Card, Rating, Stage};

pub use ladder::Ladder;

/// Result of reviewing a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewOutcome {
    pub stage: Stage,
    pub interval_days: i64,
    pub due: DateTime<Utc>,
}

/// The review transition function, parameterized by an interval ladder.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scheduler {
    pub ladder: Ladder,
}

impl Scheduler {
    pub fn new(ladder: Ladder) -> Self {
        Self { ladder }
    }

    /// Compute the card's next state after a review. Does not mutate the
    /// input; repeated passes reach `Mastered` and stay there.
    pub fn review(&self, card: &Card, rating: Rating, now: DateTime<Utc>) -> ReviewOutcome {
        let outcome = match rating {
            Rating::Pass => self.promote(card, now),
            Rating::Fail => self.demote(card, now),
        };
        trace!(
            card_id = card.id,
            ?rating,
            from = card.stage.as_step(),
            to = outcome.stage.as_step(),
            interval_days = outcome.interval_days,
            "reviewed card"
        );
        outcome
    }

    fn promote(&self, card: &Card, now: DateTime<Utc>) -> ReviewOutcome {
        let stage = card.stage.promoted();
        let interval_days = if stage.is_mastered() {
            self.ladder.mastery_interval_days()
        } else {
            self.ladder.interval_for_step(stage.as_step())
        };
        ReviewOutcome {
            stage,
            interval_days,
            due: now + Duration::days(interval_days),
        }
    }

    /// A fail keeps the ladder interval of the demoted step but schedules the
    /// card for the short-retry delay instead of the full interval, so it is
    /// not lost from standard review if the session is abandoned. The next
    /// pass overwrites `due` from the ladder.
    fn demote(&self, card: &Card, now: DateTime<Utc>) -> ReviewOutcome {
        let stage = card.stage.demoted();
        ReviewOutcome {
            stage,
            interval_days: self.ladder.interval_for_step(stage.as_step()),
            due: now + self.ladder.short_retry(),
        }
    }
}
