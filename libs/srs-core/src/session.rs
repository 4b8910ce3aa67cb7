//! Study session queue.
//!
//! A session is a working list over a deck snapshot, not the persisted due
//! order. Failed cards are reinserted a fixed offset back so the learner
//! sees them again before the session ends; passed cards leave the queue
//! for good. The session ends when the queue is empty.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use crate::algorithm::Scheduler;
use crate::error::Result;
use crate::store::CardStore;
use crate::summary::SessionSummary;
use crate::types::{Card, Rating, StudyMode};

/// Stage step below which a card counts as weak.
pub const WEAK_STAGE_THRESHOLD: u8 = 3;

/// How many positions back a failed card is reinserted.
pub const REQUEUE_OFFSET: usize = 3;

/// One processed review, offered to the caller for persistence.
#[derive(Debug, Clone, Copy)]
pub struct ReviewEvent {
    /// The card with the review outcome applied.
    pub card: Card,
    pub rating: Rating,
    pub interval_before: i64,
}

/// An in-progress study session over one deck.
pub struct Session {
    scheduler: Scheduler,
    mode: StudyMode,
    practice: bool,
    cards: HashMap<i64, Card>,
    queue: Vec<i64>,
    summary: SessionSummary,
}

impl Session {
    /// Build a session from a deck snapshot. An empty selection is a valid
    /// terminal session, not an error.
    pub fn build(
        scheduler: Scheduler,
        cards: Vec<Card>,
        mode: StudyMode,
        practice: bool,
        now: DateTime<Utc>,
    ) -> Self {
        let queue = select_queue(&cards, mode, now);
        debug!(?mode, practice, queued = queue.len(), "session built");

        Self {
            scheduler,
            mode,
            practice,
            cards: cards.into_iter().map(|c| (c.id, c)).collect(),
            queue,
            summary: SessionSummary::default(),
        }
    }

    /// Build a session by loading the deck snapshot through the persistence
    /// collaborator.
    pub fn from_store<S: CardStore>(
        store: &S,
        scheduler: Scheduler,
        deck_id: i64,
        mode: StudyMode,
        practice: bool,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let cards = store.load_cards_for_deck(deck_id)?;
        Ok(Self::build(scheduler, cards, mode, practice, now))
    }

    /// The card currently at the front of the queue.
    pub fn current(&self) -> Option<&Card> {
        self.queue.first().and_then(|id| self.cards.get(id))
    }

    /// Answer the current card. Pass removes it from the session; fail
    /// reinserts it `REQUEUE_OFFSET` positions back (at the end if fewer
    /// cards remain). Returns the event the caller should persist.
    pub fn answer(&mut self, rating: Rating, now: DateTime<Utc>) -> Option<ReviewEvent> {
        if self.queue.is_empty() {
            return None;
        }
        let id = self.queue.remove(0);
        let card = self.cards.get(&id).copied()?;

        let outcome = self.scheduler.review(&card, rating, now);
        let updated = Card {
            stage: outcome.stage,
            interval_days: outcome.interval_days,
            due: outcome.due,
            ..card
        };
        self.cards.insert(id, updated);
        self.summary.record(rating);

        if !rating.is_pass() {
            let position = REQUEUE_OFFSET.min(self.queue.len());
            self.queue.insert(position, id);
        }

        Some(ReviewEvent {
            card: updated,
            rating,
            interval_before: card.interval_days,
        })
    }

    /// Write a review event back, unless this is a practice session.
    /// Practice outcomes are feedback only and never reach storage.
    pub fn persist_event<S: CardStore>(&self, store: &mut S, event: &ReviewEvent) -> Result<()> {
        if self.practice {
            return Ok(());
        }
        store.save_card(&event.card)
    }

    pub fn is_practice(&self) -> bool {
        self.practice
    }

    pub fn mode(&self) -> StudyMode {
        self.mode
    }

    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary
    }
}

fn select_queue(cards: &[Card], mode: StudyMode, now: DateTime<Utc>) -> Vec<i64> {
    match mode {
        StudyMode::Standard => {
            let mut due: Vec<&Card> = cards
                .iter()
                .filter(|c| !c.stage.is_mastered() && c.due <= now)
                .collect();
            due.sort_by_key(|c| (c.due, c.id));
            due.iter().map(|c| c.id).collect()
        }
        StudyMode::Weak => {
            let mut weak: Vec<&Card> = cards
                .iter()
                .filter(|c| c.stage.as_step() < WEAK_STAGE_THRESHOLD)
                .collect();
            weak.sort_by_key(|c| (c.stage, c.due, c.id));
            weak.iter().map(|c| c.id).collect()
        }
        StudyMode::Cram { count, seed } => {
            // Canonical order before shuffling: the same seed must produce
            // the same queue regardless of snapshot iteration order.
            let mut ids: Vec<i64> = cards.iter().map(|c| c.id).collect();
            ids.sort_unstable();
            let mut rng = StdRng::seed_from_u64(seed);
            ids.shuffle(&mut rng);
            ids.truncate(count);
            ids
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::Ladder;
    use crate::types::Stage;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn card(id: i64, stage: Stage, due: DateTime<Utc>) -> Card {
        Card {
            id,
            deck_id: 1,
            stage,
            interval_days: 0,
            due,
        }
    }

    fn scheduler() -> Scheduler {
        Scheduler::new(Ladder::default())
    }

    #[test]
    fn standard_orders_by_due_ascending() {
        let cards = vec![
            card(1, Stage::Learning1, t0() - Duration::hours(1)),
            card(2, Stage::Learning2, t0() - Duration::days(2)),
            card(3, Stage::New, t0() - Duration::days(1)),
        ];
        let mut session = Session::build(scheduler(), cards, StudyMode::Standard, false, t0());

        let mut order = Vec::new();
        while let Some(c) = session.current() {
            order.push(c.id);
            session.answer(Rating::Pass, t0());
        }
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn standard_excludes_mastered_and_future_due() {
        let cards = vec![
            card(1, Stage::Mastered, t0() - Duration::days(1)),
            card(2, Stage::Learning1, t0() + Duration::days(1)),
            card(3, Stage::Learning1, t0()),
        ];
        let session = Session::build(scheduler(), cards, StudyMode::Standard, false, t0());
        assert_eq!(session.remaining(), 1);
        assert_eq!(session.current().unwrap().id, 3);
    }

    #[test]
    fn weak_selects_below_threshold_regardless_of_due() {
        let cards = vec![
            card(1, Stage::Learning2, t0() + Duration::days(30)),
            card(2, Stage::Learning3, t0() - Duration::days(1)),
            card(3, Stage::New, t0() + Duration::days(5)),
            card(4, Stage::Mastered, t0() - Duration::days(1)),
        ];
        let session = Session::build(scheduler(), cards, StudyMode::Weak, false, t0());
        assert_eq!(session.remaining(), 2);
        // Weakest stage first.
        assert_eq!(session.current().unwrap().id, 3);
    }

    #[test]
    fn cram_is_deterministic_for_a_fixed_seed() {
        let cards: Vec<Card> = (1..=10)
            .map(|id| card(id, Stage::Learning1, t0() + Duration::days(id)))
            .collect();
        let mode = StudyMode::Cram { count: 6, seed: 42 };

        let a = Session::build(scheduler(), cards.clone(), mode, false, t0());
        let mut reversed = cards.clone();
        reversed.reverse();
        let b = Session::build(scheduler(), reversed, mode, false, t0());

        let drain = |mut s: Session| {
            let mut ids = Vec::new();
            while let Some(c) = s.current() {
                ids.push(c.id);
                s.answer(Rating::Pass, t0());
            }
            ids
        };
        assert_eq!(drain(a), drain(b));
    }

    #[test]
    fn cram_truncates_to_requested_count() {
        let cards: Vec<Card> = (1..=10)
            .map(|id| card(id, Stage::Mastered, t0() + Duration::days(400)))
            .collect();
        let session = Session::build(
            scheduler(),
            cards,
            StudyMode::Cram { count: 4, seed: 7 },
            false,
            t0(),
        );
        // Irrespective of due or mastery.
        assert_eq!(session.remaining(), 4);
    }

    #[test]
    fn fail_reinserts_at_fixed_offset() {
        let cards: Vec<Card> = (1..=6)
            .map(|id| card(id, Stage::Learning1, t0() - Duration::days(10 - id)))
            .collect();
        let mut session = Session::build(scheduler(), cards, StudyMode::Standard, false, t0());

        let failed_id = session.current().unwrap().id;
        session.answer(Rating::Fail, t0());

        // Three other cards come up before the failed card returns.
        for _ in 0..REQUEUE_OFFSET {
            assert_ne!(session.current().unwrap().id, failed_id);
            session.answer(Rating::Pass, t0());
        }
        assert_eq!(session.current().unwrap().id, failed_id);
    }

    #[test]
    fn fail_reinserts_at_end_when_queue_is_short() {
        let cards = vec![
            card(1, Stage::Learning1, t0() - Duration::days(2)),
            card(2, Stage::Learning1, t0() - Duration::days(1)),
        ];
        let mut session = Session::build(scheduler(), cards, StudyMode::Standard, false, t0());

        session.answer(Rating::Fail, t0());
        assert_eq!(session.current().unwrap().id, 2);
        session.answer(Rating::Pass, t0());
        assert_eq!(session.current().unwrap().id, 1);
    }

    #[test]
    fn pass_removes_card_for_the_session() {
        let cards = vec![card(1, Stage::Learning1, t0() - Duration::days(1))];
        let mut session = Session::build(scheduler(), cards, StudyMode::Standard, false, t0());

        let event = session.answer(Rating::Pass, t0()).unwrap();
        assert_eq!(event.card.stage, Stage::Learning2);
        assert!(session.is_finished());
        assert!(session.answer(Rating::Pass, t0()).is_none());
    }

    #[test]
    fn empty_deck_is_a_terminal_session() {
        let session = Session::build(scheduler(), Vec::new(), StudyMode::Standard, false, t0());
        assert!(session.is_finished());
        assert_eq!(session.summary(), SessionSummary::default());
    }

    #[test]
    fn queue_conservation_with_intermediate_fails() {
        let cards: Vec<Card> = (1..=5)
            .map(|id| card(id, Stage::Learning1, t0() - Duration::days(id)))
            .collect();
        let mut session = Session::build(scheduler(), cards, StudyMode::Standard, false, t0());

        // Fail the first two cards once each, then pass everything.
        let mut fails = 2;
        while !session.is_finished() {
            let rating = if fails > 0 {
                fails -= 1;
                Rating::Fail
            } else {
                Rating::Pass
            };
            session.answer(rating, t0());
        }

        let summary = session.summary();
        assert_eq!(summary.pass_count, 5);
        assert_eq!(summary.fail_count, 2);
        assert_eq!(summary.total(), 7);
    }

    #[test]
    fn event_reports_interval_before_and_after() {
        let cards = vec![card(1, Stage::Learning2, t0() - Duration::days(1))];
        let mut session = Session::build(scheduler(), cards, StudyMode::Standard, false, t0());

        let event = session.answer(Rating::Pass, t0()).unwrap();
        assert_eq!(event.interval_before, 0);
        assert_eq!(event.card.interval_days, 10);
    }
}
