//! Persistence collaborator contract.
//!
//! The core never owns storage. Hosts hand a `CardStore` to the session
//! builder at construction and write review results back through it; a
//! failed save is the host's concern, the scheduler does not retry.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::types::Card;

/// Injected time source, mockable for deterministic tests.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed time source for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Card storage contract.
///
/// `load_cards_for_deck` returns a snapshot in no particular order; the
/// session builder re-sorts per mode. `save_card` upserts by id and must be
/// idempotent for duplicate calls.
pub trait CardStore {
    fn load_cards_for_deck(&self, deck_id: i64) -> Result<Vec<Card>>;
    fn save_card(&mut self, card: &Card) -> Result<()>;
}

/// In-memory store, used in tests and as a reference implementation.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    cards: HashMap<i64, Card>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, card: Card) {
        self.cards.insert(card.id, card);
    }

    pub fn get(&self, id: i64) -> Option<&Card> {
        self.cards.get(&id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl CardStore for MemoryStore {
    fn load_cards_for_deck(&self, deck_id: i64) -> Result<Vec<Card>> {
        Ok(self
            .cards
            .values()
            .filter(|c| c.deck_id == deck_id)
            .copied()
            .collect())
    }

    fn save_card(&mut self, card: &Card) -> Result<()> {
        self.cards.insert(card.id, *card);
        Ok(())
    }
}
