//! Core types for the scheduling engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Learning stage of a card.
///
/// Persisted as its ordinal value: `0 = New`, `1..=4` learning steps,
/// `5 = Mastered`. Mastered cards are excluded from standard due review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum Stage {
    New = 0,
    Learning1 = 1,
    Learning2 = 2,
    Learning3 = 3,
    Learning4 = 4,
    Mastered = 5,
}

impl Default for Stage {
    fn default() -> Self {
        Self::New
    }
}

impl Stage {
    /// Ordinal step index of this stage.
    pub fn as_step(self) -> u8 {
        self as u8
    }

    /// Stage after a successful review. Saturates at `Mastered`.
    pub fn promoted(self) -> Self {
        match self {
            Self::New => Self::Learning1,
            Self::Learning1 => Self::Learning2,
            Self::Learning2 => Self::Learning3,
            Self::Learning3 => Self::Learning4,
            Self::Learning4 | Self::Mastered => Self::Mastered,
        }
    }

    /// Stage after a failed review. Never drops below the first learning
    /// step: a failed `New` card enters `Learning1` rather than staying new.
    pub fn demoted(self) -> Self {
        match self {
            Self::New | Self::Learning1 | Self::Learning2 => Self::Learning1,
            Self::Learning3 => Self::Learning2,
            Self::Learning4 => Self::Learning3,
            Self::Mastered => Self::Learning4,
        }
    }

    pub fn is_mastered(self) -> bool {
        self == Self::Mastered
    }
}

impl From<Stage> for u8 {
    fn from(stage: Stage) -> u8 {
        stage as u8
    }
}

impl TryFrom<u8> for Stage {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::New),
            1 => Ok(Self::Learning1),
            2 => Ok(Self::Learning2),
            3 => Ok(Self::Learning3),
            4 => Ok(Self::Learning4),
            5 => Ok(Self::Mastered),
            _ => Err(format!("invalid stage ordinal: {value}")),
        }
    }
}

/// Rating for a review. Exactly two variants, no partial credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Pass,
    Fail,
}

impl Rating {
    pub fn is_pass(self) -> bool {
        self == Self::Pass
    }
}

/// One vocabulary item's learning record, decoupled from its content.
///
/// `due` is always derived from the review that produced it; `interval_days`
/// only ever holds a ladder value or the mastery sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub deck_id: i64,
    pub stage: Stage,
    pub interval_days: i64,
    pub due: DateTime<Utc>,
}

impl Card {
    /// Record for a freshly imported card: new, no interval, due immediately.
    pub fn new(id: i64, deck_id: i64, now: DateTime<Utc>) -> Self {
        Self {
            id,
            deck_id,
            stage: Stage::New,
            interval_days: 0,
            due: now,
        }
    }
}

/// Study session mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyMode {
    /// Cards due now, ordered ascending by due date.
    Standard,
    /// Cards below the confidence threshold, regardless of due date.
    Weak,
    /// A fixed number of cards drawn from the whole deck, seeded shuffle.
    Cram { count: usize, seed: u64 },
}
