//! Spaced repetition scheduling core for the Vocazen vocabulary trainer.
//!
//! Provides:
//! - The six-level card learning model (`Card`, `Stage`, `Rating`)
//! - The pure review transition function (`Scheduler`) and its interval
//!   ladder policy (`Ladder`)
//! - Study session queues (standard, weak, cram) with in-session re-queue
//!   of failed cards (`Session`)
//! - Session pass/fail tallies (`SessionSummary`)
//! - The persistence collaborator contract (`CardStore`, `Clock`)

pub mod algorithm;
pub mod error;
pub mod session;
pub mod store;
pub mod summary;
pub mod types;

pub use algorithm::{Ladder, ReviewOutcome, Scheduler};
pub use error::{Result, SrsError};
pub use session::{ReviewEvent, Session, REQUEUE_OFFSET, WEAK_STAGE_THRESHOLD};
pub use store::{CardStore, Clock, FixedClock, MemoryStore, SystemClock};
pub use summary::SessionSummary;
pub use types::{Card, Rating, Stage, StudyMode};
