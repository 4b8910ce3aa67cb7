//! Session pass/fail tally.

use serde::Serialize;

use crate::types::Rating;

/// Running pass/fail counts for one study session. Pure tally, no decisions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub pass_count: u32,
    pub fail_count: u32,
}

impl SessionSummary {
    pub fn record(&mut self, rating: Rating) {
        match rating {
            Rating::Pass => self.pass_count += 1,
            Rating::Fail => self.fail_count += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.pass_count + self.fail_count
    }
}
