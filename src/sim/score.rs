//! Session scoring
//!
//! Tracks the running score and the session best. Reports are idempotent per
//! wedge id so double delivery from overlapping frame callbacks cannot score
//! the same wedge twice. Nothing here outlives the session.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    score: u32,
    high_score: u32,
    /// Wedge ids already counted this round
    processed: HashSet<u64>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Record a judged wedge. Repeat reports for an already-processed id are
    /// no-ops. A hit increments the score and raises the session best; a miss
    /// zeroes the score and clears the processed set, since a fresh round
    /// begins and old ids can be garbage collected.
    pub fn report(&mut self, wedge_id: u64, aligned: bool) {
        if !self.processed.insert(wedge_id) {
            return;
        }

        if aligned {
            self.score += 1;
            if self.score > self.high_score {
                self.high_score = self.score;
            }
        } else {
            self.score = 0;
            self.processed.clear();
        }
    }
}
