//! Score bookkeeping: current score, best score, milestones.

use serde::{Deserialize, Serialize};

/// Current and best score for one session history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub current: u32,
    /// Never decreases.
    pub best: u32,
}

/// Outcome of a single point being scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreStep {
    pub score: u32,
    pub milestone: bool,
    pub new_best: bool,
}

impl Scoreboard {
    pub fn new(best: u32) -> Self {
        Self { current: 0, best }
    }

    /// Score exactly one point. Best score follows immediately.
    pub fn increment(&mut self, milestone_interval: u32) -> ScoreStep {
        self.current += 1;
        let new_best = self.current > self.best;
        if new_best {
            self.best = self.current;
        }
        ScoreStep {
            score: self.current,
            milestone: milestone_interval > 0 && self.current % milestone_interval == 0,
            new_best,
        }
    }

    pub fn reset_current(&mut self) {
        self.current = 0;
    }
}
