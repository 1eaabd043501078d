//! High score leaderboard
//!
//! Ranks finished runs, highest first, keeping the top 25. Storing the table
//! is left to the host; it round-trips through serde.

use serde::{Deserialize, Serialize};

use crate::sim::ScoreSubmission;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 25;

/// Longest name kept on the board
pub const MAX_NAME_LEN: usize = 16;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u64,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Has to beat the lowest entry; ties keep the older run
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, name: &str, score: u64, timestamp: f64) -> Option<usize> {
        let rank = self.potential_rank(score)?;

        let name = match name.trim() {
            "" => "Anonymous".to_string(),
            trimmed => trimmed.chars().take(MAX_NAME_LEN).collect(),
        };
        log::info!("{} placed #{} with {}", name, rank, score);

        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                name,
                score,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Add a finished run's submission
    pub fn add_submission(&mut self, submission: &ScoreSubmission, timestamp: f64) -> Option<usize> {
        self.add_score(&submission.name, submission.score, timestamp)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}
