use std::collections::BTreeMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use crate::config::difficulty::Difficulty;

/// Entries kept per difficulty.
pub const LEADERBOARD_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    pub recorded_at: DateTime<Utc>,
}

/// Top scores per difficulty, best first.
///
/// Only the ranking rules live here; where the table is stored is up to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Leaderboard {
    tables: BTreeMap<Difficulty, Vec<LeaderboardEntry>>,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Leaderboard {
            tables: Difficulty::ALL.into_iter().map(|d| (d, Vec::new())).collect(),
        }
    }
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a serialized table. Unreadable input yields an empty leaderboard.
    pub fn from_json_or_default(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(leaderboard) => leaderboard,
            Err(e) => {
                warn!(error = %e, "unreadable leaderboard, starting empty");
                Self::default()
            }
        }
    }

    pub fn add_score(&mut self, difficulty: Difficulty, score: u32, name: &str) -> Option<usize> {
        self.add_score_at(difficulty, score, name, Utc::now())
    }

    /// add_score_at records a score and returns its 1-based rank, or `None`
    /// when it did not make the table. Ties rank below earlier entries.
    pub fn add_score_at(
        &mut self,
        difficulty: Difficulty,
        score: u32,
        name: &str,
        recorded_at: DateTime<Utc>,
    ) -> Option<usize> {
        let table = self.tables.entry(difficulty).or_default();
        let position = table.iter().position(|entry| entry.score < score).unwrap_or(table.len());
        table.insert(
            position,
            LeaderboardEntry {
                name: name.to_string(),
                score,
                recorded_at,
            },
        );
        table.truncate(LEADERBOARD_SIZE);

        if position < LEADERBOARD_SIZE {
            Some(position + 1)
        } else {
            None
        }
    }

    pub fn top_scores(&self, difficulty: Difficulty, limit: usize) -> &[LeaderboardEntry] {
        match self.tables.get(&difficulty) {
            Some(table) => &table[..limit.min(table.len())],
            None => &[],
        }
    }

    /// True while the table has room, otherwise only for scores strictly above the last entry.
    pub fn is_high_score(&self, difficulty: Difficulty, score: u32) -> bool {
        let table = self.top_scores(difficulty, LEADERBOARD_SIZE);
        if table.len() < LEADERBOARD_SIZE {
            return true;
        }
        table.last().map_or(true, |last| score > last.score)
    }
}
