use std::fmt;
use serde::Serialize;

/// Letter rank shown on the results screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum PerformanceRank {
    C,
    B,
    A,
    S,
}

impl PerformanceRank {
    /// Stars awarded alongside the rank.
    pub fn stars(self) -> u8 {
        match self {
            PerformanceRank::S => 5,
            PerformanceRank::A => 4,
            PerformanceRank::B => 3,
            PerformanceRank::C => 1,
        }
    }
}

impl fmt::Display for PerformanceRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            PerformanceRank::S => "S",
            PerformanceRank::A => "A",
            PerformanceRank::B => "B",
            PerformanceRank::C => "C",
        };
        f.write_str(letter)
    }
}

/// Final score measured against the engine's score estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreGrade {
    pub score: u32,
    pub max_score_estimate: u32,
    /// Unclamped; beats the estimate when the player outpaces one match per challenge.
    pub percentage: f64,
    /// `percentage` clamped to 100 for progress bars.
    pub display_percentage: f64,
    pub rank: PerformanceRank,
}

/// grade_score ranks a finished session.
///
/// A zero estimate grades as 0%.
pub fn grade_score(score: u32, max_score_estimate: u32) -> ScoreGrade {
    let percentage = if max_score_estimate > 0 {
        f64::from(score) * 100.0 / f64::from(max_score_estimate)
    } else {
        0.0
    };

    let rank = if percentage >= 80.0 {
        PerformanceRank::S
    } else if percentage >= 60.0 {
        PerformanceRank::A
    } else if percentage >= 40.0 {
        PerformanceRank::B
    } else {
        PerformanceRank::C
    };

    ScoreGrade {
        score,
        max_score_estimate,
        percentage,
        display_percentage: percentage.min(100.0),
        rank,
    }
}
