use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::DurationMilliSeconds;

use super::AttemptStats;

/// One row of the persisted leaderboard. The wire shape is fixed:
/// `{"date": ISO-8601, "time": integer ms, "mistakes": n, "won": bool,
/// "puzzleNumber": n}`.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub date: DateTime<Utc>,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub time: Duration,
    pub mistakes: u32,
    pub won: bool,
    #[serde(rename = "puzzleNumber")]
    pub puzzle_number: usize,
}

impl LeaderboardEntry {
    pub fn from_attempt(stats: &AttemptStats, date: DateTime<Utc>) -> Self {
        Self {
            date,
            time: stats.elapsed,
            mistakes: stats.mistakes,
            won: stats.won,
            puzzle_number: stats.puzzle_number,
        }
    }
}
