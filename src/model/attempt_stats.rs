use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Snapshot taken at the moment a session ends, fed to the leaderboard and
/// carried on the completion event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttemptStats {
    pub elapsed: Duration,
    pub mistakes: u32,
    pub won: bool,
    pub puzzle_number: usize,
    pub timestamp: i64,
    pub attempt_id: Uuid,
}
