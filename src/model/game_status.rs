use serde::{Deserialize, Serialize};

/// Session lifecycle. `Won` and `Lost` are terminal; no operation leaves
/// them short of replacing the session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}
