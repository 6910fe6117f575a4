use super::AttemptStats;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionState {
    Won(AttemptStats),
    Lost(AttemptStats),
}

impl CompletionState {
    pub fn stats(&self) -> &AttemptStats {
        match self {
            CompletionState::Won(stats) | CompletionState::Lost(stats) => stats,
        }
    }
}
