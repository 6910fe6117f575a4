use super::{
    Category, CompletionState, GuessOutcome, LeaderboardEntry, TimerState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
}

/// State-change notifications the controller emits for the rendering surface.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    PuzzleChanged {
        puzzle_number: usize,
    },
    PoolUpdated(Vec<String>),
    SelectionChanged(Vec<String>),
    SolvedChanged(Vec<Category>),
    MistakesChanged(u32),
    GuessResolved(GuessOutcome),
    /// Transient banner text; cosmetic, auto-cleared by the presenter.
    StatusMessage {
        text: String,
        kind: MessageKind,
    },
    /// Carries the running flag the embedding uses to start or cancel its
    /// periodic tick source.
    TimerStateChanged(TimerState),
    SessionCompleted(CompletionState),
    LeaderboardUpdated(Vec<LeaderboardEntry>),
    /// Plain-text result summary for the clipboard/share-sheet collaborator.
    ShareReady(String),
}
