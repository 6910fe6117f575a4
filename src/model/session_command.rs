use std::time::Duration;

/// User intents the rendering surface sends to the session controller.
#[derive(Debug, Clone)]
pub enum SessionCommand {
    SelectWord(String),
    ClearSelection,
    Shuffle,
    Submit,
    /// Periodic clock advance from the embedding's tick source.
    Tick(Duration),
    /// Fresh session on the same puzzle.
    Restart,
    /// Fresh session on the next puzzle in rotation.
    AdvancePuzzle,
    /// Fresh session on an externally scheduled puzzle index.
    LoadPuzzle(usize),
    Share,
    InitDisplay,
    Quit,
}
