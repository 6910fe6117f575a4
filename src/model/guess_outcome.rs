use super::Category;

/// Structured result of a submission. `NearMiss` (exactly three of the four
/// selected words share one unsolved category) differs from `Incorrect` only
/// in the message a presenter shows; both count one mistake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Selection was incomplete or the session already ended; nothing changed.
    NotReady,
    Correct(Category),
    NearMiss,
    Incorrect,
}
