mod attempt_stats;
mod category;
mod completion_state;
mod difficulty;
mod game_status;
mod guess_outcome;
mod leaderboard_entry;
mod puzzle;
mod session_command;
mod session_event;
mod timer_state;

pub use attempt_stats::AttemptStats;
pub use category::{Category, WORDS_PER_CATEGORY};
pub use completion_state::CompletionState;
pub use difficulty::Difficulty;
pub use game_status::GameStatus;
pub use guess_outcome::GuessOutcome;
pub use leaderboard_entry::LeaderboardEntry;
pub use puzzle::{Puzzle, PuzzleDefect, CATEGORIES_PER_PUZZLE, WORDS_PER_PUZZLE};
pub use session_command::SessionCommand;
pub use session_event::{MessageKind, SessionEvent};
pub use timer_state::TimerState;
