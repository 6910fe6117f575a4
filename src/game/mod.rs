pub mod leaderboard;
pub mod puzzle_library;
pub mod session;
pub mod session_controller;

pub use leaderboard::{FileStore, LeaderboardStore, MemoryStore, StoragePort};
pub use puzzle_library::PuzzleLibrary;
pub use session::{GameSession, MAX_MISTAKES};
pub use session_controller::SessionController;

#[cfg(test)]
pub mod tests {
    use std::rc::Rc;

    use crate::model::{Category, Difficulty, Puzzle};

    fn category(name: &str, difficulty: Difficulty, words: &[&str]) -> Category {
        Category {
            name: name.to_string(),
            words: words.iter().map(|w| w.to_string()).collect(),
            difficulty,
            color_tag: String::new(),
        }
    }

    /// Same groups as the first bundled puzzle, so word constants can be
    /// shared across test modules.
    pub fn create_test_puzzle() -> Rc<Puzzle> {
        let puzzle = Puzzle {
            categories: vec![
                category("과일", Difficulty::Easy, &["사과", "포도", "복숭아", "수박"]),
                category(
                    "동물",
                    Difficulty::Moderate,
                    &["호랑이", "토끼", "다람쥐", "고래"],
                ),
                category("색깔", Difficulty::Hard, &["빨강", "파랑", "노랑", "보라"]),
                category(
                    "날씨",
                    Difficulty::Veteran,
                    &["맑음", "흐림", "소나기", "안개"],
                ),
            ],
        };
        assert_eq!(puzzle.validate(), Ok(()));
        Rc::new(puzzle)
    }
}
