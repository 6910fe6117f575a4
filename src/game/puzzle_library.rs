use std::rc::Rc;

use chrono::{Datelike, NaiveDate};
use log::trace;

use crate::model::{Puzzle, PuzzleDefect};

/// Ordered puzzle content. The library never decides which puzzle "today"
/// is; callers pass an explicit date to `index_for_date` (or an index of
/// their own) so scheduling stays outside the core and tests stay
/// deterministic.
pub struct PuzzleLibrary {
    puzzles: Vec<Rc<Puzzle>>,
}

#[derive(Debug)]
pub enum PuzzleLoadError {
    Parse(serde_json::Error),
    Defect { puzzle_index: usize, defect: PuzzleDefect },
    Empty,
}

impl std::fmt::Display for PuzzleLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PuzzleLoadError::Parse(err) => write!(f, "unparseable puzzle content: {}", err),
            PuzzleLoadError::Defect { puzzle_index, defect } => {
                write!(f, "puzzle {} is malformed: {}", puzzle_index, defect)
            }
            PuzzleLoadError::Empty => write!(f, "puzzle content contains no puzzles"),
        }
    }
}

impl std::error::Error for PuzzleLoadError {}

impl PuzzleLibrary {
    pub fn from_json(content: &str) -> Result<Self, PuzzleLoadError> {
        let puzzles: Vec<Puzzle> =
            serde_json::from_str(content).map_err(PuzzleLoadError::Parse)?;
        if puzzles.is_empty() {
            return Err(PuzzleLoadError::Empty);
        }
        for (puzzle_index, puzzle) in puzzles.iter().enumerate() {
            puzzle
                .validate()
                .map_err(|defect| PuzzleLoadError::Defect { puzzle_index, defect })?;
        }
        trace!(target: "puzzle_library", "Loaded {} puzzles", puzzles.len());
        Ok(Self {
            puzzles: puzzles.into_iter().map(Rc::new).collect(),
        })
    }

    /// The puzzle set shipped with the game.
    pub fn bundled() -> Self {
        Self::from_json(include_str!("../../data/puzzles.json"))
            .expect("bundled puzzle data is valid")
    }

    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Rc<Puzzle>> {
        self.puzzles.get(index).cloned()
    }

    /// Daily rotation: day-of-year modulo library size.
    pub fn index_for_date(&self, date: NaiveDate) -> usize {
        date.ordinal() as usize % self.puzzles.len()
    }
}
