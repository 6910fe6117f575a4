use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::category::WORDS_PER_CATEGORY;
use super::Category;

pub const CATEGORIES_PER_PUZZLE: usize = 4;
pub const WORDS_PER_PUZZLE: usize = CATEGORIES_PER_PUZZLE * WORDS_PER_CATEGORY;

/// A day's puzzle: four categories whose word sets are pairwise disjoint,
/// sixteen distinct words total. Owned by the puzzle content provider and
/// shared read-only with sessions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Puzzle {
    pub categories: Vec<Category>,
}

/// Defect found while validating loaded puzzle content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleDefect {
    WrongCategoryCount(usize),
    WrongWordCount { category: String, count: usize },
    DuplicateWord(String),
}

impl std::fmt::Display for PuzzleDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PuzzleDefect::WrongCategoryCount(count) => {
                write!(f, "expected {} categories, found {}", CATEGORIES_PER_PUZZLE, count)
            }
            PuzzleDefect::WrongWordCount { category, count } => {
                write!(
                    f,
                    "category {:?} has {} words, expected {}",
                    category, count, WORDS_PER_CATEGORY
                )
            }
            PuzzleDefect::DuplicateWord(word) => {
                write!(f, "word {:?} appears in more than one place", word)
            }
        }
    }
}

impl Puzzle {
    /// All sixteen words in fixed category order.
    pub fn all_words(&self) -> Vec<String> {
        self.categories
            .iter()
            .flat_map(|cat| cat.words.iter().cloned())
            .collect()
    }

    pub fn validate(&self) -> Result<(), PuzzleDefect> {
        if self.categories.len() != CATEGORIES_PER_PUZZLE {
            return Err(PuzzleDefect::WrongCategoryCount(self.categories.len()));
        }
        for category in &self.categories {
            if category.words.len() != WORDS_PER_CATEGORY {
                return Err(PuzzleDefect::WrongWordCount {
                    category: category.name.clone(),
                    count: category.words.len(),
                });
            }
        }
        let mut seen = HashSet::new();
        for word in self.all_words() {
            if !seen.insert(word.clone()) {
                return Err(PuzzleDefect::DuplicateWord(word));
            }
        }
        Ok(())
    }
}
