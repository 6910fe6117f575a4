use serde::{Deserialize, Serialize};

use super::Difficulty;

pub const WORDS_PER_CATEGORY: usize = 4;

/// A themed group of exactly four words. Immutable once loaded from puzzle
/// content; `color_tag` is an opaque presentation hint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub words: Vec<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub color_tag: String,
}

impl Category {
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    /// Set equality against a candidate guess, ignoring selection order.
    pub fn matches_selection(&self, selection: &[String]) -> bool {
        selection.len() == self.words.len() && selection.iter().all(|w| self.contains(w))
    }

    /// How many of the given words belong to this category.
    pub fn overlap(&self, selection: &[String]) -> usize {
        selection.iter().filter(|w| self.contains(w)).count()
    }
}
