use serde::{Deserialize, Serialize};

/// Ordinal tag on a category, informational only; the grouping rules never
/// look at it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
    Veteran,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Easy
    }
}

impl Difficulty {
    pub fn all() -> Vec<Difficulty> {
        vec![
            Difficulty::Easy,
            Difficulty::Moderate,
            Difficulty::Hard,
            Difficulty::Veteran,
        ]
    }

    pub fn index(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Moderate => 1,
            Difficulty::Hard => 2,
            Difficulty::Veteran => 3,
        }
    }

    pub fn from_index(index: usize) -> Difficulty {
        match index {
            0 => Difficulty::Easy,
            1 => Difficulty::Moderate,
            2 => Difficulty::Hard,
            3 => Difficulty::Veteran,
            _ => Difficulty::Easy,
        }
    }
}
