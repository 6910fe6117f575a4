use std::rc::Rc;
use std::time::Duration;

use chrono::Utc;
use itertools::Itertools;
use log::trace;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use uuid::Uuid;

use crate::model::{
    AttemptStats, Category, GameStatus, GuessOutcome, Puzzle, TimerState, CATEGORIES_PER_PUZZLE,
    WORDS_PER_CATEGORY,
};

pub const MAX_MISTAKES: u32 = 4;

/// One attempt at one puzzle. Pure state machine: every mutation goes through
/// the operations below, and once `status` is terminal none of them change
/// `pool`, `solved`, `mistakes` or the timer.
///
/// Invariants held at every observable point:
/// - `solved.len() * 4 + pool.len() == 16`
/// - `selection.len() <= 4` and every selected word is in `pool`
/// - `mistakes <= MAX_MISTAKES`
pub struct GameSession {
    puzzle: Rc<Puzzle>,
    puzzle_number: usize,
    pool: Vec<String>,
    selection: Vec<String>,
    solved: Vec<Category>,
    mistakes: u32,
    status: GameStatus,
    timer: TimerState,
    attempt_id: Uuid,
    rng: StdRng,
}

impl GameSession {
    /// Starts a fresh attempt. The pool is a uniform permutation of the
    /// puzzle's sixteen words; passing a seed (or setting `SEED` in the
    /// environment) makes the order reproducible.
    pub fn new(puzzle: Rc<Puzzle>, puzzle_number: usize, seed: Option<u64>) -> Self {
        let seed = seed
            .or_else(GameSession::seed_from_env)
            .unwrap_or_else(|| rand::rng().next_u64());
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pool = puzzle.all_words();
        pool.shuffle(&mut rng);

        let attempt_id = Uuid::new_v4();
        trace!(
            target: "session",
            "New session; puzzle: {}; seed: {}; attempt: {}",
            puzzle_number, seed, attempt_id
        );

        Self {
            puzzle,
            puzzle_number,
            pool,
            selection: Vec::new(),
            solved: Vec::new(),
            mistakes: 0,
            status: GameStatus::InProgress,
            timer: TimerState::default(),
            attempt_id,
            rng,
        }
    }

    pub fn seed_from_env() -> Option<u64> {
        std::env::var("SEED").ok().and_then(|v| v.parse::<u64>().ok())
    }

    pub fn puzzle(&self) -> &Rc<Puzzle> {
        &self.puzzle
    }

    pub fn puzzle_number(&self) -> usize {
        self.puzzle_number
    }

    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn solved(&self) -> &[Category] {
        &self.solved
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }

    fn is_solved(&self, name: &str) -> bool {
        self.solved.iter().any(|cat| cat.name == name)
    }

    /// Toggles a word in the selection. Words outside the pool (already
    /// solved) are ignored, as is a fifth distinct pick. The first effective
    /// call starts the clock. Never auto-submits.
    pub fn select_word(&mut self, word: &str) -> &[String] {
        if self.status.is_terminal() || !self.pool.iter().any(|w| w == word) {
            return &self.selection;
        }
        if !self.timer.is_started() {
            self.timer = self.timer.started_now();
        }
        if let Some(position) = self.selection.iter().position(|w| w == word) {
            self.selection.remove(position);
        } else if self.selection.len() < WORDS_PER_CATEGORY {
            self.selection.push(word.to_string());
        }
        &self.selection
    }

    pub fn clear_selection(&mut self) {
        if self.status.is_terminal() {
            return;
        }
        self.selection.clear();
    }

    /// Reorders the pool with a fresh permutation from the session RNG.
    /// Selection, solved categories and mistakes are untouched.
    pub fn shuffle_pool(&mut self) {
        if self.status.is_terminal() {
            return;
        }
        self.pool.shuffle(&mut self.rng);
    }

    /// Evaluates the current four-word selection. Exact match against an
    /// unsolved category wins the round; anything else costs a mistake, with
    /// a three-of-four overlap reported as a near miss (messaging only).
    /// A correct submission short-circuits before the mistake branch, so a
    /// single call can never be both a win and a loss.
    pub fn submit(&mut self) -> GuessOutcome {
        if self.status.is_terminal() || self.selection.len() != WORDS_PER_CATEGORY {
            return GuessOutcome::NotReady;
        }

        let matched = self
            .puzzle
            .categories
            .iter()
            .find(|cat| !self.is_solved(&cat.name) && cat.matches_selection(&self.selection))
            .cloned();

        match matched {
            Some(category) => {
                self.pool.retain(|w| !category.contains(w));
                self.solved.push(category.clone());
                self.selection.clear();
                trace!(target: "session", "Matched category {:?}", category.name);
                if self.solved.len() == CATEGORIES_PER_PUZZLE {
                    self.status = GameStatus::Won;
                    self.timer = self.timer.ended_now();
                }
                GuessOutcome::Correct(category)
            }
            None => {
                let near_miss = self
                    .puzzle
                    .categories
                    .iter()
                    .filter(|cat| !self.is_solved(&cat.name))
                    .any(|cat| cat.overlap(&self.selection) == WORDS_PER_CATEGORY - 1);
                self.mistakes += 1;
                self.selection.clear();
                if self.mistakes == MAX_MISTAKES {
                    self.status = GameStatus::Lost;
                    self.timer = self.timer.ended_now();
                }
                if near_miss {
                    GuessOutcome::NearMiss
                } else {
                    GuessOutcome::Incorrect
                }
            }
        }
    }

    /// Advances the clock by one scheduler tick. A no-op before the first
    /// selection and after the terminal transition.
    pub fn tick(&mut self, delta: Duration) {
        if self.status.is_terminal() {
            return;
        }
        self.timer = self.timer.advanced(delta);
    }

    pub fn attempt_stats(&self) -> AttemptStats {
        AttemptStats {
            elapsed: self.timer.elapsed(),
            mistakes: self.mistakes,
            won: self.status == GameStatus::Won,
            puzzle_number: self.puzzle_number,
            timestamp: Utc::now().timestamp(),
            attempt_id: self.attempt_id,
        }
    }

    /// Shareable result summary: identifier line, one square per category in
    /// fixed category order (filled when solved), mistakes line.
    pub fn share_text(&self) -> String {
        let grid = self
            .puzzle
            .categories
            .iter()
            .map(|cat| if self.is_solved(&cat.name) { "🟩" } else { "⬜" })
            .join("");
        format!(
            "한국어 커넥션 {}번\n{}\n실수: {}/{}",
            self.puzzle_number, grid, self.mistakes, MAX_MISTAKES
        )
    }

    #[cfg(test)]
    fn assert_invariants(&self) {
        assert_eq!(
            self.solved.len() * WORDS_PER_CATEGORY + self.pool.len(),
            crate::model::WORDS_PER_PUZZLE,
            "every word is either solved or in the pool"
        );
        assert!(self.selection.len() <= WORDS_PER_CATEGORY);
        assert!(self
            .selection
            .iter()
            .all(|w| self.pool.iter().any(|p| p == w)));
        assert!(self.mistakes <= MAX_MISTAKES);
        assert_eq!(
            self.status == GameStatus::Won,
            self.solved.len() == CATEGORIES_PER_PUZZLE
        );
    }
}
