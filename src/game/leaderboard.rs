use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use log::{trace, warn};

use crate::model::{AttemptStats, LeaderboardEntry};

pub const LEADERBOARD_KEY: &str = "connections-leaderboard";
pub const LEADERBOARD_LIMIT: usize = 10;

/// Flat key-value byte store the leaderboard persists through. Injected so
/// tests run against an in-memory double and the embedding picks the real
/// location.
pub trait StoragePort {
    fn read(&self, key: &str) -> Option<Vec<u8>>;
    fn write(&mut self, key: &str, value: &[u8]) -> std::io::Result<()>;
}

/// Stores each key as `<data_dir>/<key>.json`.
#[derive(Debug)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: PathBuf) -> Self {
        if !data_dir.exists() {
            let _ = fs::create_dir_all(&data_dir);
        }
        Self { data_dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

impl StoragePort for FileStore {
    fn read(&self, key: &str) -> Option<Vec<u8>> {
        fs::read(self.path_for(key)).ok()
    }

    fn write(&mut self, key: &str, value: &[u8]) -> std::io::Result<()> {
        fs::write(self.path_for(key), value)
    }
}

/// In-memory store for tests and headless embeddings.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, Vec<u8>>,
}

impl StoragePort for MemoryStore {
    fn read(&self, key: &str) -> Option<Vec<u8>> {
        self.values.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &[u8]) -> std::io::Result<()> {
        self.values.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

/// Ranked history of past attempts, bounded at the best ten. Loading is
/// fail-soft (absent or corrupt bytes give an empty board) and writes are
/// best-effort; the leaderboard is a convenience, never authoritative game
/// state.
pub struct LeaderboardStore<S: StoragePort> {
    storage: S,
    entries: Vec<LeaderboardEntry>,
}

/// Wins before losses; faster wins first; among losses, fewer mistakes
/// first. Exact ties keep insertion order (stable sort). The loss tier is
/// effectively flat in normal play, where every loss carries four mistakes,
/// but the comparator still applies if partial attempts ever get recorded.
fn rank(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.won.cmp(&a.won).then_with(|| {
        if a.won {
            a.time.cmp(&b.time)
        } else {
            a.mistakes.cmp(&b.mistakes)
        }
    })
}

impl<S: StoragePort> LeaderboardStore<S> {
    pub fn new(storage: S) -> Self {
        let entries: Vec<LeaderboardEntry> = storage
            .read(LEADERBOARD_KEY)
            .and_then(|bytes| match serde_json::from_slice(&bytes) {
                Ok(entries) => Some(entries),
                Err(err) => {
                    warn!(target: "leaderboard", "Discarding unreadable leaderboard: {}", err);
                    None
                }
            })
            .unwrap_or_default();
        trace!(target: "leaderboard", "Loaded {} entries", entries.len());
        Self { storage, entries }
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Appends an attempt, re-ranks, truncates to the best ten, persists,
    /// and returns the new order.
    pub fn record(&mut self, stats: &AttemptStats) -> &[LeaderboardEntry] {
        self.entries
            .push(LeaderboardEntry::from_attempt(stats, Utc::now()));
        self.entries.sort_by(rank);
        self.entries.truncate(LEADERBOARD_LIMIT);
        self.persist();
        &self.entries
    }

    fn persist(&mut self) {
        match serde_json::to_vec(&self.entries) {
            Ok(bytes) => {
                if let Err(err) = self.storage.write(LEADERBOARD_KEY, &bytes) {
                    warn!(target: "leaderboard", "Failed to persist leaderboard: {}", err);
                }
            }
            Err(err) => {
                warn!(target: "leaderboard", "Failed to serialize leaderboard: {}", err);
            }
        }
    }
}
