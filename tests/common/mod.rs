//! Common test infrastructure shared across integration tests.
//!
//! # Usage
//!
//! From any integration test file:
//! ```ignore
//! #[path = "common/mod.rs"]
//! mod common;
//! use common::{open_default, totals, FlakyStore};
//! ```

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use marriage_scorepad::{
    KeyValueStore, MemoryStore, ScoreError, ScoreResult, Scoreboard, StorageOperation,
};

/// Opens a scoreboard over an empty in-memory store with the default config.
pub fn open_default() -> Scoreboard<MemoryStore> {
    Scoreboard::open(MemoryStore::new()).expect("empty store opens")
}

/// Current totals in roster order.
pub fn totals<S: KeyValueStore>(board: &Scoreboard<S>) -> Vec<i32> {
    board.players().iter().map(|p| p.score).collect()
}

/// The history as plain vectors, oldest first.
pub fn history<S: KeyValueStore>(board: &Scoreboard<S>) -> Vec<Vec<i32>> {
    board.rounds().iter().map(|r| r.scores.to_vec()).collect()
}

/// Player names in roster order.
pub fn names<S: KeyValueStore>(board: &Scoreboard<S>) -> Vec<String> {
    board.players().iter().map(|p| p.name.clone()).collect()
}

/// A [`MemoryStore`] whose writes can be made to fail on demand.
#[derive(Debug)]
pub struct FlakyStore {
    inner: MemoryStore,
    failing: Arc<AtomicBool>,
    writes_left: Arc<AtomicUsize>,
}

impl Default for FlakyStore {
    fn default() -> Self {
        Self {
            inner: MemoryStore::new(),
            failing: Arc::default(),
            writes_left: Arc::new(AtomicUsize::new(usize::MAX)),
        }
    }
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle to the write budget. Once it reaches zero every write fails;
    /// `usize::MAX` means unlimited.
    pub fn budget(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.writes_left)
    }

    /// A handle that toggles write failures while the store is owned elsewhere.
    pub fn switch(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.failing)
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> ScoreResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> ScoreResult<()> {
        let left = self.writes_left.load(Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) || left == 0 {
            return Err(ScoreError::Storage {
                key: key.to_owned(),
                operation: StorageOperation::Set,
                context: "disk full".to_owned(),
            });
        }
        if left != usize::MAX {
            self.writes_left.store(left - 1, Ordering::SeqCst);
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> ScoreResult<()> {
        self.inner.remove(key)
    }
}
