//! Transposition table
//!
//! Maps a position's Zobrist key to the best move found from it and the score
//! that move gains from there to the end of the game. Storing the gain rather
//! than the absolute score lets any line that reaches the same piles and stack
//! reuse the entry, whatever it scored on the way.
//!
//! Keys are not verified against the full position; a 64-bit collision would
//! return a wrong entry.

use std::collections::HashMap;

use super::state::State;
use super::types::PileIndex;

/// Cached result for one position
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Best pile to play, None at a terminal position
    pub best_move: Option<PileIndex>,
    /// Points gained from this position onward
    pub gain: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub probes: u64,
    pub hits: u64,
    pub inserts: u64,
}

/// Position cache used by the searcher
#[derive(Debug, Default)]
pub struct TranspositionTable {
    map: HashMap<u64, Entry>,
    stats: CacheStats,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TranspositionTable {
            map: HashMap::with_capacity(capacity),
            stats: CacheStats::default(),
        }
    }

    /// Record the best continuation from `state`
    ///
    /// `best_score` is the absolute final score; the entry keeps the gain
    /// over `state.score()`.
    pub fn insert(&mut self, state: &State, best_move: Option<PileIndex>, best_score: u32) {
        debug_assert!(best_score >= state.score());
        self.stats.inserts += 1;
        self.map.insert(
            state.hash(),
            Entry {
                best_move,
                gain: best_score - state.score(),
            },
        );
    }

    /// Cached continuation for `state`, if any
    pub fn lookup(&mut self, state: &State) -> Option<Entry> {
        self.stats.probes += 1;
        let entry = self.map.get(&state.hash()).copied();
        if entry.is_some() {
            self.stats.hits += 1;
        }
        entry
    }

    /// Drop all entries and reset the counters
    pub fn clear(&mut self) {
        self.map.clear();
        self.stats = CacheStats::default();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
