//! Zobrist keys for positions
//!
//! Every (position, slot) pair of the stack and of each pile gets a random
//! 64-bit key; slot 0 stands for "no card here" and slots 1..=13 for ranks.
//! A position's hash XORs one key per position, empty ones included, so two
//! positions that differ only in pile length still hash apart.
//!
//! Pile positions count from the pile bottom, stack positions from the stack
//! bottom. Playing a card therefore flips one pile position to empty and one
//! stack position from empty, which is what makes the update O(1).

use std::sync::OnceLock;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::cards::Card;
use super::piles::Piles;
use super::types::*;

/// Slots per position: empty plus one per rank
pub const NUM_SLOTS: usize = NUM_RANKS + 1;
/// Slot used for an unoccupied position
pub const EMPTY_SLOT: usize = 0;

/// Fixed seed so hashes are reproducible across runs
const KEY_SEED: u64 = 0x5731_C0DE_0031_F00D;

/// Random key table
pub struct ZobristKeys {
    stack: [[u64; NUM_SLOTS]; MAX_STACK_LEN],
    piles: [[[u64; NUM_SLOTS]; MAX_PILE_LEN]; NUM_PILES],
    /// Hash of an empty stack and four empty piles
    empty: u64,
}

impl ZobristKeys {
    /// Generate a key table from a seed
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut stack = [[0u64; NUM_SLOTS]; MAX_STACK_LEN];
        for position in stack.iter_mut() {
            for key in position.iter_mut() {
                *key = rng.gen();
            }
        }

        let mut piles = [[[0u64; NUM_SLOTS]; MAX_PILE_LEN]; NUM_PILES];
        for pile in piles.iter_mut() {
            for position in pile.iter_mut() {
                for key in position.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let mut empty = 0;
        for position in &stack {
            empty ^= position[EMPTY_SLOT];
        }
        for pile in &piles {
            for position in pile {
                empty ^= position[EMPTY_SLOT];
            }
        }

        ZobristKeys {
            stack,
            piles,
            empty,
        }
    }

    /// Hash of the position with no cards anywhere
    #[inline]
    pub fn empty_hash(&self) -> u64 {
        self.empty
    }

    /// XOR delta for a card appearing at (or leaving) a stack position
    #[inline]
    pub fn stack_delta(&self, position: usize, card: Card) -> u64 {
        let keys = &self.stack[position];
        keys[EMPTY_SLOT] ^ keys[card.slot()]
    }

    /// XOR delta for a card appearing at (or leaving) a pile position
    #[inline]
    pub fn pile_delta(&self, pile: PileIndex, position: usize, card: Card) -> u64 {
        let keys = &self.piles[pile][position];
        keys[EMPTY_SLOT] ^ keys[card.slot()]
    }

    /// Hash computed from scratch
    ///
    /// Used to seed a new state and to check the incremental key in tests.
    pub fn full_hash(&self, piles: &Piles, stack: &[Card]) -> u64 {
        let mut hash = self.empty;
        for (position, &card) in stack.iter().enumerate() {
            hash ^= self.stack_delta(position, card);
        }
        for (pile_idx, pile) in piles.iter().enumerate() {
            for (position, &card) in pile.bottom_up().iter().enumerate() {
                hash ^= self.pile_delta(pile_idx, position, card);
            }
        }
        hash
    }
}

/// Process-wide key table
pub fn keys() -> &'static ZobristKeys {
    static KEYS: OnceLock<ZobristKeys> = OnceLock::new();
    KEYS.get_or_init(|| ZobristKeys::from_seed(KEY_SEED))
}
