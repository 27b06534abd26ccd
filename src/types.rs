//! Core constants shared by the state, hashing and search modules

/// Pile index: 0..NUM_PILES
pub type PileIndex = usize;
pub const NUM_PILES: usize = 4;

/// Number of distinct ranks (Ace..King)
pub const NUM_RANKS: usize = 13;
/// Copies of each rank in a standard deck
pub const COPIES_PER_RANK: usize = 4;
pub const TOTAL_CARDS: usize = NUM_RANKS * COPIES_PER_RANK;

/// Longest pile a deal may contain
pub const MAX_PILE_LEN: usize = 13;
/// Longest stack reachable with at most four cards per rank and a total of 31
pub const MAX_STACK_LEN: usize = 13;

/// The running stack total may never exceed this
pub const STACK_LIMIT: u32 = 31;
/// Stack total worth a bonus on the way up
pub const FIFTEEN: u32 = 15;

/// Points for a jack leading a fresh stack, and for hitting 15 or 31
pub const JACK_FIRST_POINTS: u32 = 2;
pub const FIFTEEN_POINTS: u32 = 2;
pub const THIRTY_ONE_POINTS: u32 = 2;

/// Longest run of consecutive ranks that is scored
pub const MAX_RUN: usize = 7;
/// Shortest run that scores
pub const MIN_RUN: usize = 3;

/// Get pile name for display
pub fn pile_name(pile: PileIndex) -> &'static str {
    const NAMES: [&str; NUM_PILES] = ["Pile 0", "Pile 1", "Pile 2", "Pile 3"];
    NAMES[pile]
}

/// Check a pile index is in range
#[inline]
pub fn is_pile(pile: PileIndex) -> bool {
    pile < NUM_PILES
}
