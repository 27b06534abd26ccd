//! Error types for the state and deal-input boundaries

use crate::cards::Card;
use crate::types::PileIndex;

/// Rejected move, undo or starting position
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("pile index {0} is out of range")]
    PileOutOfRange(PileIndex),
    #[error("pile {0} is empty")]
    EmptyPile(PileIndex),
    #[error("playing {card} from pile {pile} would take the stack to {total}")]
    ExceedsLimit {
        pile: PileIndex,
        card: Card,
        total: u32,
    },
    #[error("no move to undo")]
    NothingToUndo,
    #[error("pile {pile} holds {len} cards, more than {max}")]
    PileTooLong {
        pile: PileIndex,
        len: usize,
        max: usize,
    },
    #[error("deal holds {count} cards of rank {card}, at most 4 allowed")]
    TooManyOfRank { card: Card, count: usize },
    #[error("starting stack totals {0}, over 31")]
    StackOverLimit(u32),
    #[error("starting stack holds {0} cards, more than 13")]
    StackTooLong(usize),
}

/// Malformed deal text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DealError {
    #[error("'{0}' is not a card number")]
    InvalidNumber(String),
    #[error("card number {0} is out of range (0-13)")]
    RankOutOfRange(u32),
    #[error("expected {expected} card numbers, found {found}")]
    WrongCount { expected: usize, found: usize },
    #[error("'{0}' is not a rank letter")]
    InvalidRank(char),
    #[error("expected 4 piles, found {0}")]
    WrongPileCount(usize),
    #[error(transparent)]
    State(#[from] StateError),
}
