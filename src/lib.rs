//! Thirty-one stack solitaire solver
//!
//! Four piles are dealt face up. Each move takes the front card of a pile and
//! puts it on a shared stack whose point total may not pass 31. Jacks leading
//! a stack, totals of 15 and 31, sets of equal ranks and runs of consecutive
//! ranks score; when no pile can add to the stack it is cleared.
//!
//! The solver finds the highest-scoring line for a fully known deal:
//! - Exhaustive search over every legal move order (no pruning)
//! - Zobrist-keyed transposition table, maintained incrementally by the state
//! - Append-only history so every move can be undone exactly
//!
//! # Example
//!
//! ```
//! use stack31_solver::{Piles, Searcher, State};
//!
//! let piles = Piles::parse("A5K 9Q3 2T J4").unwrap();
//! let mut searcher = Searcher::new(State::new(piles).unwrap());
//!
//! let best = searcher.best_move();
//! let solution = searcher.solve().unwrap();
//! assert_eq!(solution.score, best.score);
//! ```

mod cache;
pub mod cards;
pub mod deal;
mod error;
mod piles;
mod play;
mod solver;
mod state;
pub mod types;
pub mod zobrist;

pub use cache::{CacheStats, Entry, TranspositionTable};
pub use cards::Card;
pub use error::{DealError, StateError};
pub use piles::{Pile, Piles};
pub use play::{run_points, score_play, set_points};
pub use solver::{SearchConfig, SearchResult, SearchStats, Searcher, Solution, Step};
pub use state::{Move, MoveList, MoveOutcome, State};
pub use types::{PileIndex, MAX_PILE_LEN, NUM_PILES, STACK_LIMIT};
