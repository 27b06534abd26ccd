//! Exhaustive searcher
//!
//! Every legal move is tried to the end of the game; the transposition table
//! only saves repeating work on positions reached by more than one order.

use std::time::Instant;

use super::cache::{CacheStats, TranspositionTable};
use super::cards::Card;
use super::error::StateError;
use super::state::{MoveOutcome, State};
use super::types::PileIndex;

/// Searcher knobs
#[derive(Clone, Copy, Debug)]
pub struct SearchConfig {
    /// Consult and fill the transposition table
    pub use_table: bool,
    /// Entries to reserve up front
    pub table_capacity: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            use_table: true,
            table_capacity: 1 << 16,
        }
    }
}

/// Best pile to play and the final score it leads to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// None when no legal move is left
    pub pile: Option<PileIndex>,
    pub score: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions visited, table hits included
    pub nodes: u64,
    pub table: CacheStats,
    pub table_entries: usize,
}

/// One move of a solved game
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub pile: PileIndex,
    pub card: Card,
    /// Cumulative score after the move
    pub score: u32,
    /// The move emptied the stack and play goes on with a fresh one
    pub new_stack: bool,
}

/// The optimal line from a position to the end of the game
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Solution {
    pub steps: Vec<Step>,
    pub score: u32,
}

impl Solution {
    /// One pile index per line, with `-` after a move that starts a new stack.
    /// With `with_scores` each move line also carries the running score.
    pub fn to_text(&self, with_scores: bool) -> String {
        let mut out = String::new();
        for step in &self.steps {
            let line = if with_scores {
                format!("{} {}\n", step.pile, step.score)
            } else {
                format!("{}\n", step.pile)
            };
            out.push_str(&line);
            if step.new_stack {
                out.push_str("-\n");
            }
        }
        out
    }
}

/// Owns a game state and the table used to search it
pub struct Searcher {
    state: State,
    table: TranspositionTable,
    config: SearchConfig,
    nodes: u64,
}

impl Searcher {
    /// Create a searcher with the default configuration
    pub fn new(state: State) -> Self {
        Self::with_config(state, SearchConfig::default())
    }

    pub fn with_config(state: State, config: SearchConfig) -> Self {
        let table = if config.use_table {
            TranspositionTable::with_capacity(config.table_capacity)
        } else {
            TranspositionTable::new()
        };
        Searcher {
            state,
            table,
            config,
            nodes: 0,
        }
    }

    /// Best move from the current position, searched to the end of the game
    pub fn best_move(&mut self) -> SearchResult {
        let start = Instant::now();
        let nodes_before = self.nodes;
        let result = self.search();
        tracing::debug!(
            pile = ?result.pile,
            score = result.score,
            nodes = self.nodes - nodes_before,
            table_entries = self.table.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "best move"
        );
        result
    }

    fn search(&mut self) -> SearchResult {
        self.nodes += 1;

        if self.config.use_table {
            if let Some(entry) = self.table.lookup(&self.state) {
                return SearchResult {
                    pile: entry.best_move,
                    score: self.state.score() + entry.gain,
                };
            }
        }

        let moves = self.state.move_list();
        if moves.is_empty() {
            return SearchResult {
                pile: None,
                score: self.state.score(),
            };
        }

        // First move to reach the maximum wins ties
        let mut best = SearchResult {
            pile: None,
            score: 0,
        };
        for mv in moves.iter() {
            self.state.play(mv);
            let result = self.search();
            self.state.retract();

            if best.pile.is_none() || result.score > best.score {
                best = SearchResult {
                    pile: Some(mv.pile),
                    score: result.score,
                };
            }
        }

        if self.config.use_table {
            self.table.insert(&self.state, best.pile, best.score);
        }
        best
    }

    /// Play the best move repeatedly until the game ends
    pub fn solve(&mut self) -> Result<Solution, StateError> {
        let start = Instant::now();
        let mut solution = Solution {
            steps: Vec::new(),
            score: self.state.score(),
        };

        while let Some(pile) = self.best_move().pile {
            let outcome = self.make_move(pile)?;
            let new_stack = outcome.stack_cleared && !self.state.is_finished();
            tracing::trace!(
                pile,
                card = %outcome.card,
                points = outcome.points,
                score = outcome.score,
                new_stack,
                "move"
            );
            solution.steps.push(Step {
                pile,
                card: outcome.card,
                score: outcome.score,
                new_stack,
            });
            solution.score = outcome.score;
        }

        tracing::debug!(
            moves = solution.steps.len(),
            score = solution.score,
            nodes = self.nodes,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "solved"
        );
        Ok(solution)
    }

    /// Advance the real game
    pub fn make_move(&mut self, pile: PileIndex) -> Result<MoveOutcome, StateError> {
        self.state.make_move(pile)
    }

    pub fn legal_moves(&self) -> Vec<PileIndex> {
        self.state.legal_moves()
    }

    pub fn stack(&self) -> &[Card] {
        self.state.stack()
    }

    pub fn score(&self) -> u32 {
        self.state.score()
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            nodes: self.nodes,
            table: self.table.stats(),
            table_entries: self.table.len(),
        }
    }

    /// Forget cached positions, e.g. before reusing the searcher on a new line
    pub fn clear_table(&mut self) {
        self.table.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piles::Piles;

    fn searcher(s: &str) -> Searcher {
        Searcher::new(State::new(Piles::parse(s).unwrap()).unwrap())
    }

    #[test]
    fn test_lone_ace() {
        let mut searcher = searcher("A - - -");
        assert_eq!(searcher.legal_moves(), vec![0]);
        assert_eq!(
            searcher.best_move(),
            SearchResult {
                pile: Some(0),
                score: 0
            }
        );
        searcher.make_move(0).unwrap();
        assert!(searcher.legal_moves().is_empty());
        assert_eq!(
            searcher.best_move(),
            SearchResult {
                pile: None,
                score: 0
            }
        );
    }

    #[test]
    fn test_empty_deal() {
        let mut searcher = searcher("- - - -");
        assert_eq!(searcher.best_move().pile, None);
        let solution = searcher.solve().unwrap();
        assert!(solution.steps.is_empty());
        assert_eq!(solution.score, 0);
    }

    #[test]
    fn test_king_first_makes_fifteen_then_pair() {
        // K 5 5 scores fifteen and a pair; leading a five gets one or the other
        let mut searcher = searcher("5 K 5 -");
        let result = searcher.best_move();
        assert_eq!(result.score, 4);
        assert_eq!(result.pile, Some(1));
    }

    #[test]
    fn test_tie_goes_to_lowest_pile() {
        let mut searcher = searcher("7 7 - -");
        assert_eq!(
            searcher.best_move(),
            SearchResult {
                pile: Some(0),
                score: 2
            }
        );
    }

    #[test]
    fn test_search_leaves_state_untouched() {
        let mut searcher = searcher("A5K 9Q3 2T J4");
        let before = searcher.state().clone();
        searcher.best_move();
        assert_eq!(searcher.state(), &before);
    }

    #[test]
    fn test_table_hit_on_second_call() {
        let mut searcher = searcher("A5K 9Q3 2T J4");
        let first = searcher.best_move();
        let nodes = searcher.stats().nodes;
        let second = searcher.best_move();
        assert_eq!(first, second);
        // The root is now cached
        assert_eq!(searcher.stats().nodes, nodes + 1);
        assert!(searcher.stats().table.hits >= 1);
    }

    #[test]
    fn test_solve_reaches_best_score() {
        let mut searcher = searcher("A5K 9Q3 2T J4");
        let best = searcher.best_move().score;
        let solution = searcher.solve().unwrap();
        assert_eq!(solution.score, best);
        assert_eq!(solution.steps.len(), 10);
        assert_eq!(solution.steps.last().map(|s| s.score), Some(best));
        assert!(searcher.legal_moves().is_empty());
    }

    #[test]
    fn test_solution_text() {
        let solution = Solution {
            steps: vec![
                Step {
                    pile: 2,
                    card: Card::King,
                    score: 0,
                    new_stack: false,
                },
                Step {
                    pile: 0,
                    card: Card::Five,
                    score: 2,
                    new_stack: true,
                },
                Step {
                    pile: 1,
                    card: Card::Ace,
                    score: 2,
                    new_stack: false,
                },
            ],
            score: 2,
        };
        assert_eq!(solution.to_text(false), "2\n0\n-\n1\n");
        assert_eq!(solution.to_text(true), "2 0\n0 2\n-\n1 2\n");
    }

    #[test]
    fn test_without_table() {
        let config = SearchConfig {
            use_table: false,
            ..SearchConfig::default()
        };
        let state = State::new(Piles::parse("A5K 9Q3 2T J4").unwrap()).unwrap();
        let mut plain = Searcher::with_config(state.clone(), config);
        let mut cached = Searcher::new(state);
        assert_eq!(plain.best_move().score, cached.best_move().score);
        assert_eq!(plain.stats().table_entries, 0);
        assert!(!plain.config().use_table);
        assert!(cached.config().use_table);
        assert!(plain.stats().nodes > cached.stats().nodes);
    }
}
