//! Game state with exact rollback
//!
//! The state keeps one frame per history entry (the starting position plus one
//! per applied move). A frame records the cumulative score, where the current
//! stack begins in the card arena, the stack total and the Zobrist key.
//!
//! The arena holds the starting stack followed by every played card, oldest
//! first, so the stack of any frame is `arena[frame.stack_start..]` at the
//! time that frame was current. Clearing the stack only moves the new frame's
//! `stack_start` to the arena end; earlier frames are never touched, so undo
//! is a pop of the frame, the arena card and the move log entry.

use super::cards::*;
use super::error::StateError;
use super::piles::Piles;
use super::play::score_play;
use super::types::*;
use super::zobrist;

/// A card taken from a pile
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub card: Card,
    pub pile: PileIndex,
}

/// What a move did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub card: Card,
    /// Points earned by this move
    pub points: u32,
    /// Cumulative score after the move
    pub score: u32,
    /// The stack went dead and was cleared as part of this move
    pub stack_cleared: bool,
}

/// One history entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Frame {
    score: u32,
    stack_start: usize,
    stack_total: u32,
    hash: u64,
}

/// Legal moves container - no heap allocation
#[derive(Clone, Copy, Debug)]
pub struct MoveList {
    moves: [Move; NUM_PILES],
    count: usize,
}

impl MoveList {
    #[inline]
    fn new() -> Self {
        MoveList {
            moves: [Move {
                card: Card::Ace,
                pile: 0,
            }; NUM_PILES],
            count: 0,
        }
    }

    #[inline]
    fn add(&mut self, mv: Move) {
        self.moves[self.count] = mv;
        self.count += 1;
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.moves[..self.count].iter().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// The authoritative game position
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    piles: Piles,
    arena: Vec<Card>,
    moves: Vec<Move>,
    frames: Vec<Frame>,
}

impl State {
    /// Start a game from a deal with an empty stack
    pub fn new(piles: Piles) -> Result<Self, StateError> {
        Self::with_stack(piles, Vec::new(), 0)
    }

    /// Start from a position with cards already on the stack
    ///
    /// A stack that no pile can add to is cleared straight away, the same way
    /// a move that kills the stack clears it.
    pub fn with_stack(piles: Piles, stack: Vec<Card>, score: u32) -> Result<Self, StateError> {
        validate(&piles, &stack)?;

        let stack_total = total_of(&stack);
        let hash = zobrist::keys().full_hash(&piles, &stack);
        let mut state = State {
            piles,
            arena: stack,
            moves: Vec::new(),
            frames: vec![Frame {
                score,
                stack_start: 0,
                stack_total,
                hash,
            }],
        };

        if !state.stack().is_empty() && state.move_list().is_empty() {
            let mut frame = *state.frame();
            state.clear_stack(&mut frame);
            state.frames[0] = frame;
        }
        Ok(state)
    }

    #[inline]
    fn frame(&self) -> &Frame {
        // frames is never empty: the starting frame is only ever replaced
        &self.frames[self.frames.len() - 1]
    }

    /// Cumulative score of the current position
    #[inline]
    pub fn score(&self) -> u32 {
        self.frame().score
    }

    /// Cards on the stack since the last reset, oldest first
    #[inline]
    pub fn stack(&self) -> &[Card] {
        &self.arena[self.frame().stack_start..]
    }

    /// Sum of point values on the stack
    #[inline]
    pub fn stack_total(&self) -> u32 {
        self.frame().stack_total
    }

    #[inline]
    pub fn piles(&self) -> &Piles {
        &self.piles
    }

    /// Moves applied and not undone, oldest first
    #[inline]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Number of history entries: applied moves plus the starting position
    #[inline]
    pub fn history_len(&self) -> usize {
        self.frames.len()
    }

    /// Score after each history entry, oldest first
    pub fn scores(&self) -> impl Iterator<Item = u32> + '_ {
        self.frames.iter().map(|f| f.score)
    }

    /// Zobrist key of the current position (piles and stack)
    #[inline]
    pub fn hash(&self) -> u64 {
        self.frame().hash
    }

    pub fn cards_remaining(&self) -> usize {
        self.piles.cards_remaining()
    }

    /// No legal move is left
    pub fn is_finished(&self) -> bool {
        self.move_list().is_empty()
    }

    /// Piles whose front card fits under 31, ascending
    pub fn legal_moves(&self) -> Vec<PileIndex> {
        self.move_list().iter().map(|m| m.pile).collect()
    }

    /// Legal moves with their cards, ascending by pile
    #[inline]
    pub fn move_list(&self) -> MoveList {
        self.playable_under(self.stack_total())
    }

    #[inline]
    fn playable_under(&self, total: u32) -> MoveList {
        let mut list = MoveList::new();
        for pile in 0..NUM_PILES {
            if let Some(card) = self.piles[pile].front() {
                if total + card.value() <= STACK_LIMIT {
                    list.add(Move { card, pile });
                }
            }
        }
        list
    }

    /// Play the front card of a pile
    pub fn make_move(&mut self, pile: PileIndex) -> Result<MoveOutcome, StateError> {
        if !is_pile(pile) {
            return Err(StateError::PileOutOfRange(pile));
        }
        let card = self.piles[pile]
            .front()
            .ok_or(StateError::EmptyPile(pile))?;
        let total = self.stack_total() + card.value();
        if total > STACK_LIMIT {
            return Err(StateError::ExceedsLimit { pile, card, total });
        }
        Ok(self.play(Move { card, pile }))
    }

    /// Take back the last move
    pub fn undo_move(&mut self) -> Result<Move, StateError> {
        self.retract().ok_or(StateError::NothingToUndo)
    }

    /// Apply a move already known to be legal
    pub(crate) fn play(&mut self, mv: Move) -> MoveOutcome {
        debug_assert_eq!(self.piles[mv.pile].front(), Some(mv.card));
        let keys = zobrist::keys();
        let prev = *self.frame();

        self.piles[mv.pile].pop_front();
        let pile_position = self.piles[mv.pile].len();
        self.moves.push(mv);
        self.arena.push(mv.card);

        let stack = &self.arena[prev.stack_start..];
        let stack_total = prev.stack_total + mv.card.value();
        debug_assert!(stack_total <= STACK_LIMIT);
        let points = score_play(stack, stack_total);

        let mut frame = Frame {
            score: prev.score + points,
            stack_start: prev.stack_start,
            stack_total,
            hash: prev.hash
                ^ keys.pile_delta(mv.pile, pile_position, mv.card)
                ^ keys.stack_delta(stack.len() - 1, mv.card),
        };

        let stack_cleared = self.playable_under(stack_total).is_empty();
        if stack_cleared {
            self.clear_stack(&mut frame);
        }
        self.frames.push(frame);

        MoveOutcome {
            card: mv.card,
            points,
            score: frame.score,
            stack_cleared,
        }
    }

    /// Pop the last history entry, None at the starting position
    pub(crate) fn retract(&mut self) -> Option<Move> {
        let mv = self.moves.pop()?;
        self.frames.pop();
        self.arena.pop();
        self.piles[mv.pile].push_front(mv.card);
        Some(mv)
    }

    /// Empty the stack within `frame`, which must describe the arena end
    fn clear_stack(&self, frame: &mut Frame) {
        let keys = zobrist::keys();
        for (position, &card) in self.arena[frame.stack_start..].iter().enumerate() {
            frame.hash ^= keys.stack_delta(position, card);
        }
        frame.stack_start = self.arena.len();
        frame.stack_total = 0;
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "piles [{}] stack [{}] total {} score {}",
            self.piles,
            name_of(self.stack()),
            self.stack_total(),
            self.score()
        )
    }
}

/// Reject deals the scoring rules cannot handle
fn validate(piles: &Piles, stack: &[Card]) -> Result<(), StateError> {
    for (pile, cards) in piles.iter().enumerate() {
        if cards.len() > MAX_PILE_LEN {
            return Err(StateError::PileTooLong {
                pile,
                len: cards.len(),
                max: MAX_PILE_LEN,
            });
        }
    }
    if stack.len() > MAX_STACK_LEN {
        return Err(StateError::StackTooLong(stack.len()));
    }
    let total = total_of(stack);
    if total > STACK_LIMIT {
        return Err(StateError::StackOverLimit(total));
    }

    let counts = rank_counts(
        piles
            .iter()
            .flat_map(|p| p.bottom_up().iter())
            .chain(stack.iter()),
    );
    for card in Card::ALL {
        let count = counts[card.slot()];
        if count > COPIES_PER_RANK {
            return Err(StateError::TooManyOfRank { card, count });
        }
    }
    Ok(())
}
