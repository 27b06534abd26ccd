//! Scoring of a single play
//!
//! All rules look at the stack *after* the new card has been placed on it.

use super::cards::*;
use super::types::*;

/// Points earned by the card just placed on top of `stack`
///
/// `stack` is non-empty and its last element is the new card.
pub fn score_play(stack: &[Card], total: u32) -> u32 {
    debug_assert!(!stack.is_empty());
    let mut points = 0;

    if stack.len() == 1 && stack[0] == Card::Jack {
        points += JACK_FIRST_POINTS;
    }
    if total == FIFTEEN {
        points += FIFTEEN_POINTS;
    }
    if total == STACK_LIMIT {
        points += THIRTY_ONE_POINTS;
    }

    points + set_points(stack) + run_points(stack)
}

/// Length of the block of identical ranks at the top of the stack
#[inline]
pub fn set_len(stack: &[Card]) -> usize {
    match stack.last() {
        Some(&top) => stack.iter().rev().take_while(|&&c| c == top).count(),
        None => 0,
    }
}

/// Pair/triple/quad bonus for the top of the stack
pub fn set_points(stack: &[Card]) -> u32 {
    match set_len(stack) {
        1 => 0,
        2 => 2,
        3 => 6,
        4 => 12,
        n => unreachable!("stack top holds {n} cards of one rank"),
    }
}

/// Bonus for the longest run among the most recent cards
///
/// Tries lengths from 7 down to 3 and scores only the first that qualifies.
pub fn run_points(stack: &[Card]) -> u32 {
    let longest = MAX_RUN.min(stack.len());
    (MIN_RUN..=longest)
        .rev()
        .find(|&len| is_run(&stack[stack.len() - len..]))
        .map_or(0, |len| len as u32)
}

/// Ranks form a strictly consecutive sequence in some order
fn is_run(cards: &[Card]) -> bool {
    let mut ranks = [0u8; MAX_RUN];
    let ranks = &mut ranks[..cards.len()];
    for (slot, card) in ranks.iter_mut().zip(cards) {
        *slot = card.rank();
    }
    ranks.sort_unstable();
    ranks.windows(2).all(|w| w[1] == w[0] + 1)
}
