//! Deal input at the API boundary
//!
//! The solver works on `Piles`; this module turns the plain-text deal format
//! into piles, and deals random games.
//!
//! Text format: 52 whitespace-separated numbers, 13 per pile for piles 0..3.
//! Each pile is listed bottom card first, so its 13th number is the card
//! played first. 1..=13 are ranks (Ace..King); 0 marks a missing card and is
//! skipped.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::cards::Card;
use super::error::DealError;
use super::piles::{Pile, Piles};
use super::state::State;
use super::types::*;

/// Numbers expected in the text format
pub const DEAL_NUMBERS: usize = NUM_PILES * MAX_PILE_LEN;

/// Parse the 52-number text format into piles
pub fn parse_numbers(s: &str) -> Result<Piles, DealError> {
    let numbers = s
        .split_whitespace()
        .map(|tok| {
            tok.parse::<u32>()
                .map_err(|_| DealError::InvalidNumber(tok.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if numbers.len() != DEAL_NUMBERS {
        return Err(DealError::WrongCount {
            expected: DEAL_NUMBERS,
            found: numbers.len(),
        });
    }

    let mut piles = Piles::new();
    for (pile, chunk) in numbers.chunks(MAX_PILE_LEN).enumerate() {
        let mut cards = Vec::with_capacity(MAX_PILE_LEN);
        for &n in chunk {
            match n {
                0 => continue,
                1..=13 => cards.push(Card::ALL[n as usize - 1]),
                _ => return Err(DealError::RankOutOfRange(n)),
            }
        }
        piles[pile] = Pile::from_bottom(cards);
    }
    Ok(piles)
}

/// Parse the text format and build the starting state
pub fn parse_state(s: &str) -> Result<State, DealError> {
    Ok(State::new(parse_numbers(s)?)?)
}

/// Write piles back out in the text format, padding short piles with 0
pub fn to_numbers(piles: &Piles) -> String {
    let mut lines = Vec::with_capacity(NUM_PILES);
    for pile in piles.iter() {
        let mut numbers: Vec<String> = pile
            .bottom_up()
            .iter()
            .map(|c| c.rank().to_string())
            .collect();
        numbers.resize(MAX_PILE_LEN.max(numbers.len()), "0".to_string());
        lines.push(numbers.join(" "));
    }
    lines.join("\n") + "\n"
}

/// A standard deck: four of each rank
pub fn full_deck() -> Vec<Card> {
    Card::ALL
        .iter()
        .flat_map(|&card| std::iter::repeat(card).take(COPIES_PER_RANK))
        .collect()
}

/// Shuffle a full deck and deal 13 cards to each pile
pub fn shuffled(seed: u64) -> Piles {
    dealt(seed, MAX_PILE_LEN)
}

/// Shuffle a full deck and deal `per_pile` cards to each pile, at most 13
pub fn dealt(seed: u64, per_pile: usize) -> Piles {
    let per_pile = per_pile.min(MAX_PILE_LEN);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut deck = full_deck();
    deck.shuffle(&mut rng);

    let mut piles = Piles::new();
    for (pile, chunk) in deck.chunks(MAX_PILE_LEN).enumerate() {
        piles[pile] = Pile::from_bottom(chunk[..per_pile].to_vec());
    }
    piles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(piles: [[u32; 13]; 4]) -> String {
        piles
            .iter()
            .map(|p| {
                p.iter()
                    .map(|n| n.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_parse_numbers_bottom_first() {
        let text = numbers([
            [13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1],
            [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13],
            [0; 13],
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 5],
        ]);
        let piles = parse_numbers(&text).expect("Should parse");
        assert_eq!(piles[0].front(), Some(Card::Ace));
        assert_eq!(piles[0].len(), 13);
        assert_eq!(piles[1].front(), Some(Card::King));
        assert!(piles[2].is_empty());
        assert_eq!(piles[3].len(), 1);
        assert_eq!(piles[3].front(), Some(Card::Five));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_numbers("1 2 3"),
            Err(DealError::WrongCount {
                expected: 52,
                found: 3
            })
        );
        assert_eq!(
            parse_numbers("1 x 3"),
            Err(DealError::InvalidNumber("x".to_string()))
        );
        let mut text = vec!["0"; 52];
        text[7] = "14";
        assert_eq!(
            parse_numbers(&text.join(" ")),
            Err(DealError::RankOutOfRange(14))
        );
    }

    #[test]
    fn test_parse_state_rejects_fifth_copy() {
        let mut text = vec!["0"; 52];
        for slot in text.iter_mut().take(5) {
            *slot = "9";
        }
        assert!(matches!(
            parse_state(&text.join(" ")),
            Err(DealError::State(_))
        ));
    }

    #[test]
    fn test_numbers_round_trip() {
        let piles = shuffled(11);
        let text = to_numbers(&piles);
        assert_eq!(parse_numbers(&text), Ok(piles));

        let short = Piles::parse("A23 - K -").unwrap();
        assert_eq!(parse_numbers(&to_numbers(&short)), Ok(short));
    }

    #[test]
    fn test_shuffled_is_a_full_deck() {
        let piles = shuffled(3);
        assert_eq!(piles.cards_remaining(), 52);
        for pile in piles.iter() {
            assert_eq!(pile.len(), 13);
        }
        assert!(State::new(piles).is_ok());
        assert_eq!(shuffled(3), shuffled(3));
        assert_ne!(shuffled(3), shuffled(4));
    }

    #[test]
    fn test_dealt_short_piles() {
        let piles = dealt(5, 3);
        assert_eq!(piles.cards_remaining(), 12);
        assert!(State::new(piles).is_ok());
    }
}
