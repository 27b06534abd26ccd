//! Card model
//!
//! Suits never matter in this game, so a card is just its rank.
//! Ranks run Ace=1 .. King=13; tens and faces are all worth 10 points.

use super::types::*;

/// A card, identified by rank only
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Card {
    Ace = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
}

impl Card {
    /// Every rank, Ace first
    pub const ALL: [Card; NUM_RANKS] = [
        Card::Ace,
        Card::Two,
        Card::Three,
        Card::Four,
        Card::Five,
        Card::Six,
        Card::Seven,
        Card::Eight,
        Card::Nine,
        Card::Ten,
        Card::Jack,
        Card::Queen,
        Card::King,
    ];

    /// Rank number (Ace=1 .. King=13)
    #[inline]
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Point value counted toward the stack total
    #[inline]
    pub fn value(self) -> u32 {
        match self {
            Card::Ten | Card::Jack | Card::Queen | Card::King => 10,
            other => other.rank() as u32,
        }
    }

    /// Card from rank number, None outside 1..=13
    pub fn from_rank(rank: u8) -> Option<Card> {
        match rank {
            1..=13 => Some(Card::ALL[rank as usize - 1]),
            _ => None,
        }
    }

    /// Parse a rank letter: A 2-9 T J Q K (`1` is also accepted for Ten)
    pub fn from_char(c: char) -> Option<Card> {
        match c.to_ascii_uppercase() {
            'A' => Some(Card::Ace),
            '2' => Some(Card::Two),
            '3' => Some(Card::Three),
            '4' => Some(Card::Four),
            '5' => Some(Card::Five),
            '6' => Some(Card::Six),
            '7' => Some(Card::Seven),
            '8' => Some(Card::Eight),
            '9' => Some(Card::Nine),
            'T' | '1' => Some(Card::Ten),
            'J' => Some(Card::Jack),
            'Q' => Some(Card::Queen),
            'K' => Some(Card::King),
            _ => None,
        }
    }

    /// Rank letter used in pile listings
    pub fn letter(self) -> char {
        const LETTERS: [char; NUM_RANKS] = [
            'A', '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K',
        ];
        LETTERS[self.rank() as usize - 1]
    }

    /// Zobrist slot for this card; slot 0 is reserved for an empty position
    #[inline]
    pub fn slot(self) -> usize {
        self.rank() as usize
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Sum of point values
pub fn total_of(cards: &[Card]) -> u32 {
    cards.iter().map(|c| c.value()).sum()
}

/// Format a run of cards as rank letters, e.g. "A5TK"
pub fn name_of(cards: &[Card]) -> String {
    cards.iter().map(|c| c.letter()).collect()
}

/// Count of each rank among the given cards, indexed by slot
pub fn rank_counts<'a>(cards: impl IntoIterator<Item = &'a Card>) -> [usize; NUM_RANKS + 1] {
    let mut counts = [0; NUM_RANKS + 1];
    for card in cards {
        counts[card.slot()] += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values() {
        assert_eq!(Card::Ace.value(), 1);
        assert_eq!(Card::Nine.value(), 9);
        assert_eq!(Card::Ten.value(), 10);
        assert_eq!(Card::Jack.value(), 10);
        assert_eq!(Card::Queen.value(), 10);
        assert_eq!(Card::King.value(), 10);
    }

    #[test]
    fn test_rank_order() {
        assert!(Card::Ten < Card::Jack);
        assert!(Card::Queen < Card::King);
        assert_eq!(Card::King.rank(), 13);
    }

    #[test]
    fn test_from_rank() {
        assert_eq!(Card::from_rank(1), Some(Card::Ace));
        assert_eq!(Card::from_rank(11), Some(Card::Jack));
        assert_eq!(Card::from_rank(0), None);
        assert_eq!(Card::from_rank(14), None);
        for card in Card::ALL {
            assert_eq!(Card::from_rank(card.rank()), Some(card));
        }
    }

    #[test]
    fn test_from_char() {
        assert_eq!(Card::from_char('a'), Some(Card::Ace));
        assert_eq!(Card::from_char('T'), Some(Card::Ten));
        assert_eq!(Card::from_char('1'), Some(Card::Ten));
        assert_eq!(Card::from_char('q'), Some(Card::Queen));
        assert_eq!(Card::from_char('X'), None);
        assert_eq!(Card::from_char('0'), None);
    }

    #[test]
    fn test_letters() {
        assert_eq!(name_of(&[Card::Ace, Card::Five, Card::Ten, Card::King]), "A5TK");
        assert_eq!(Card::Seven.to_string(), "7");
    }

    #[test]
    fn test_total_and_counts() {
        let cards = [Card::Five, Card::Five, Card::King];
        assert_eq!(total_of(&cards), 20);
        let counts = rank_counts(&cards);
        assert_eq!(counts[Card::Five.slot()], 2);
        assert_eq!(counts[Card::King.slot()], 1);
        assert_eq!(counts[0], 0);
    }
}
