//! Four piles representation
//!
//! Each pile is stored bottom card first so the playable card sits at the end
//! of the vector. That keeps pop/push O(1) and gives every card a fixed
//! position counted from the pile bottom, which is what the Zobrist keys index.

use super::cards::*;
use super::error::DealError;
use super::types::*;

/// One pile; the front card is the next one to play
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Pile {
    cards: Vec<Card>,
}

impl Pile {
    /// Create an empty pile
    #[inline]
    pub const fn new() -> Self {
        Pile { cards: Vec::new() }
    }

    /// Create from cards listed front (top) first
    pub fn from_front(cards: &[Card]) -> Self {
        Pile {
            cards: cards.iter().rev().copied().collect(),
        }
    }

    /// Create from cards listed bottom first
    pub fn from_bottom(cards: Vec<Card>) -> Self {
        Pile { cards }
    }

    /// Next card to play
    #[inline]
    pub fn front(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards from the front (top) to the bottom
    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().rev().copied()
    }

    /// Cards from the bottom up; index = position used for hashing
    #[inline]
    pub fn bottom_up(&self) -> &[Card] {
        &self.cards
    }

    #[inline]
    pub(crate) fn pop_front(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    #[inline]
    pub(crate) fn push_front(&mut self, card: Card) {
        self.cards.push(card);
    }
}

impl std::fmt::Debug for Pile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

impl std::fmt::Display for Pile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for card in self.iter() {
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

/// The four piles of a deal
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Piles {
    piles: [Pile; NUM_PILES],
}

impl Piles {
    /// Create four empty piles
    pub const fn new() -> Self {
        Piles {
            piles: [Pile::new(), Pile::new(), Pile::new(), Pile::new()],
        }
    }

    /// Create from four card lists, each listed front first
    pub fn from_fronts(fronts: [&[Card]; NUM_PILES]) -> Self {
        Piles {
            piles: fronts.map(Pile::from_front),
        }
    }

    /// Parse four whitespace-separated piles written front first, e.g.
    /// "A23 TJQK - 5". A lone `-` marks an empty pile.
    pub fn parse(s: &str) -> Result<Self, DealError> {
        let groups: Vec<&str> = s.split_whitespace().collect();
        if groups.len() != NUM_PILES {
            return Err(DealError::WrongPileCount(groups.len()));
        }

        let mut piles = Piles::new();
        for (pile, group) in groups.iter().enumerate() {
            piles.piles[pile] = parse_pile(group)?;
        }
        Ok(piles)
    }

    /// Total cards left across all piles
    pub fn cards_remaining(&self) -> usize {
        self.piles.iter().map(Pile::len).sum()
    }

    /// True once every pile is empty
    pub fn all_empty(&self) -> bool {
        self.piles.iter().all(Pile::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pile> {
        self.piles.iter()
    }
}

impl std::ops::Index<PileIndex> for Piles {
    type Output = Pile;

    #[inline]
    fn index(&self, pile: PileIndex) -> &Self::Output {
        &self.piles[pile]
    }
}

impl std::ops::IndexMut<PileIndex> for Piles {
    #[inline]
    fn index_mut(&mut self, pile: PileIndex) -> &mut Self::Output {
        &mut self.piles[pile]
    }
}

impl std::fmt::Debug for Piles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for pile in 0..NUM_PILES {
            write!(f, "{}: {} ", pile_name(pile), self.piles[pile])?;
        }
        Ok(())
    }
}

impl std::fmt::Display for Piles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let strs: Vec<String> = self.piles.iter().map(Pile::to_string).collect();
        write!(f, "{}", strs.join(" "))
    }
}

/// Parse a single pile of rank letters, front first
fn parse_pile(s: &str) -> Result<Pile, DealError> {
    if s == "-" {
        return Ok(Pile::new());
    }
    let cards = s
        .chars()
        .map(|c| Card::from_char(c).ok_or(DealError::InvalidRank(c)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Pile::from_front(&cards))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pile_basic() {
        let mut pile = Pile::from_front(&[Card::Ace, Card::Two, Card::King]);
        assert_eq!(pile.len(), 3);
        assert_eq!(pile.front(), Some(Card::Ace));
        assert_eq!(pile.bottom_up(), &[Card::King, Card::Two, Card::Ace]);

        assert_eq!(pile.pop_front(), Some(Card::Ace));
        assert_eq!(pile.front(), Some(Card::Two));
        pile.push_front(Card::Ace);
        assert_eq!(pile.iter().collect::<Vec<_>>(), vec![Card::Ace, Card::Two, Card::King]);
    }

    #[test]
    fn test_piles_parse() {
        let piles = Piles::parse("A23 TJQK - 5").expect("Should parse");
        assert_eq!(piles[0].front(), Some(Card::Ace));
        assert_eq!(piles[1].len(), 4);
        assert!(piles[2].is_empty());
        assert_eq!(piles[3].front(), Some(Card::Five));
        assert_eq!(piles.cards_remaining(), 8);
        assert_eq!(piles.to_string(), "A23 TJQK - 5");
    }

    #[test]
    fn test_piles_parse_errors() {
        assert_eq!(
            Piles::parse("A23 TJQK 5"),
            Err(DealError::WrongPileCount(3))
        );
        assert_eq!(
            Piles::parse("A23 TJXK - 5"),
            Err(DealError::InvalidRank('X'))
        );
    }

    #[test]
    fn test_all_empty() {
        assert!(Piles::new().all_empty());
        let piles = Piles::from_fronts([&[], &[], &[Card::Four], &[]]);
        assert!(!piles.all_empty());
        assert_eq!(piles.cards_remaining(), 1);
    }
}
