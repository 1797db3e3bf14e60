use super::rank::Rank;
use super::suit::Suit;
use std::fmt::{Display, Formatter, Result};

/// a single playing card, value-typed and copyable.
///
/// ordering is only meaningful when explicitly requested via `(rank, suit)`
/// comparison -- two cards of the same rank but different suit are not
/// otherwise comparable in poker.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
    pub const fn rank(&self) -> Rank {
        self.rank
    }
    pub const fn suit(&self) -> Suit {
        self.suit
    }
    /// 0..52 dense index, ordered suit-within-rank
    pub fn to_int(&self) -> u8 {
        self.rank.index() * 4 + (self.suit as u8)
    }
}

// u8 isomorphism
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        c.to_int()
    }
}
impl From<u8> for Card {
    fn from(n: u8) -> Self {
        Self {
            rank: Rank::from(n / 4),
            suit: Suit::from(n % 4),
        }
    }
}

// u64 single-bit isomorphism
impl From<Card> for u64 {
    fn from(c: Card) -> u64 {
        1u64 << u8::from(c)
    }
}
impl From<u64> for Card {
    fn from(bits: u64) -> Self {
        assert_eq!(bits.count_ones(), 1, "not a single-card bitmask");
        Self::from(bits.trailing_zeros() as u8)
    }
}

impl TryFrom<&str> for Card {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> std::result::Result<Self, Self::Error> {
        let mut chars = s.chars();
        let rank_char = chars.next().ok_or_else(|| anyhow::anyhow!("empty card string"))?;
        let suit_char = chars.next().ok_or_else(|| anyhow::anyhow!("truncated card string '{s}'"))?;
        if chars.next().is_some() {
            return Err(anyhow::anyhow!("card string '{s}' too long"));
        }
        let rank = Rank::try_from(rank_char.to_string().as_str())?;
        let suit = Suit::try_from(suit_char)?;
        Ok(Self::new(rank, suit))
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl crate::Arbitrary for Card {
    fn random() -> Self {
        use crate::Arbitrary;
        Self::new(Rank::random(), Suit::random())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_u8() {
        for n in 0..52u8 {
            assert_eq!(u8::from(Card::from(n)), n);
        }
    }

    #[test]
    fn round_trips_through_bitmask() {
        let c = Card::new(Rank::Ace, Suit::Spade);
        assert_eq!(Card::from(u64::from(c)), c);
    }

    #[test]
    fn parses_from_str() {
        let c = Card::try_from("As").unwrap();
        assert_eq!(c.rank(), Rank::Ace);
        assert_eq!(c.suit(), Suit::Spade);
        assert_eq!(c.to_string(), "As");
        assert!(Card::try_from("Zz").is_err());
    }
}
