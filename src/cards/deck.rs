use super::card::Card;
use super::hand::Hand;
use super::rank::Rank;
use super::suit::Suit;
use rand::Rng;

/// the deck owns the undealt cards for a game in progress. the core never
/// sources its own randomness -- shuffling and dealing both take an
/// injected `rand::Rng` (spec.md §1: "the core assumes a uniform bit-source
/// is injected").
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// a full, unshuffled 52-card deck.
    pub fn new() -> Self {
        let cards = Rank::all()
            .into_iter()
            .flat_map(|rank| Suit::all().into_iter().map(move |suit| Card::new(rank, suit)))
            .collect();
        Self { cards }
    }

    /// the deck remaining once `dealt` has been removed -- the complement
    /// deck used by the equity sampler.
    pub fn complement(dealt: &Hand) -> Self {
        let cards = Self::new()
            .cards
            .into_iter()
            .filter(|c| !dealt.contains(*c))
            .collect();
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        // Fisher-Yates
        for i in (1..self.cards.len()).rev() {
            let j = rng.random_range(0..=i);
            self.cards.swap(i, j);
        }
    }

    /// remove and return the top card.
    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// draw `n` cards without replacement, shuffling first so the draw is
    /// uniform over the remaining deck.
    pub fn draw(&mut self, n: usize, rng: &mut impl Rng) -> Vec<Card> {
        let mut drawn = Vec::with_capacity(n);
        for _ in 0..n {
            let i = rng.random_range(0..self.cards.len());
            drawn.push(self.cards.swap_remove(i));
        }
        drawn
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
