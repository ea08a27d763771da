use crate::card::{create_deck, shuffle_deck, Card};
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The stack of cards dealt from. The top of the shoe is the end of `cards`.
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: Vec<Card>,
    rng: ChaCha8Rng,
}

impl Shoe {
    /// A shoe of `decks` freshly shuffled decks
    pub fn new(decks: u8, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let all: Vec<Card> = (0..decks.max(1)).flat_map(|_| create_deck()).collect();
        let cards = shuffle_deck(&all, &mut rng);
        Self { cards, rng }
    }

    pub fn from_entropy(decks: u8) -> Self {
        Self::new(decks, rand::random())
    }

    /// Cards in exactly the given order; the last one is dealt first
    pub fn stacked(cards: Vec<Card>, seed: u64) -> Self {
        Self {
            cards,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn peek(&self) -> Option<&Card> {
        self.cards.last()
    }

    /// Take the top card, adding a fresh deck first when the shoe ran dry
    pub fn draw(&mut self) -> Option<Card> {
        if self.cards.is_empty() {
            log::debug!("Shoe empty, adding a fresh deck before drawing");
            self.replenish();
        }
        self.cards.pop()
    }

    /// Add a fresh deck when fewer than `threshold` cards remain
    pub fn refill_if_below(&mut self, threshold: usize) -> bool {
        if self.cards.len() < threshold {
            log::info!(
                "Shoe down to {} cards (threshold {threshold}), adding a fresh deck",
                self.cards.len()
            );
            self.replenish();
            true
        } else {
            false
        }
    }

    /// Mix one new deck into what is left and shuffle the lot
    fn replenish(&mut self) {
        let mut combined = std::mem::take(&mut self.cards);
        combined.extend(create_deck());
        self.cards = shuffle_deck(&combined, &mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::DECK_SIZE;
    use crate::{Rank, Suit};

    #[test]
    fn test_new_shoe_size() {
        assert_eq!(Shoe::new(1, 1).len(), DECK_SIZE);
        assert_eq!(Shoe::new(6, 1).len(), 6 * DECK_SIZE);
        assert_eq!(Shoe::new(0, 1).len(), DECK_SIZE);
    }

    #[test]
    fn test_same_seed_same_order() {
        let a = Shoe::new(1, 42);
        let b = Shoe::new(1, 42);
        let faces = |s: &Shoe| -> Vec<(Rank, Suit)> { s.cards.iter().map(|c| (c.rank, c.suit)).collect() };
        assert_eq!(faces(&a), faces(&b));
    }

    #[test]
    fn test_draw_takes_from_top() {
        let bottom = Card::new(Rank::Two, Suit::Clubs);
        let top = Card::new(Rank::King, Suit::Hearts);
        let mut shoe = Shoe::stacked(vec![bottom, top], 0);
        assert_eq!(shoe.peek(), Some(&top));
        assert_eq!(shoe.draw(), Some(top));
        assert_eq!(shoe.len(), 1);
        assert_eq!(shoe.draw(), Some(bottom));
        assert!(shoe.is_empty());
    }

    #[test]
    fn test_draw_strictly_decreases_length() {
        let mut shoe = Shoe::new(1, 3);
        let mut previous = shoe.len();
        for _ in 0..DECK_SIZE {
            shoe.draw().unwrap();
            assert_eq!(shoe.len(), previous - 1);
            previous = shoe.len();
        }
        assert!(shoe.is_empty());
    }

    #[test]
    fn test_draw_from_empty_shoe_replenishes() {
        let mut shoe = Shoe::stacked(Vec::new(), 9);
        assert!(shoe.draw().is_some());
        assert_eq!(shoe.len(), DECK_SIZE - 1);
    }

    #[test]
    fn test_refill_if_below_threshold() {
        let cards: Vec<Card> = (0..12).map(|_| Card::new(Rank::Five, Suit::Spades)).collect();
        let mut shoe = Shoe::stacked(cards, 5);
        assert!(shoe.refill_if_below(13));
        assert_eq!(shoe.len(), 12 + DECK_SIZE);
        assert!(!shoe.refill_if_below(13));
    }

    #[test]
    fn test_refill_keeps_remaining_cards() {
        let marker = Card::new(Rank::Ace, Suit::Diamonds);
        let mut shoe = Shoe::stacked(vec![marker], 5);
        shoe.refill_if_below(13);
        assert!(shoe.cards.iter().any(|c| c.id == marker.id));
    }
}
