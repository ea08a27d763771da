use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Cards in one standard deck
pub const DECK_SIZE: usize = 52;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn symbol(&self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Suit::Spades => "Spades",
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// 1 for Ace up to 13 for King
    pub fn order(&self) -> u8 {
        *self as u8 + 1
    }

    /// Blackjack value with the Ace counted high
    pub fn value(&self) -> u8 {
        match self {
            Rank::Ace => 11,
            Rank::Jack | Rank::Queen | Rank::King => 10,
            other => other.order(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Rank::Ace => "Ace",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
        }
    }

    pub fn short(&self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            other => other.name(),
        }
    }
}

/// A single playing card. The id tells apart identical faces once several
/// decks are mixed into one shoe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: Uuid,
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            id: Uuid::new_v4(),
            rank,
            suit,
        }
    }

    pub fn value(&self) -> u8 {
        self.rank.value()
    }

    pub fn is_ace(&self) -> bool {
        self.rank == Rank::Ace
    }

    /// "Spades Ace", "Hearts 10", ...
    pub fn display_name(&self) -> String {
        format!("{} {}", self.suit.name(), self.rank.name())
    }

    pub fn to_display(&self) -> String {
        format!("{}{}", self.rank.short(), self.suit.symbol())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display())
    }
}

/// Build one 52 card deck, suit by suit, Ace through King.
pub fn create_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card::new(rank, suit));
        }
    }
    deck
}

/// Returns a shuffled copy of `deck` (Fisher-Yates); the input is left as is.
pub fn shuffle_deck<R: Rng + ?Sized>(deck: &[Card], rng: &mut R) -> Vec<Card> {
    let mut shuffled = deck.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn sorted_ids(cards: &[Card]) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = cards.iter().map(|c| c.id).collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_create_deck_has_52_unique_cards() {
        let deck = create_deck();
        assert_eq!(deck.len(), DECK_SIZE);

        let faces: HashSet<(Rank, Suit)> = deck.iter().map(|c| (c.rank, c.suit)).collect();
        assert_eq!(faces.len(), DECK_SIZE);

        let ids: HashSet<Uuid> = deck.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), DECK_SIZE);
    }

    #[test]
    fn test_create_deck_order_is_deterministic() {
        let deck = create_deck();
        assert_eq!((deck[0].rank, deck[0].suit), (Rank::Ace, Suit::Spades));
        assert_eq!((deck[12].rank, deck[12].suit), (Rank::King, Suit::Spades));
        assert_eq!((deck[13].rank, deck[13].suit), (Rank::Ace, Suit::Hearts));
        assert_eq!((deck[51].rank, deck[51].suit), (Rank::King, Suit::Clubs));
    }

    #[test]
    fn test_card_values() {
        assert_eq!(Card::new(Rank::Ace, Suit::Hearts).value(), 11);
        assert_eq!(Card::new(Rank::Seven, Suit::Clubs).value(), 7);
        assert_eq!(Card::new(Rank::Ten, Suit::Clubs).value(), 10);
        assert_eq!(Card::new(Rank::Queen, Suit::Diamonds).value(), 10);
    }

    #[test]
    fn test_card_names() {
        let card = Card::new(Rank::Ace, Suit::Spades);
        assert_eq!(card.display_name(), "Spades Ace");
        assert_eq!(card.to_display(), "A♠");
        assert_eq!(Card::new(Rank::Ten, Suit::Hearts).to_display(), "10♥");
    }

    #[test]
    fn test_shuffle_leaves_input_untouched() {
        let deck = create_deck();
        let before = deck.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let shuffled = shuffle_deck(&deck, &mut rng);
        assert_eq!(deck, before);
        assert_ne!(shuffled, deck);
    }

    proptest! {
        #[test]
        fn shuffle_preserves_cards(seed in any::<u64>(), decks in 1usize..4) {
            let shoe: Vec<Card> = (0..decks).flat_map(|_| create_deck()).collect();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let shuffled = shuffle_deck(&shoe, &mut rng);
            prop_assert_eq!(sorted_ids(&shuffled), sorted_ids(&shoe));
        }
    }
}
