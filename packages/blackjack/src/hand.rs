use crate::Card;
use serde::{Deserialize, Serialize};

/// Best possible total; anything above is a bust
pub const BLACKJACK: u8 = 21;

/// Calculate the value of a blackjack hand
pub fn calculate_score(cards: &[Card]) -> u8 {
    let mut total: u8 = 0;
    let mut aces = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        total = total.saturating_add(card.value());
    }

    // Count aces as 1 instead of 11 while we are over
    while total > BLACKJACK && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    total
}

/// Check if a hand is busted
pub fn is_bust(cards: &[Card]) -> bool {
    calculate_score(cards) > BLACKJACK
}

/// Check if a hand is blackjack (21 with 2 cards)
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && calculate_score(cards) == BLACKJACK
}

/// Check if two cards can be split (same rank)
pub fn can_split_cards(card1: &Card, card2: &Card) -> bool {
    card1.rank == card2.rank
}

/// Cards held by one party, with the score kept in step with every added card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    pub cards: Vec<Card>,
    pub score: u8,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        let score = calculate_score(&cards);
        Self { cards, score }
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
        self.score = calculate_score(&self.cards);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_bust(&self) -> bool {
        self.score > BLACKJACK
    }

    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.score == BLACKJACK
    }

    /// 21 or more: the hand takes no further cards
    pub fn is_resolved(&self) -> bool {
        self.score >= BLACKJACK
    }

    pub fn can_split(&self) -> bool {
        self.cards.len() == 2 && can_split_cards(&self.cards[0], &self.cards[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rank, Suit};
    use proptest::prelude::*;

    fn cards(ranks: &[Rank]) -> Vec<Card> {
        ranks.iter().map(|r| Card::new(*r, Suit::Spades)).collect()
    }

    #[test]
    fn test_calculate_score_simple() {
        assert_eq!(calculate_score(&cards(&[Rank::Two, Rank::Three])), 5);
    }

    #[test]
    fn test_calculate_score_empty() {
        assert_eq!(calculate_score(&[]), 0);
    }

    #[test]
    fn test_calculate_score_face_cards() {
        assert_eq!(calculate_score(&cards(&[Rank::King, Rank::Queen])), 20);
    }

    #[test]
    fn test_calculate_score_blackjack() {
        assert_eq!(calculate_score(&cards(&[Rank::Ace, Rank::King])), 21);
    }

    #[test]
    fn test_calculate_score_soft_ace() {
        assert_eq!(calculate_score(&cards(&[Rank::Ace, Rank::Six])), 17); // Ace as 11
    }

    #[test]
    fn test_calculate_score_hard_ace() {
        assert_eq!(calculate_score(&cards(&[Rank::Ace, Rank::Six, Rank::Nine])), 16); // Ace as 1
    }

    #[test]
    fn test_calculate_score_multiple_aces() {
        assert_eq!(calculate_score(&cards(&[Rank::Ace, Rank::Ace, Rank::Nine])), 21);
    }

    #[test]
    fn test_calculate_score_bust_without_aces() {
        assert_eq!(calculate_score(&cards(&[Rank::King, Rank::Queen, Rank::Five])), 25);
    }

    #[test]
    fn test_is_bust() {
        assert!(is_bust(&cards(&[Rank::King, Rank::Queen, Rank::Five])));
        assert!(!is_bust(&cards(&[Rank::King, Rank::Queen])));
    }

    #[test]
    fn test_is_blackjack() {
        assert!(is_blackjack(&cards(&[Rank::Ace, Rank::King])));
        assert!(!is_blackjack(&cards(&[Rank::Seven, Rank::Seven, Rank::Seven])));
        assert!(!is_blackjack(&cards(&[Rank::King, Rank::Queen])));
    }

    #[test]
    fn test_can_split_cards() {
        let eights = cards(&[Rank::Eight, Rank::Eight]);
        assert!(can_split_cards(&eights[0], &eights[1]));

        // Same value is not enough
        let faces = cards(&[Rank::King, Rank::Queen]);
        assert!(!can_split_cards(&faces[0], &faces[1]));
    }

    #[test]
    fn test_hand_tracks_score() {
        let mut hand = Hand::new();
        hand.add_card(Card::new(Rank::King, Suit::Hearts));
        assert_eq!(hand.score, 10);
        hand.add_card(Card::new(Rank::Seven, Suit::Spades));
        assert_eq!(hand.score, 17);
        assert!(!hand.is_resolved());
        hand.add_card(Card::new(Rank::Nine, Suit::Clubs));
        assert!(hand.is_bust());
        assert!(hand.is_resolved());
    }

    #[test]
    fn test_hand_can_split_only_with_two_cards() {
        let mut hand = Hand::from_cards(cards(&[Rank::Eight, Rank::Eight]));
        assert!(hand.can_split());
        hand.add_card(Card::new(Rank::Two, Suit::Clubs));
        assert!(!hand.can_split());
    }

    fn rank_strategy() -> impl Strategy<Value = Rank> {
        (0usize..13).prop_map(|i| Rank::ALL[i])
    }

    proptest! {
        #[test]
        fn score_ignores_card_order(ranks in prop::collection::vec(rank_strategy(), 0..8)) {
            let hand = cards(&ranks);
            let mut reversed = hand.clone();
            reversed.reverse();
            let mut rotated = hand.clone();
            if !rotated.is_empty() {
                rotated.rotate_left(1);
            }
            prop_assert_eq!(calculate_score(&hand), calculate_score(&reversed));
            prop_assert_eq!(calculate_score(&hand), calculate_score(&rotated));
        }
    }
}
