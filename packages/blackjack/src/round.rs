use crate::hand::calculate_score;
use crate::settlement::RoundResult;
use crate::Hand;
use serde::{Deserialize, Serialize};

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Betting,
    Playing,
    Dealer,
    Finished,
}

/// Who receives a card during the initial deal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seat {
    Player,
    Dealer,
}

/// One of the two hands after a split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandSide {
    Left,
    Right,
}

impl HandSide {
    pub fn label(&self) -> &'static str {
        match self {
            HandSide::Left => "left",
            HandSide::Right => "right",
        }
    }
}

/// The regular case: one player hand
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleHandTurn {
    pub hand: Hand,
    /// Set once the initial deal produced a pair
    pub splitable: bool,
}

/// Two hands played one after the other, left first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitHandTurn {
    pub left: Hand,
    pub right: Hand,
    pub active: HandSide,
}

impl SplitHandTurn {
    pub fn new(left: Hand, right: Hand) -> Self {
        Self {
            left,
            right,
            active: HandSide::Left,
        }
    }

    pub fn hand(&self, side: HandSide) -> &Hand {
        match side {
            HandSide::Left => &self.left,
            HandSide::Right => &self.right,
        }
    }

    pub fn hand_mut(&mut self, side: HandSide) -> &mut Hand {
        match side {
            HandSide::Left => &mut self.left,
            HandSide::Right => &mut self.right,
        }
    }

    pub fn active_hand(&self) -> &Hand {
        self.hand(self.active)
    }

    pub fn active_hand_mut(&mut self) -> &mut Hand {
        self.hand_mut(self.active)
    }

    /// Neither hand can take another card
    pub fn both_resolved(&self) -> bool {
        self.left.is_resolved() && self.right.is_resolved()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerTurn {
    Single(SingleHandTurn),
    Split(SplitHandTurn),
}

impl Default for PlayerTurn {
    fn default() -> Self {
        PlayerTurn::Single(SingleHandTurn::default())
    }
}

impl PlayerTurn {
    pub fn is_split(&self) -> bool {
        matches!(self, PlayerTurn::Split(_))
    }
}

/// Everything belonging to the round in progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub phase: RoundPhase,
    pub turn: PlayerTurn,
    pub dealer: Hand,
    /// Whether the dealer's second card is face up
    pub dealer_revealed: bool,
    /// Total stake on the table, including doubles and split stakes
    pub bet: u64,
    /// Stake of the last round started, offered again by "rebet"
    pub previous_bet: u64,
    pub result: Option<RoundResult>,
}

impl Default for Round {
    fn default() -> Self {
        Self::new()
    }
}

impl Round {
    pub fn new() -> Self {
        Self {
            phase: RoundPhase::Betting,
            turn: PlayerTurn::default(),
            dealer: Hand::new(),
            dealer_revealed: false,
            bet: 0,
            previous_bet: 0,
            result: None,
        }
    }

    /// Back to an empty betting round, keeping only the last stake
    pub fn reset(&mut self) {
        let previous_bet = self.previous_bet;
        *self = Self::new();
        self.previous_bet = previous_bet;
    }

    pub fn is_split(&self) -> bool {
        self.turn.is_split()
    }

    /// Dealer total as shown: the hole card counts only once revealed
    pub fn dealer_visible_score(&self) -> u8 {
        if self.dealer_revealed {
            self.dealer.score
        } else {
            calculate_score(&self.dealer.cards[..self.dealer.cards.len().min(1)])
        }
    }

    pub fn single(&self) -> Option<&SingleHandTurn> {
        match &self.turn {
            PlayerTurn::Single(turn) => Some(turn),
            PlayerTurn::Split(_) => None,
        }
    }

    pub fn split(&self) -> Option<&SplitHandTurn> {
        match &self.turn {
            PlayerTurn::Split(turn) => Some(turn),
            PlayerTurn::Single(_) => None,
        }
    }
}
