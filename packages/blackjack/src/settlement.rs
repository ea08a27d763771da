use crate::hand::BLACKJACK;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Bust,
    Win,
    Push,
    Loss,
}

impl Outcome {
    pub fn is_win(&self) -> bool {
        matches!(self, Outcome::Win)
    }
}

/// Result of comparing one player hand with the dealer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub outcome: Outcome,
    pub player_score: u8,
    pub dealer_score: u8,
    pub bet: u64,
    /// Coins paid back to the ledger; the stake itself was taken at bet time
    pub credit: u64,
    pub message: String,
}

/// How a finished round ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundResult {
    Single(Settlement),
    Split { left: Settlement, right: Settlement },
}

impl RoundResult {
    pub fn settlements(&self) -> Vec<&Settlement> {
        match self {
            RoundResult::Single(s) => vec![s],
            RoundResult::Split { left, right } => vec![left, right],
        }
    }

    pub fn total_credit(&self) -> u64 {
        self.settlements().iter().map(|s| s.credit).sum()
    }

    pub fn message(&self) -> String {
        match self {
            RoundResult::Single(s) => s.message.clone(),
            RoundResult::Split { left, right } => {
                format!("Left: {} | Right: {}", left.message, right.message)
            }
        }
    }
}

/// Settle a player total against the dealer total for `bet` coins.
///
/// A win pays back twice the stake, a push refunds it, anything else pays
/// nothing. Pure: the caller credits the ledger.
pub fn handle_game_result(player_score: u8, dealer_score: u8, bet: u64) -> Settlement {
    let (outcome, credit, message) = if player_score > BLACKJACK {
        (Outcome::Bust, 0, format!("Bust - Lost {bet}"))
    } else if dealer_score > BLACKJACK || player_score > dealer_score {
        (Outcome::Win, bet * 2, format!("Won +{bet}"))
    } else if player_score == dealer_score {
        (Outcome::Push, bet, "Push ±0".to_string())
    } else {
        (Outcome::Loss, 0, format!("Lost -{bet}"))
    };

    Settlement {
        outcome,
        player_score,
        dealer_score,
        bet,
        credit,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_bust_loses_even_if_dealer_busts() {
        let s = handle_game_result(24, 25, 50);
        assert_eq!(s.outcome, Outcome::Bust);
        assert_eq!(s.credit, 0);
        assert!(s.message.contains("Bust"));
    }

    #[test]
    fn test_dealer_bust_pays_double() {
        let s = handle_game_result(15, 22, 50);
        assert_eq!(s.outcome, Outcome::Win);
        assert_eq!(s.credit, 100);
        assert_eq!(s.message, "Won +50");
    }

    #[test]
    fn test_higher_total_wins() {
        let s = handle_game_result(20, 18, 10);
        assert!(s.outcome.is_win());
        assert_eq!(s.credit, 20);
    }

    #[test]
    fn test_push_refunds_stake_only() {
        let s = handle_game_result(21, 21, 40);
        assert_eq!(s.outcome, Outcome::Push);
        assert_eq!(s.credit, 40);
        assert_eq!(s.message, "Push ±0");
    }

    #[test]
    fn test_lower_total_loses() {
        let s = handle_game_result(17, 19, 25);
        assert_eq!(s.outcome, Outcome::Loss);
        assert_eq!(s.credit, 0);
        assert_eq!(s.message, "Lost -25");
    }

    #[test]
    fn test_split_result_totals() {
        let result = RoundResult::Split {
            left: handle_game_result(20, 18, 10),
            right: handle_game_result(18, 18, 10),
        };
        assert_eq!(result.total_credit(), 30);
        assert_eq!(result.message(), "Left: Won +10 | Right: Push ±0");
    }
}
