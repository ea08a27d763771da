use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Chip denominations offered on the betting screen
pub const DEFAULT_CHIPS: [u64; 4] = [10, 25, 50, 100];

/// Configurable table settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRules {
    /// Delay between two dealt cards, in milliseconds
    pub pace_ms: u64,

    /// Refill the shoe between rounds when fewer cards than this remain
    pub refill_threshold: usize,

    /// Number of decks in a fresh shoe
    pub num_decks: u8,

    /// Dealer draws while below this total
    pub dealer_stands_on: u8,

    /// Chip denominations
    pub chips: Vec<u64>,
}

impl Default for TableRules {
    fn default() -> Self {
        Self {
            pace_ms: 600,
            refill_threshold: 13,
            num_decks: 1,
            dealer_stands_on: 17,
            chips: DEFAULT_CHIPS.to_vec(),
        }
    }
}

impl TableRules {
    /// No pacing at all; every deferred step is due immediately
    pub fn instant() -> Self {
        Self {
            pace_ms: 0,
            ..Self::default()
        }
    }

    pub fn with_pace(mut self, pace_ms: u64) -> Self {
        self.pace_ms = pace_ms;
        self
    }

    pub fn with_decks(mut self, num_decks: u8) -> Self {
        self.num_decks = num_decks.max(1);
        self
    }

    pub fn pace(&self) -> Duration {
        Duration::from_millis(self.pace_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = TableRules::default();
        assert_eq!(rules.pace(), Duration::from_millis(600));
        assert_eq!(rules.refill_threshold, 13);
        assert_eq!(rules.num_decks, 1);
        assert_eq!(rules.dealer_stands_on, 17);
        assert_eq!(rules.chips, vec![10, 25, 50, 100]);
    }

    #[test]
    fn test_instant_rules() {
        assert_eq!(TableRules::instant().pace(), Duration::ZERO);
    }

    #[test]
    fn test_with_decks_never_zero() {
        assert_eq!(TableRules::default().with_decks(0).num_decks, 1);
        assert_eq!(TableRules::default().with_decks(6).num_decks, 6);
    }
}
