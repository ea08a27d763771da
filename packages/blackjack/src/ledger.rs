/// Coin balance the table takes stakes from and pays winnings into.
pub trait CoinLedger {
    fn balance(&self) -> u64;

    fn add(&mut self, amount: u64);

    /// Never goes below zero
    fn decrease(&mut self, amount: u64);
}

/// Ledger kept in memory only
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLedger {
    coins: u64,
}

impl MemoryLedger {
    pub fn new(coins: u64) -> Self {
        Self { coins }
    }
}

impl CoinLedger for MemoryLedger {
    fn balance(&self) -> u64 {
        self.coins
    }

    fn add(&mut self, amount: u64) {
        self.coins = self.coins.saturating_add(amount);
    }

    fn decrease(&mut self, amount: u64) {
        self.coins = self.coins.saturating_sub(amount);
    }
}

impl<L: CoinLedger + ?Sized> CoinLedger for &mut L {
    fn balance(&self) -> u64 {
        (**self).balance()
    }

    fn add(&mut self, amount: u64) {
        (**self).add(amount)
    }

    fn decrease(&mut self, amount: u64) {
        (**self).decrease(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decrease_is_clamped() {
        let mut ledger = MemoryLedger::new(30);
        ledger.decrease(50);
        assert_eq!(ledger.balance(), 0);
    }

    #[test]
    fn test_add_and_decrease() {
        let mut ledger = MemoryLedger::new(100);
        ledger.decrease(40);
        ledger.add(15);
        assert_eq!(ledger.balance(), 75);
    }

    fn credit_five<L: CoinLedger>(mut ledger: L) {
        ledger.add(5);
    }

    #[test]
    fn test_borrowed_ledger() {
        let mut ledger = MemoryLedger::new(10);
        credit_five(&mut ledger);
        assert_eq!(ledger.balance(), 15);
    }
}
