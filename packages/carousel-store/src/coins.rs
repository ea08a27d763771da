use crate::persist::{load_state, save_state};
use crate::storage::Storage;
use blackjack::CoinLedger;
use serde::{Deserialize, Serialize};

/// Balance of a first-time player
pub const DEFAULT_COINS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CoinState {
    coins: u64,
}

impl Default for CoinState {
    fn default() -> Self {
        Self {
            coins: DEFAULT_COINS,
        }
    }
}

/// The player's coin wallet, shared by all games
#[derive(Debug)]
pub struct CoinStore<S: Storage> {
    state: CoinState,
    storage: S,
}

impl<S: Storage> CoinStore<S> {
    pub const KEY: &'static str = "coinStore";

    pub fn load(storage: S) -> Self {
        let state = load_state(&storage, Self::KEY).unwrap_or_default();
        Self { state, storage }
    }

    pub fn coins(&self) -> u64 {
        self.state.coins
    }

    pub fn add_coins(&mut self, amount: u64) {
        self.state.coins = self.state.coins.saturating_add(amount);
        self.save();
    }

    /// Never drops below zero
    pub fn decrease_coins(&mut self, amount: u64) {
        self.state.coins = self.state.coins.saturating_sub(amount);
        self.save();
    }

    pub fn reset_coins(&mut self) {
        self.state.coins = 0;
        self.save();
    }

    pub fn set_coins(&mut self, amount: u64) {
        self.state.coins = amount;
        self.save();
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn save(&mut self) {
        save_state(&mut self.storage, Self::KEY, &self.state);
    }
}

impl<S: Storage> CoinLedger for CoinStore<S> {
    fn balance(&self) -> u64 {
        self.coins()
    }

    fn add(&mut self, amount: u64) {
        self.add_coins(amount);
    }

    fn decrease(&mut self, amount: u64) {
        self.decrease_coins(amount);
    }
}
