use crate::persist::{load_state, save_state};
use crate::storage::Storage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreState {
    best_scores: BTreeMap<String, u64>,
}

/// Best score per game id. Scores only ever go up.
#[derive(Debug)]
pub struct ScoreStore<S: Storage> {
    state: ScoreState,
    storage: S,
}

impl<S: Storage> ScoreStore<S> {
    pub const KEY: &'static str = "scoreStore";

    pub fn load(storage: S) -> Self {
        let state = load_state(&storage, Self::KEY).unwrap_or_default();
        Self { state, storage }
    }

    /// 0 for games never played
    pub fn get_best_score(&self, game_id: &str) -> u64 {
        self.state.best_scores.get(game_id).copied().unwrap_or(0)
    }

    /// Record `score` if it beats the current best. Returns whether it did.
    pub fn set_best_score(&mut self, game_id: &str, score: u64) -> bool {
        if score <= self.get_best_score(game_id) {
            return false;
        }
        log::info!("New best score for {game_id}: {score}");
        self.state.best_scores.insert(game_id.to_string(), score);
        self.save();
        true
    }

    pub fn reset_all_scores(&mut self) {
        self.state.best_scores.clear();
        self.save();
    }

    pub fn best_scores(&self) -> &BTreeMap<String, u64> {
        &self.state.best_scores
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn save(&mut self) {
        save_state(&mut self.storage, Self::KEY, &self.state);
    }
}
