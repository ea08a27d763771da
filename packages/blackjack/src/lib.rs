mod card;
mod engine;
mod error;
mod hand;
mod ledger;
mod round;
mod rules;
mod scheduler;
mod settlement;
mod shoe;
mod sound;

pub use card::{create_deck, shuffle_deck, Card, Rank, Suit, DECK_SIZE};
pub use engine::Table;
pub use error::ActionError;
pub use hand::{calculate_score, can_split_cards, is_blackjack, is_bust, Hand, BLACKJACK};
pub use ledger::{CoinLedger, MemoryLedger};
pub use round::{HandSide, PlayerTurn, Round, RoundPhase, Seat, SingleHandTurn, SplitHandTurn};
pub use rules::{TableRules, DEFAULT_CHIPS};
pub use scheduler::{Pending, RoundToken, Scheduler, Step};
pub use settlement::{handle_game_result, Outcome, RoundResult, Settlement};
pub use shoe::Shoe;
pub use sound::{RecordingSound, Silent, SoundEffect, SoundPlayer};
