use crate::round::RoundPhase;
use thiserror::Error;

/// Why a player action was turned down. A rejected action leaves the table
/// exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("Not allowed while {actual:?}, needs {expected:?}")]
    WrongPhase {
        expected: RoundPhase,
        actual: RoundPhase,
    },
    #[error("Cards are still being dealt")]
    Busy,
    #[error("Not enough coins: need {needed}, have {available}")]
    InsufficientCoins { needed: u64, available: u64 },
    #[error("Invalid bet amount: {0}")]
    InvalidBet(u64),
    #[error("A bet is already placed")]
    BetAlreadyPlaced,
    #[error("No previous bet to repeat")]
    NoPreviousBet,
    #[error("Hand has been split")]
    HandIsSplit,
    #[error("Hand has not been split")]
    NotSplit,
    #[error("Hand cannot be split")]
    NotSplittable,
    #[error("Double down needs exactly two cards")]
    CannotDouble,
    #[error("No card available in the shoe")]
    ShoeEmpty,
}
