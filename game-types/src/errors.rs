use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::PlayerIndex;

/// Why a submitted round was refused. Messages are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RoundError {
    #[error("Bids must be between 1 and 13")]
    BidOutOfRange { player: PlayerIndex, bid: i32 },
    #[error("Tricks must total 13 (currently {total})")]
    TrickSumMismatch { total: i32 },
    #[error("Bids must total 9 for an auto round (currently {total})")]
    AutoRoundBidSum { total: i32 },
}

#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameError {
    #[error(transparent)]
    InvalidRound(#[from] RoundError),
    #[error("Round {index} not found")]
    RoundNotFound { index: usize },
    #[error("Player {index} not found")]
    PlayerNotFound { index: PlayerIndex },
    #[error("Game {game_id} not found")]
    GameNotFound { game_id: String },
    #[error("Game is already complete; start a new game")]
    GameAlreadyComplete,
}
