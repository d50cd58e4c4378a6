use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{GameId, PLAYER_COUNT, PlayerIndex};

/// Every user action the scorekeeper understands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export)]
pub enum Action {
    #[serde(rename_all = "camelCase")]
    SubmitRound {
        bids: [i32; PLAYER_COUNT],
        tricks: [i32; PLAYER_COUNT],
        #[serde(default)]
        auto_round: bool,
    },
    DeleteRound { index: usize },
    RenamePlayer { index: PlayerIndex, name: String },
    DeleteGame { id: GameId },
    ResetGame,
    NewGame,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SubmitRound { .. } => "submit_round",
            Action::DeleteRound { .. } => "delete_round",
            Action::RenamePlayer { .. } => "rename_player",
            Action::DeleteGame { .. } => "delete_game",
            Action::ResetGame => "reset_game",
            Action::NewGame => "new_game",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SubmitRoundRequest {
    pub bids: [i32; PLAYER_COUNT],
    pub tricks: [i32; PLAYER_COUNT],
    #[serde(default)]
    pub auto_round: bool,
}

impl From<SubmitRoundRequest> for Action {
    fn from(request: SubmitRoundRequest) -> Self {
        Action::SubmitRound {
            bids: request.bids,
            tricks: request.tricks,
            auto_round: request.auto_round,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BidsPreviewRequest {
    pub bids: [i32; PLAYER_COUNT],
}

/// What the entry form needs to know about the bids typed so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BidsPreview {
    pub bid_total: i32,
    pub auto_round_eligible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RenamePlayerRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
}
