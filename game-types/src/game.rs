use crate::{GameId, PLAYER_COUNT, PlayerIndex, PlayerView};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One recorded deal. `scores[i]` is always derived from `bids[i]` and
/// `tricks[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Round {
    pub bids: [i32; PLAYER_COUNT],
    pub tricks: [i32; PLAYER_COUNT],
    pub scores: [f64; PLAYER_COUNT],
}

/// Snapshot of a finished game as stored in the history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CompletedGame {
    pub id: GameId,
    pub date: String,
    pub players: [String; PLAYER_COUNT],
    pub final_scores: [f64; PLAYER_COUNT],
    pub winner: String,
    pub winner_score: f64,
    pub rounds: Vec<Round>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Standing {
    pub rank: u32,
    pub player_index: PlayerIndex,
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "state", rename_all = "camelCase")]
#[ts(export)]
pub enum GamePhase {
    InProgress,
    /// Finalized; the overlay is revealed once the clock passes `reveal_at_ms`.
    #[serde(rename_all = "camelCase")]
    Complete {
        game_id: GameId,
        reveal_at_ms: i64,
    },
}

/// Read model handed to clients after every action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GameView {
    pub players: Vec<PlayerView>,
    pub rounds: Vec<Round>,
    pub round_number: usize,
    pub rounds_per_game: usize,
    pub dealer: PlayerIndex,
    pub phase: GamePhase,
    pub completion_visible: bool,
    pub standings_preview: Option<Vec<Standing>>,
    pub history_len: usize,
}
