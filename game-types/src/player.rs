use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{MAX_NAME_LENGTH, PLAYER_COUNT, PlayerIndex};

/// Name shown for a seat whose name is blank.
pub fn default_player_name(index: PlayerIndex) -> String {
    format!("Player {}", index + 1)
}

/// Trim and cap a submitted name. Blank names stay blank so the seat falls
/// back to its default label.
pub fn sanitize_player_name(name: &str) -> String {
    name.trim().chars().take(MAX_NAME_LENGTH).collect()
}

pub fn display_name(index: PlayerIndex, name: &str) -> String {
    if name.trim().is_empty() {
        default_player_name(index)
    } else {
        name.to_string()
    }
}

pub fn default_player_names() -> [String; PLAYER_COUNT] {
    std::array::from_fn(default_player_name)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PlayerView {
    pub index: PlayerIndex,
    pub name: String,
    pub display_name: String,
    pub total_score: f64,
    pub is_leader: bool,
    pub is_dealer: bool,
}
