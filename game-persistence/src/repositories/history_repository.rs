use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::store::KeyValueStore;
use game_types::CompletedGame;

/// Key under which the whole history list is stored.
pub const HISTORY_KEY: &str = "callbreak-game-history";

/// Completed-game log, stored as one JSON array under [`HISTORY_KEY`] and
/// rewritten in full on every change.
pub struct GameHistoryRepository {
    store: Arc<dyn KeyValueStore>,
}

impl GameHistoryRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the history, most recent first. A missing, unreadable or corrupt
    /// value yields an empty history.
    pub async fn load(&self) -> Vec<CompletedGame> {
        let raw = match self.store.get(HISTORY_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!("failed to read game history, starting empty: {:#}", err);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<CompletedGame>>(&raw) {
            Ok(history) => {
                debug!(games = history.len(), "loaded game history");
                history
            }
            Err(err) => {
                warn!("stored game history is not valid, starting empty: {}", err);
                Vec::new()
            }
        }
    }

    pub async fn save(&self, history: &[CompletedGame]) -> Result<()> {
        let raw = serde_json::to_string(history).context("serializing game history")?;
        self.store.put(HISTORY_KEY, &raw).await?;
        debug!(games = history.len(), "saved game history");
        Ok(())
    }
}
