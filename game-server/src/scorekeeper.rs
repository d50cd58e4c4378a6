use chrono::Utc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{error, info};

use game_core::{Game, GameController, GameEvent, TracingEventHandler};
use game_persistence::GameHistoryRepository;
use game_types::{Action, CompletedGame, GameError, GameView};

#[derive(Debug, Error)]
pub enum ScorekeeperError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("failed to save game history: {0:#}")]
    Persistence(anyhow::Error),
}

/// Serializes every action against the single shared game and writes the
/// history back whenever it changes.
pub struct Scorekeeper {
    controller: Mutex<GameController>,
    history: GameHistoryRepository,
}

impl Scorekeeper {
    /// Build the scorekeeper around the persisted history.
    pub async fn load(history: GameHistoryRepository, completion_delay: Duration) -> Self {
        let games = history.load().await;
        info!("Loaded {} completed games from history", games.len());

        let game = Game::with_history(games).with_completion_delay(completion_delay);
        let mut controller = GameController::new(game);
        controller.add_handler(Box::new(TracingEventHandler));

        Self {
            controller: Mutex::new(controller),
            history,
        }
    }

    pub async fn dispatch(&self, action: Action) -> Result<GameView, ScorekeeperError> {
        let mut controller = self.controller.lock().await;
        let now = Utc::now();
        let events = controller.dispatch_at(action, now)?;

        if events
            .iter()
            .any(|event| matches!(event, GameEvent::HistoryChanged { .. }))
        {
            self.history
                .save(&controller.game().history)
                .await
                .map_err(|err| {
                    error!("Failed to save game history: {:#}", err);
                    ScorekeeperError::Persistence(err)
                })?;
        }

        Ok(controller.view(now))
    }

    pub async fn view(&self) -> GameView {
        self.controller.lock().await.view(Utc::now())
    }

    pub async fn history(&self) -> Vec<CompletedGame> {
        self.controller.lock().await.game().history.clone()
    }
}
