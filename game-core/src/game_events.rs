use game_types::{CompletedGame, GameId, PlayerIndex, Round, Standing};

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RoundRecorded {
        round_number: usize,
        round: Round,
        auto_round: bool,
        /// Display names of every seat tied for the round's best score.
        winners: Vec<String>,
        top_score: f64,
        next_dealer: PlayerIndex,
    },
    RoundDeleted {
        index: usize,
        remaining: usize,
    },
    StandingsPreview {
        standings: Vec<Standing>,
    },
    GameCompleted {
        game: CompletedGame,
        winner_index: PlayerIndex,
        reveal_at_ms: i64,
    },
    /// The history list changed and must be written back in full.
    HistoryChanged {
        len: usize,
    },
    PlayerRenamed {
        index: PlayerIndex,
        name: String,
    },
    GameDeleted {
        game_id: GameId,
    },
    NewGameStarted {
        dealer: PlayerIndex,
    },
    GameReset {
        dealer: PlayerIndex,
    },
}

impl GameEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::RoundRecorded { .. } => "round_recorded",
            GameEvent::RoundDeleted { .. } => "round_deleted",
            GameEvent::StandingsPreview { .. } => "standings_preview",
            GameEvent::GameCompleted { .. } => "game_completed",
            GameEvent::HistoryChanged { .. } => "history_changed",
            GameEvent::PlayerRenamed { .. } => "player_renamed",
            GameEvent::GameDeleted { .. } => "game_deleted",
            GameEvent::NewGameStarted { .. } => "new_game_started",
            GameEvent::GameReset { .. } => "game_reset",
        }
    }

    /// Short text for a toast, where the action warrants one.
    pub fn notification(&self) -> Option<String> {
        match self {
            GameEvent::RoundRecorded {
                round_number,
                auto_round,
                winners,
                top_score,
                ..
            } => {
                let prefix = if *auto_round { "Auto round" } else { "Round" };
                Some(format!(
                    "{prefix} {round_number} complete! {} won with {top_score:.1} points",
                    winners.join(" & ")
                ))
            }
            GameEvent::RoundDeleted { .. } => Some("Round deleted".to_string()),
            GameEvent::GameCompleted { game, .. } => Some(format!(
                "Game complete! {} wins with {:.1} points",
                game.winner, game.winner_score
            )),
            GameEvent::GameDeleted { .. } => Some("Game removed from history".to_string()),
            GameEvent::NewGameStarted { .. } | GameEvent::GameReset { .. } => {
                Some("New game started!".to_string())
            }
            GameEvent::StandingsPreview { .. }
            | GameEvent::HistoryChanged { .. }
            | GameEvent::PlayerRenamed { .. } => None,
        }
    }
}

/// Observer notified after every successful state change.
pub trait GameEventHandler: Send {
    fn handle_event(&mut self, event: &GameEvent);
}

/// Simple event bus for distributing game events
pub struct GameEventBus {
    handlers: Vec<Box<dyn GameEventHandler>>,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn publish(&mut self, event: &GameEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event);
        }
    }
}

impl Default for GameEventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Logs every event through `tracing`.
pub struct TracingEventHandler;

impl GameEventHandler for TracingEventHandler {
    fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::GameCompleted { game, .. } => {
                tracing::info!(
                    game_id = %game.id,
                    winner = %game.winner,
                    winner_score = game.winner_score,
                    "game completed"
                );
            }
            other => {
                tracing::debug!(event = other.kind(), notification = ?other.notification(), "game event");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct TestHandler {
        events: Arc<Mutex<Vec<GameEvent>>>,
    }

    impl GameEventHandler for TestHandler {
        fn handle_event(&mut self, event: &GameEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    #[test]
    fn test_event_bus() {
        let mut bus = GameEventBus::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        bus.add_handler(Box::new(TestHandler {
            events: events.clone(),
        }));
        assert_eq!(bus.handler_count(), 1);

        let event = GameEvent::RoundDeleted {
            index: 0,
            remaining: 2,
        };
        bus.publish(&event);

        assert_eq!(events.lock().unwrap().as_slice(), &[event]);
    }

    #[test]
    fn test_round_notification_names_tied_winners() {
        let event = GameEvent::RoundRecorded {
            round_number: 2,
            round: Round {
                bids: [3, 3, 2, 2],
                tricks: [3, 3, 4, 3],
                scores: [3.0, 3.0, 2.2, 2.1],
            },
            auto_round: false,
            winners: vec!["Asha".to_string(), "Bikram".to_string()],
            top_score: 3.0,
            next_dealer: 2,
        };
        assert_eq!(
            event.notification().as_deref(),
            Some("Round 2 complete! Asha & Bikram won with 3.0 points")
        );
    }

    #[test]
    fn test_silent_events() {
        let event = GameEvent::HistoryChanged { len: 1 };
        assert!(event.notification().is_none());
        assert_eq!(event.kind(), "history_changed");
    }
}
