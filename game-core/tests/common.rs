#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use game_core::{Game, GameController, GameEvent, GameEventHandler};
use game_types::Action;
use std::sync::{Arc, Mutex};

/// Fixed clock offset from a known instant.
pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

pub fn round(bids: [i32; 4], tricks: [i32; 4]) -> Action {
    Action::SubmitRound {
        bids,
        tricks,
        auto_round: false,
    }
}

pub fn auto_round(bids: [i32; 4]) -> Action {
    Action::SubmitRound {
        bids,
        tricks: [0; 4],
        auto_round: true,
    }
}

/// A round every seat makes exactly, with seat 0 taking the spare tricks.
pub fn standard_round() -> Action {
    round([3, 4, 3, 3], [5, 2, 3, 3])
}

pub fn named_game(names: [&str; 4]) -> Game {
    let mut game = Game::new();
    for (slot, name) in game.players.iter_mut().zip(names) {
        *slot = name.to_string();
    }
    game
}

/// Event collector for testing event emissions
#[derive(Clone)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn has_event_type(&self, check_fn: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(check_fn)
    }
}

impl GameEventHandler for EventCollector {
    fn handle_event(&mut self, event: &GameEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Controller with a collector attached.
pub fn controller_with_collector(game: Game) -> (GameController, EventCollector) {
    let collector = EventCollector::new();
    let mut controller = GameController::new(game);
    controller.add_handler(Box::new(collector.clone()));
    (controller, collector)
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
