use game_types::{
    Action, CompletedGame, GameError, GamePhase, GameView, PLAYER_COUNT, PlayerIndex,
    PlayerView, ROUNDS_PER_GAME, Round, STANDINGS_PREVIEW_ROUND, Standing, default_player_names,
    display_name, sanitize_player_name,
};
use crate::{GameEvent, GameEventBus, GameEventHandler, RoundValidator, ScoringEngine};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, info};

/// Pause between finalizing a game and revealing the completion overlay.
pub const DEFAULT_COMPLETION_DELAY: Duration = Duration::from_millis(1500);

/// Complete scorekeeping state: the table, the active game and the history
/// log. Every change goes through [`Game::apply_at`], which either succeeds
/// fully or leaves the state untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub players: [String; PLAYER_COUNT],
    pub rounds: Vec<Round>,
    pub dealer: PlayerIndex,
    /// Most recent first.
    pub history: Vec<CompletedGame>,
    pub phase: GamePhase,
    pub standings_preview: Option<Vec<Standing>>,
    /// Winner of the last game finished in this session; seeds the next dealer.
    pub last_winner: Option<PlayerIndex>,
    pub completion_delay: Duration,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::with_history(Vec::new())
    }

    pub fn with_history(history: Vec<CompletedGame>) -> Self {
        Self {
            players: default_player_names(),
            rounds: Vec::new(),
            dealer: 0,
            history,
            phase: GamePhase::InProgress,
            standings_preview: None,
            last_winner: None,
            completion_delay: DEFAULT_COMPLETION_DELAY,
        }
    }

    pub fn with_completion_delay(mut self, delay: Duration) -> Self {
        self.completion_delay = delay;
        self
    }

    pub fn totals(&self) -> [f64; PLAYER_COUNT] {
        ScoringEngine::totals(&self.rounds)
    }

    /// Number of the round about to be entered.
    pub fn round_number(&self) -> usize {
        self.rounds.len() + 1
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, GamePhase::Complete { .. })
    }

    pub fn completion_visible(&self, now: DateTime<Utc>) -> bool {
        match &self.phase {
            GamePhase::Complete { reveal_at_ms, .. } => now.timestamp_millis() >= *reveal_at_ms,
            GamePhase::InProgress => false,
        }
    }

    pub fn display_name(&self, index: PlayerIndex) -> String {
        display_name(index, &self.players[index])
    }

    pub fn apply(&mut self, action: Action) -> Result<Vec<GameEvent>, GameError> {
        self.apply_at(action, Utc::now())
    }

    pub fn apply_at(
        &mut self,
        action: Action,
        now: DateTime<Utc>,
    ) -> Result<Vec<GameEvent>, GameError> {
        match action {
            Action::SubmitRound {
                bids,
                tricks,
                auto_round,
            } => self.submit_round(bids, tricks, auto_round, now),
            Action::DeleteRound { index } => self.delete_round(index),
            Action::RenamePlayer { index, name } => self.rename_player(index, &name),
            Action::DeleteGame { id } => self.delete_game(&id),
            Action::ResetGame => Ok(vec![GameEvent::GameReset {
                dealer: self.start_new_game(),
            }]),
            Action::NewGame => Ok(vec![GameEvent::NewGameStarted {
                dealer: self.start_new_game(),
            }]),
        }
    }

    fn submit_round(
        &mut self,
        bids: [i32; PLAYER_COUNT],
        tricks: [i32; PLAYER_COUNT],
        auto_round: bool,
        now: DateTime<Utc>,
    ) -> Result<Vec<GameEvent>, GameError> {
        if self.is_complete() {
            return Err(GameError::GameAlreadyComplete);
        }

        let validated = RoundValidator::validate(bids, tricks, auto_round)?;
        let scores = ScoringEngine::score_round(&validated.bids, &validated.tricks);
        let round = Round {
            bids: validated.bids,
            tricks: validated.tricks,
            scores,
        };

        self.rounds.push(round.clone());
        self.dealer = (self.dealer + 1) % PLAYER_COUNT;
        let round_number = self.rounds.len();
        debug!(round_number, auto_round, ?scores, "round recorded");

        let follow_up = if round_number == ROUNDS_PER_GAME {
            self.finalize(now)
        } else if round_number == STANDINGS_PREVIEW_ROUND {
            let standings = ScoringEngine::standings(&self.players, &self.totals());
            self.standings_preview = Some(standings.clone());
            vec![GameEvent::StandingsPreview { standings }]
        } else {
            Vec::new()
        };

        let winners = ScoringEngine::round_winners(&scores)
            .into_iter()
            .map(|i| self.display_name(i))
            .collect();
        let top_score = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let mut events = vec![GameEvent::RoundRecorded {
            round_number,
            round,
            auto_round: validated.auto_round,
            winners,
            top_score,
            next_dealer: self.dealer,
        }];
        events.extend(follow_up);
        Ok(events)
    }

    fn finalize(&mut self, now: DateTime<Utc>) -> Vec<GameEvent> {
        let final_scores = self.totals();
        let winner_index = ScoringEngine::leader_index(&final_scores);
        let players: [String; PLAYER_COUNT] = std::array::from_fn(|i| self.display_name(i));

        let game = CompletedGame {
            id: self.next_game_id(now),
            date: now.format("%b %-d, %Y, %-I:%M %p").to_string(),
            winner: players[winner_index].clone(),
            winner_score: final_scores[winner_index],
            players,
            final_scores,
            rounds: self.rounds.clone(),
        };

        let delay_ms = i64::try_from(self.completion_delay.as_millis()).unwrap_or(i64::MAX);
        let reveal_at_ms = now.timestamp_millis().saturating_add(delay_ms);
        self.history.insert(0, game.clone());
        self.phase = GamePhase::Complete {
            game_id: game.id.clone(),
            reveal_at_ms,
        };
        self.standings_preview = None;
        self.dealer = winner_index;
        self.last_winner = Some(winner_index);

        info!(game_id = %game.id, winner = %game.winner, "game finalized");

        vec![
            GameEvent::GameCompleted {
                game,
                winner_index,
                reveal_at_ms,
            },
            GameEvent::HistoryChanged {
                len: self.history.len(),
            },
        ]
    }

    /// Millisecond timestamp, nudged forward if a game already holds it.
    fn next_game_id(&self, now: DateTime<Utc>) -> String {
        let mut millis = now.timestamp_millis();
        while self.history.iter().any(|g| g.id == millis.to_string()) {
            millis += 1;
        }
        millis.to_string()
    }

    fn delete_round(&mut self, index: usize) -> Result<Vec<GameEvent>, GameError> {
        if index >= self.rounds.len() {
            return Err(GameError::RoundNotFound { index });
        }

        self.rounds.remove(index);
        self.standings_preview = None;
        if self.is_complete() && self.rounds.len() < ROUNDS_PER_GAME {
            self.phase = GamePhase::InProgress;
        }

        Ok(vec![GameEvent::RoundDeleted {
            index,
            remaining: self.rounds.len(),
        }])
    }

    fn rename_player(
        &mut self,
        index: PlayerIndex,
        name: &str,
    ) -> Result<Vec<GameEvent>, GameError> {
        let slot = self
            .players
            .get_mut(index)
            .ok_or(GameError::PlayerNotFound { index })?;
        *slot = sanitize_player_name(name);

        Ok(vec![GameEvent::PlayerRenamed {
            index,
            name: self.display_name(index),
        }])
    }

    fn delete_game(&mut self, game_id: &str) -> Result<Vec<GameEvent>, GameError> {
        let position = self
            .history
            .iter()
            .position(|g| g.id == game_id)
            .ok_or_else(|| GameError::GameNotFound {
                game_id: game_id.to_string(),
            })?;
        self.history.remove(position);

        Ok(vec![
            GameEvent::GameDeleted {
                game_id: game_id.to_string(),
            },
            GameEvent::HistoryChanged {
                len: self.history.len(),
            },
        ])
    }

    fn start_new_game(&mut self) -> PlayerIndex {
        self.rounds.clear();
        self.phase = GamePhase::InProgress;
        self.standings_preview = None;
        self.dealer = self.last_winner.unwrap_or(0);
        info!(dealer = self.dealer, "new game started");
        self.dealer
    }

    pub fn view(&self, now: DateTime<Utc>) -> GameView {
        let totals = self.totals();
        let leader = ScoringEngine::leader_index(&totals);
        let players = (0..PLAYER_COUNT)
            .map(|i| PlayerView {
                index: i,
                name: self.players[i].clone(),
                display_name: self.display_name(i),
                total_score: totals[i],
                is_leader: !self.rounds.is_empty() && i == leader,
                is_dealer: i == self.dealer,
            })
            .collect();

        GameView {
            players,
            rounds: self.rounds.clone(),
            round_number: self.round_number(),
            rounds_per_game: ROUNDS_PER_GAME,
            dealer: self.dealer,
            phase: self.phase.clone(),
            completion_visible: self.completion_visible(now),
            standings_preview: self.standings_preview.clone(),
            history_len: self.history.len(),
        }
    }
}

/// Apply an action to a copy of `state`, leaving the original untouched.
pub fn reduce(
    state: &Game,
    action: Action,
    now: DateTime<Utc>,
) -> Result<(Game, Vec<GameEvent>), GameError> {
    let mut next = state.clone();
    let events = next.apply_at(action, now)?;
    Ok((next, events))
}

/// Owns the game and fans every resulting event out to registered observers.
pub struct GameController {
    game: Game,
    event_bus: GameEventBus,
}

impl GameController {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            event_bus: GameEventBus::new(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.event_bus.add_handler(handler);
    }

    pub fn dispatch(&mut self, action: Action) -> Result<Vec<GameEvent>, GameError> {
        self.dispatch_at(action, Utc::now())
    }

    pub fn dispatch_at(
        &mut self,
        action: Action,
        now: DateTime<Utc>,
    ) -> Result<Vec<GameEvent>, GameError> {
        let action_name = action.name();
        let events = self.game.apply_at(action, now).inspect_err(|err| {
            debug!(action = action_name, error = %err, "action rejected");
        })?;
        for event in &events {
            self.event_bus.publish(event);
        }
        Ok(events)
    }

    pub fn view(&self, now: DateTime<Utc>) -> GameView {
        self.game.view(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn submit(bids: [i32; 4], tricks: [i32; 4]) -> Action {
        Action::SubmitRound {
            bids,
            tricks,
            auto_round: false,
        }
    }

    fn play_rounds(game: &mut Game, count: usize) {
        for i in 0..count {
            game.apply_at(submit([3, 4, 3, 3], [5, 2, 3, 3]), at(i as i64))
                .unwrap();
        }
    }

    #[test]
    fn test_submit_round_records_scores() {
        let mut game = Game::new();
        let events = game
            .apply_at(submit([3, 4, 3, 3], [5, 2, 3, 3]), at(0))
            .unwrap();

        assert_eq!(game.rounds.len(), 1);
        assert_eq!(game.rounds[0].scores[1], -4.0);
        assert_eq!(game.dealer, 1);
        assert!(matches!(
            &events[0],
            GameEvent::RoundRecorded { round_number: 1, winners, .. } if winners == &vec!["Player 1".to_string()]
        ));
    }

    #[test]
    fn test_rejected_round_leaves_state_untouched() {
        let mut game = Game::new();
        play_rounds(&mut game, 1);
        let before = game.clone();

        let err = game
            .apply_at(submit([14, 1, 1, 1], [4, 3, 3, 3]), at(1))
            .unwrap_err();
        assert_eq!(err.to_string(), "Bids must be between 1 and 13");
        assert_eq!(game, before);
    }

    #[test]
    fn test_auto_round_scores_equal_bids() {
        let mut game = Game::new();
        let events = game
            .apply_at(
                Action::SubmitRound {
                    bids: [2, 3, 2, 2],
                    tricks: [0, 0, 0, 0],
                    auto_round: true,
                },
                at(0),
            )
            .unwrap();

        assert_eq!(game.rounds[0].tricks, [2, 3, 2, 2]);
        assert_eq!(game.rounds[0].scores, [2.0, 3.0, 2.0, 2.0]);
        assert!(matches!(
            events[0],
            GameEvent::RoundRecorded { auto_round: true, .. }
        ));
    }

    #[test]
    fn test_dealer_wraps() {
        let mut game = Game::new();
        play_rounds(&mut game, 4);
        assert_eq!(game.dealer, 0);
    }

    #[test]
    fn test_standings_preview_at_round_four() {
        let mut game = Game::new();
        play_rounds(&mut game, 3);
        assert!(game.standings_preview.is_none());

        let events = game
            .apply_at(submit([3, 4, 3, 3], [5, 2, 3, 3]), at(3))
            .unwrap();
        assert!(game.standings_preview.is_some());
        assert!(matches!(events[1], GameEvent::StandingsPreview { .. }));

        game.apply_at(Action::DeleteRound { index: 0 }, at(4)).unwrap();
        assert!(game.standings_preview.is_none());
    }

    #[test]
    fn test_fifth_round_finalizes_game() {
        let mut game = Game::new();
        game.players[2] = "Chandra".to_string();
        play_rounds(&mut game, 4);

        let events = game
            .apply_at(submit([1, 1, 5, 1], [1, 1, 10, 1]), at(60))
            .unwrap();

        assert_eq!(game.history.len(), 1);
        let record = &game.history[0];
        assert_eq!(record.winner, "Chandra");
        assert_eq!(record.id, at(60).timestamp_millis().to_string());
        assert_eq!(record.rounds.len(), 5);
        assert_eq!(record.players[0], "Player 1");
        assert!((record.winner_score - 17.5).abs() < 1e-9);
        assert!(game.is_complete());
        assert!(game.standings_preview.is_none());
        assert_eq!(game.dealer, 2);
        assert_eq!(game.last_winner, Some(2));

        let kinds: Vec<_> = events.iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec!["round_recorded", "game_completed", "history_changed"]);
    }

    #[test]
    fn test_completion_reveal_is_delayed() {
        let mut game = Game::new().with_completion_delay(Duration::from_secs(2));
        play_rounds(&mut game, 5);

        assert!(game.is_complete());
        assert!(!game.completion_visible(at(4)));
        assert!(game.completion_visible(at(6)));
    }

    #[test]
    fn test_huge_completion_delay_saturates() {
        let mut game = Game::new().with_completion_delay(Duration::from_millis(u64::MAX));
        play_rounds(&mut game, 5);

        assert!(game.is_complete());
        match &game.phase {
            GamePhase::Complete { reveal_at_ms, .. } => assert_eq!(*reveal_at_ms, i64::MAX),
            GamePhase::InProgress => panic!("game should be complete"),
        }
        assert!(!game.completion_visible(at(1_000_000)));
    }

    #[test]
    fn test_submit_after_completion_is_rejected() {
        let mut game = Game::new();
        play_rounds(&mut game, 5);

        let err = game
            .apply_at(submit([3, 4, 3, 3], [5, 2, 3, 3]), at(10))
            .unwrap_err();
        assert_eq!(err, GameError::GameAlreadyComplete);
    }

    #[test]
    fn test_delete_round_after_completion_reopens_game() {
        let mut game = Game::new();
        play_rounds(&mut game, 5);

        game.apply_at(Action::DeleteRound { index: 4 }, at(10)).unwrap();
        assert!(!game.is_complete());
        assert_eq!(game.history.len(), 1);
    }

    #[test]
    fn test_delete_round_out_of_range() {
        let mut game = Game::new();
        let err = game
            .apply_at(Action::DeleteRound { index: 0 }, at(0))
            .unwrap_err();
        assert_eq!(err, GameError::RoundNotFound { index: 0 });
    }

    #[test]
    fn test_new_game_seeds_dealer_from_winner() {
        let mut game = Game::new();
        game.apply_at(Action::NewGame, at(0)).unwrap();
        assert_eq!(game.dealer, 0);

        play_rounds(&mut game, 2);
        game.apply_at(Action::ResetGame, at(3)).unwrap();
        assert_eq!(game.dealer, 0);
        assert!(game.rounds.is_empty());

        for i in 0..5 {
            game.apply_at(submit([1, 3, 1, 1], [1, 10, 1, 1]), at(4 + i))
                .unwrap();
        }
        assert_eq!(game.last_winner, Some(1));

        game.apply_at(Action::NewGame, at(20)).unwrap();
        assert_eq!(game.dealer, 1);
        assert!(!game.is_complete());
        assert_eq!(game.history.len(), 1);
    }

    #[test]
    fn test_rename_player() {
        let mut game = Game::new();
        game.apply_at(
            Action::RenamePlayer {
                index: 1,
                name: "  Bikram Shrestha  ".to_string(),
            },
            at(0),
        )
        .unwrap();
        assert_eq!(game.players[1], "Bikram Shres");

        let err = game
            .apply_at(
                Action::RenamePlayer {
                    index: 4,
                    name: "Nobody".to_string(),
                },
                at(0),
            )
            .unwrap_err();
        assert_eq!(err, GameError::PlayerNotFound { index: 4 });
    }

    #[test]
    fn test_rename_does_not_touch_history() {
        let mut game = Game::new();
        play_rounds(&mut game, 5);
        game.apply_at(
            Action::RenamePlayer {
                index: 0,
                name: "Asha".to_string(),
            },
            at(10),
        )
        .unwrap();
        assert_eq!(game.history[0].players[0], "Player 1");
    }

    #[test]
    fn test_delete_game() {
        let mut game = Game::new();
        play_rounds(&mut game, 5);
        let id = game.history[0].id.clone();

        let events = game
            .apply_at(Action::DeleteGame { id: id.clone() }, at(10))
            .unwrap();
        assert!(game.history.is_empty());
        assert!(matches!(events[1], GameEvent::HistoryChanged { len: 0 }));

        let err = game
            .apply_at(Action::DeleteGame { id }, at(11))
            .unwrap_err();
        assert!(matches!(err, GameError::GameNotFound { .. }));
    }

    #[test]
    fn test_game_ids_stay_unique() {
        let mut game = Game::new();
        play_rounds(&mut game, 5);
        game.apply_at(Action::NewGame, at(0)).unwrap();
        play_rounds(&mut game, 5);

        assert_eq!(game.history.len(), 2);
        assert_ne!(game.history[0].id, game.history[1].id);
    }

    #[test]
    fn test_reduce_is_pure() {
        let game = Game::new();
        let (next, events) = reduce(&game, submit([3, 4, 3, 3], [5, 2, 3, 3]), at(0)).unwrap();
        assert!(game.rounds.is_empty());
        assert_eq!(next.rounds.len(), 1);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_view_flags() {
        let mut game = Game::new();
        let view = game.view(at(0));
        assert!(view.players.iter().all(|p| !p.is_leader));
        assert!(view.players[0].is_dealer);
        assert_eq!(view.round_number, 1);

        play_rounds(&mut game, 1);
        let view = game.view(at(1));
        assert!(view.players[0].is_leader);
        assert!(view.players[1].is_dealer);
        assert_eq!(view.round_number, 2);
    }
}
