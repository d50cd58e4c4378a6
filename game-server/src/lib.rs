use serde::Serialize;
use std::sync::Arc;
use warp::Filter;
use warp::http::StatusCode;

use crate::scorekeeper::{Scorekeeper, ScorekeeperError};
use game_core::RoundValidator;
use game_types::{
    Action, BidsPreviewRequest, ErrorResponse, GameError, RenamePlayerRequest, SubmitRoundRequest,
};

pub mod config;
pub mod scorekeeper;

const MAX_BODY_BYTES: u64 = 16 * 1024;

pub fn create_routes(
    scorekeeper: Arc<Scorekeeper>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let scorekeeper_filter = warp::any().map({
        let scorekeeper = scorekeeper.clone();
        move || scorekeeper.clone()
    });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    let game_state = warp::path!("api" / "game")
        .and(warp::get())
        .and(scorekeeper_filter.clone())
        .and_then(handle_game_state_request);

    let submit_round = warp::path!("api" / "rounds")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json::<SubmitRoundRequest>())
        .and(scorekeeper_filter.clone())
        .and_then(|request: SubmitRoundRequest, scorekeeper: Arc<Scorekeeper>| {
            handle_action(Action::from(request), scorekeeper)
        });

    // Stateless: tells the entry form whether to offer the auto-round toggle.
    let preview_bids = warp::path!("api" / "rounds" / "preview")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json::<BidsPreviewRequest>())
        .map(|request: BidsPreviewRequest| {
            json_reply(&RoundValidator::preview(&request.bids), StatusCode::OK)
        });

    let delete_round = warp::path!("api" / "rounds" / usize)
        .and(warp::delete())
        .and(scorekeeper_filter.clone())
        .and_then(|index: usize, scorekeeper: Arc<Scorekeeper>| {
            handle_action(Action::DeleteRound { index }, scorekeeper)
        });

    let rename_player = warp::path!("api" / "players" / usize)
        .and(warp::put())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json::<RenamePlayerRequest>())
        .and(scorekeeper_filter.clone())
        .and_then(|index: usize, request: RenamePlayerRequest, scorekeeper: Arc<Scorekeeper>| {
            handle_action(
                Action::RenamePlayer {
                    index,
                    name: request.name,
                },
                scorekeeper,
            )
        });

    let new_game = warp::path!("api" / "game" / "new")
        .and(warp::post())
        .and(scorekeeper_filter.clone())
        .and_then(|scorekeeper: Arc<Scorekeeper>| handle_action(Action::NewGame, scorekeeper));

    let reset_game = warp::path!("api" / "game" / "reset")
        .and(warp::post())
        .and(scorekeeper_filter.clone())
        .and_then(|scorekeeper: Arc<Scorekeeper>| handle_action(Action::ResetGame, scorekeeper));

    let history = warp::path!("api" / "history")
        .and(warp::get())
        .and(scorekeeper_filter.clone())
        .and_then(handle_history_request);

    let delete_game = warp::path!("api" / "history" / String)
        .and(warp::delete())
        .and(scorekeeper_filter.clone())
        .and_then(handle_delete_game_request);

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST", "PUT", "DELETE"]);

    health
        .or(game_state)
        .or(submit_round)
        .or(preview_bids)
        .or(delete_round)
        .or(rename_player)
        .or(new_game)
        .or(reset_game)
        .or(history)
        .or(delete_game)
        .with(cors)
        .with(warp::log("callbreak"))
}

fn json_reply<T: Serialize>(
    body: &T,
    status: StatusCode,
) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(warp::reply::json(body), status)
}

fn error_reply(err: &ScorekeeperError) -> warp::reply::WithStatus<warp::reply::Json> {
    let status = match err {
        ScorekeeperError::Game(GameError::InvalidRound(_)) => StatusCode::BAD_REQUEST,
        ScorekeeperError::Game(
            GameError::RoundNotFound { .. }
            | GameError::PlayerNotFound { .. }
            | GameError::GameNotFound { .. },
        ) => StatusCode::NOT_FOUND,
        ScorekeeperError::Game(GameError::GameAlreadyComplete) => StatusCode::CONFLICT,
        ScorekeeperError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let message = match err {
        ScorekeeperError::Persistence(_) => "Failed to save game history".to_string(),
        other => other.to_string(),
    };

    json_reply(&ErrorResponse { error: message }, status)
}

async fn handle_game_state_request(
    scorekeeper: Arc<Scorekeeper>,
) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(json_reply(&scorekeeper.view().await, StatusCode::OK))
}

async fn handle_action(
    action: Action,
    scorekeeper: Arc<Scorekeeper>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match scorekeeper.dispatch(action).await {
        Ok(view) => Ok(json_reply(&view, StatusCode::OK)),
        Err(err) => Ok(error_reply(&err)),
    }
}

async fn handle_history_request(
    scorekeeper: Arc<Scorekeeper>,
) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(json_reply(&scorekeeper.history().await, StatusCode::OK))
}

async fn handle_delete_game_request(
    id: String,
    scorekeeper: Arc<Scorekeeper>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match scorekeeper.dispatch(Action::DeleteGame { id }).await {
        Ok(_) => Ok(json_reply(&scorekeeper.history().await, StatusCode::OK)),
        Err(err) => Ok(error_reply(&err)),
    }
}
