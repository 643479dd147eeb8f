use crate::errors::{ErrorResponse, IntoErrorResponse};
use crate::session::{GameId, SessionManager};
use rochambeau_engine::report::{RoundReport, Screen};
use rochambeau_engine::score::Score;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::reply::{self, Response};
use warp::Reply;

#[derive(Debug, Default, Deserialize)]
pub struct CreateGameRequest {
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct PlayRoundRequest {
    #[serde(rename = "move")]
    pub player_move: String,
}

/// JSON rendering of a [`Screen`]: the state tag, the score, the message the
/// page shows, and the round report once a round has been played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenView {
    pub state: &'static str,
    pub score: Score,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<RoundReport>,
}

impl From<&Screen> for ScreenView {
    fn from(screen: &Screen) -> Self {
        let state = match screen {
            Screen::Ready { .. } => "ready",
            Screen::Played { .. } => "played",
        };
        Self {
            state,
            score: screen.score(),
            message: screen.message(),
            report: screen.report().copied(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GameResponse {
    pub game_id: GameId,
    pub screen: ScreenView,
}

impl GameResponse {
    fn new(game_id: GameId, screen: &Screen) -> Self {
        Self {
            game_id,
            screen: ScreenView::from(screen),
        }
    }
}

/// Starts a new game.
///
/// # HTTP Method and Path
/// - **Method**: POST
/// - **Path**: `/api/games`
///
/// # Request Format
/// Optional JSON body; an empty body starts an entropy-seeded game:
/// ```json
/// { "seed": 42 }
/// ```
///
/// # Response Format
/// - **Success (201 Created)**: `{ "game_id": "...", "screen": { "state": "ready", ... } }`
/// - **Error (400 Bad Request)**: `invalid_request` when the body is not valid JSON
///
/// The page calls this once when it loads, which is the reset hook of the game.
pub async fn create_game(sessions: Arc<SessionManager>, body: Bytes) -> Response {
    let request: CreateGameRequest = match parse_optional_body(&body) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match sessions.create_game(request.seed) {
        Ok((game_id, screen)) => {
            json_response(StatusCode::CREATED, &GameResponse::new(game_id, &screen))
        }
        Err(err) => err.into_http_response(),
    }
}

/// Current screen of a game (`GET /api/games/{id}`).
pub async fn get_game(sessions: Arc<SessionManager>, game_id: GameId) -> Response {
    match sessions.screen(&game_id) {
        Ok(screen) => json_response(StatusCode::OK, &GameResponse::new(game_id, &screen)),
        Err(err) => err.into_http_response(),
    }
}

/// Plays one round against the computer.
///
/// # HTTP Method and Path
/// - **Method**: POST
/// - **Path**: `/api/games/{id}/rounds`
///
/// # Request Format
/// ```json
/// { "move": "rock" }
/// ```
/// The token is matched case-insensitively.
///
/// # Response Format
/// - **Success (200 OK)**: the `played` screen with the round report and updated score
/// - **Error (400 Bad Request)**: `invalid_move` for an unknown token (score unchanged),
///   `invalid_request` for a malformed body
/// - **Error (404 Not Found)**: `game_not_found`
/// - **Error (410 Gone)**: `game_expired`
pub async fn play_round(sessions: Arc<SessionManager>, game_id: GameId, body: Bytes) -> Response {
    let request: PlayRoundRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => return invalid_request(&err),
    };

    match sessions.play_round(&game_id, &request.player_move) {
        Ok(screen) => json_response(StatusCode::OK, &GameResponse::new(game_id, &screen)),
        Err(err) => err.into_http_response(),
    }
}

/// Zeroes the score and returns the ready screen (`POST /api/games/{id}/reset`).
pub async fn reset_game(sessions: Arc<SessionManager>, game_id: GameId) -> Response {
    match sessions.reset(&game_id) {
        Ok(screen) => json_response(StatusCode::OK, &GameResponse::new(game_id, &screen)),
        Err(err) => err.into_http_response(),
    }
}

pub async fn delete_game(sessions: Arc<SessionManager>, game_id: GameId) -> Response {
    match sessions.delete_game(&game_id) {
        Ok(()) => reply::with_status(reply::reply(), StatusCode::NO_CONTENT).into_response(),
        Err(err) => err.into_http_response(),
    }
}

fn parse_optional_body<T>(body: &[u8]) -> Result<T, Response>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|err| invalid_request(&err))
}

fn invalid_request(err: &serde_json::Error) -> Response {
    tracing::info!(error = %err, "rejected malformed request body");
    ErrorResponse::new("invalid_request", format!("Malformed request body: {err}"))
        .into_response(StatusCode::BAD_REQUEST)
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    reply::with_status(reply::json(body), status).into_response()
}
