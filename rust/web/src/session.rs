use rochambeau_engine::errors::GameError;
use rochambeau_engine::report::Screen;
use rochambeau_engine::round::RoundController;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};
use thiserror::Error;
use uuid::Uuid;

pub type GameId = String;

const DEFAULT_GAME_TTL: Duration = Duration::from_secs(30 * 60);

/// One browser tab's game: its round controller and the screen last shown.
#[derive(Debug)]
pub struct GameSession {
    id: GameId,
    seed: u64,
    state: Mutex<SessionState>,
    last_active: Mutex<Instant>,
}

#[derive(Debug)]
struct SessionState {
    controller: RoundController,
    screen: Screen,
}

impl GameSession {
    fn new(id: GameId, mut controller: RoundController) -> Self {
        let seed = controller.seed();
        // the page's load hook: a fresh game always starts from the ready screen
        let screen = controller.reset_round();
        Self {
            id,
            seed,
            state: Mutex::new(SessionState { controller, screen }),
            last_active: Mutex::new(Instant::now()),
        }
    }

    pub fn id(&self) -> &GameId {
        &self.id
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn screen(&self) -> Result<Screen, SessionError> {
        let guard = self
            .state
            .lock()
            .map_err(|_| SessionError::StoragePoisoned)?;
        Ok(guard.screen)
    }

    fn play_round(&self, token: &str) -> Result<Screen, SessionError> {
        let mut guard = self
            .state
            .lock()
            .map_err(|_| SessionError::StoragePoisoned)?;
        let report = guard.controller.play_round(token)?;
        let screen = guard.controller.screen_for(report);
        guard.screen = screen;
        Ok(screen)
    }

    fn reset(&self) -> Result<Screen, SessionError> {
        let mut guard = self
            .state
            .lock()
            .map_err(|_| SessionError::StoragePoisoned)?;
        let screen = guard.controller.reset_round();
        guard.screen = screen;
        Ok(screen)
    }

    fn touch(&self) {
        if let Ok(mut guard) = self.last_active.lock() {
            *guard = Instant::now();
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        match self.last_active.lock() {
            Ok(last) => last.elapsed() >= ttl,
            Err(_) => false,
        }
    }

    #[cfg(test)]
    fn force_last_active(&self, at: Instant) {
        if let Ok(mut guard) = self.last_active.lock() {
            *guard = at;
        }
    }
}

/// Owns every live game, keyed by id. Each game is locked independently.
#[derive(Debug)]
pub struct SessionManager {
    games: RwLock<HashMap<GameId, Arc<GameSession>>>,
    game_ttl: Duration,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManager {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_GAME_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            games: RwLock::new(HashMap::new()),
            game_ttl: ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.game_ttl
    }

    /// Starts a game at 0 - 0 and returns its id with the ready screen.
    pub fn create_game(&self, seed: Option<u64>) -> Result<(GameId, Screen), SessionError> {
        let id = Uuid::new_v4().to_string();
        let controller = match seed {
            Some(seed) => RoundController::with_seed(seed),
            None => RoundController::from_entropy(),
        };
        let session = Arc::new(GameSession::new(id.clone(), controller));
        let screen = session.screen()?;

        {
            let mut guard = self
                .games
                .write()
                .map_err(|_| SessionError::StoragePoisoned)?;
            guard.insert(id.clone(), Arc::clone(&session));
        }

        tracing::info!(game_id = %id, seed = session.seed(), "game created");
        Ok((id, screen))
    }

    pub fn get_game(&self, id: &GameId) -> Result<Arc<GameSession>, SessionError> {
        let guard = self
            .games
            .read()
            .map_err(|_| SessionError::StoragePoisoned)?;
        guard
            .get(id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(id.clone()))
    }

    pub fn screen(&self, id: &GameId) -> Result<Screen, SessionError> {
        let session = self.live_game(id)?;
        session.screen()
    }

    /// Plays one round. An invalid token leaves the game exactly as it was.
    pub fn play_round(&self, id: &GameId, token: &str) -> Result<Screen, SessionError> {
        let session = self.live_game(id)?;
        let screen = session.play_round(token).inspect_err(|err| {
            tracing::debug!(game_id = %id, error = %err, "round rejected");
        })?;

        if let Screen::Played { report, score } = &screen {
            tracing::debug!(
                game_id = %id,
                round = report.round,
                player = %report.player_move.as_str(),
                computer = %report.computer_move.as_str(),
                winner = %report.outcome,
                player_score = score.player,
                computer_score = score.computer,
                "round played"
            );
        }
        Ok(screen)
    }

    pub fn reset(&self, id: &GameId) -> Result<Screen, SessionError> {
        let session = self.live_game(id)?;
        let screen = session.reset()?;
        tracing::debug!(game_id = %id, "game reset");
        Ok(screen)
    }

    pub fn delete_game(&self, id: &GameId) -> Result<(), SessionError> {
        match self.remove_game(id)? {
            Some(_) => {
                tracing::info!(game_id = %id, "game deleted");
                Ok(())
            }
            None => Err(SessionError::NotFound(id.clone())),
        }
    }

    pub fn cleanup_expired_games(&self) -> usize {
        let mut expired = Vec::new();
        {
            let mut guard = match self.games.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.retain(|id, session| {
                if session.is_expired(self.game_ttl) {
                    expired.push(id.clone());
                    false
                } else {
                    true
                }
            });
        }

        for id in &expired {
            tracing::info!(game_id = %id, "game expired");
        }
        expired.len()
    }

    pub fn active_games(&self) -> Vec<GameId> {
        match self.games.read() {
            Ok(guard) => guard.keys().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Looks up a game, dropping it if it idled past the TTL.
    fn live_game(&self, id: &GameId) -> Result<Arc<GameSession>, SessionError> {
        let session = self.get_game(id)?;
        if session.is_expired(self.game_ttl) {
            self.remove_game(id)?;
            tracing::info!(game_id = %id, "game expired");
            return Err(SessionError::Expired(id.clone()));
        }
        session.touch();
        Ok(session)
    }

    fn remove_game(&self, id: &GameId) -> Result<Option<Arc<GameSession>>, SessionError> {
        match self.games.write() {
            Ok(mut guard) => Ok(guard.remove(id)),
            Err(_) => Err(SessionError::StoragePoisoned),
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Game not found: {0}")]
    NotFound(GameId),
    #[error("Game expired: {0}")]
    Expired(GameId),
    #[error(transparent)]
    InvalidMove(#[from] GameError),
    #[error("Game storage poisoned")]
    StoragePoisoned,
}

impl crate::errors::IntoErrorResponse for SessionError {
    fn status_code(&self) -> warp::http::StatusCode {
        use warp::http::StatusCode;
        match self {
            SessionError::NotFound(_) => StatusCode::NOT_FOUND,
            SessionError::Expired(_) => StatusCode::GONE,
            SessionError::InvalidMove(_) => StatusCode::BAD_REQUEST,
            SessionError::StoragePoisoned => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SessionError::NotFound(_) => "game_not_found",
            SessionError::Expired(_) => "game_expired",
            SessionError::InvalidMove(_) => "invalid_move",
            SessionError::StoragePoisoned => "game_storage_error",
        }
    }

    fn error_message(&self) -> String {
        self.to_string()
    }

    fn error_details(&self) -> Option<serde_json::Value> {
        match self {
            SessionError::NotFound(id) => Some(serde_json::json!({
                "game_id": id
            })),
            SessionError::Expired(id) => Some(serde_json::json!({
                "game_id": id,
                "reason": "Game expired due to inactivity"
            })),
            SessionError::InvalidMove(GameError::InvalidMoveToken(token)) => {
                Some(serde_json::json!({
                    "token": token,
                    "expected": ["rock", "paper", "scissors"]
                }))
            }
            SessionError::StoragePoisoned => None,
        }
    }

    fn severity(&self) -> crate::errors::ErrorSeverity {
        use crate::errors::ErrorSeverity;
        match self {
            SessionError::StoragePoisoned => ErrorSeverity::Critical,
            _ => ErrorSeverity::Client,
        }
    }
}
