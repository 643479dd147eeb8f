//! Browser front end for the rock-paper-scissors game.
//!
//! Serves the game page from a static directory and a small JSON API that
//! drives one [`rochambeau_engine::round::RoundController`] per game.
pub mod errors;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod server;
pub mod session;
pub mod static_handler;

pub use errors::{ErrorResponse, ErrorSeverity, IntoErrorResponse};
pub use logging::{init_logging, init_test_logging, LogEntry, TestLogSubscriber};
pub use middleware::with_request_logging;
pub use server::{routes, AppContext, ServerConfig, ServerError, ServerHandle, WebServer};
pub use session::{GameId, GameSession, SessionError, SessionManager};
pub use static_handler::{StaticError, StaticHandler};
