pub mod game;
pub mod health;

pub use game::{
    create_game, delete_game, get_game, play_round, reset_game, CreateGameRequest, GameResponse,
    PlayRoundRequest, ScreenView,
};
pub use health::health;
