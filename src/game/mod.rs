//! Core Connect Four rules: the board with its gravity drop, the two players,
//! and the session state machine that runs turns and detects the outcome.

mod board;
mod player;
mod session;

pub use crate::error::MoveError;
pub use board::{Board, Cell, DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_DIMENSION};
pub use player::{Player, PlayerId};
pub use session::{GameSession, GameStatus, PlacementResult, Position, WIN_LENGTH};
