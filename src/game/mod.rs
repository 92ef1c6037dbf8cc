//! Core Drop Token game logic: column-stack board, incremental win tracking,
//! and the game state machine.

mod board;
mod engine;
mod player;
mod state;
mod win_tracker;

pub use crate::error::MoveError;
pub use board::{Board, Cell};
pub use engine::{earliest_win_move, GameEngine};
pub use player::Player;
pub use state::{GameState, MoveOutcome, Phase, TokenColor};
pub use win_tracker::{Line, WinTracker};
