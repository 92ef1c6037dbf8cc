use std::path::PathBuf;

use crate::game::Phase;

/// Errors from applying a move or changing game phase.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("column {column} is outside the board (size {size})")]
    ColumnOutOfRange { column: usize, size: usize },

    #[error("board size must be at least 1, got {size}")]
    InvalidSize { size: usize },

    /// The caller asked for something the current phase does not allow.
    #[error("operation not allowed while game is {phase}")]
    InvalidTransition { phase: Phase },
}

impl MoveError {
    /// True for a rejected column, as opposed to a contract violation.
    pub fn is_illegal_move(&self) -> bool {
        matches!(
            self,
            MoveError::ColumnFull { .. } | MoveError::ColumnOutOfRange { .. }
        )
    }
}

/// Errors from asking the remote service for a move.
#[derive(Debug, thiserror::Error)]
pub enum OpponentError {
    #[error("invalid opponent URL '{url}'")]
    InvalidUrl { url: String },

    #[error("request to opponent failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("opponent responded with status {0}")]
    Status(reqwest::StatusCode),

    #[error("opponent response is not a JSON array of columns: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("opponent returned an empty move list")]
    EmptyResponse,

    #[error("opponent suggested column {column}, which is not a legal move")]
    IllegalSuggestion { column: usize },

    #[error("opponent worker is no longer running")]
    Disconnected,
}

/// Errors surfaced by a play session to its front end.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("waiting for the opponent to move")]
    AwaitingOpponent,

    #[error(transparent)]
    Move(#[from] MoveError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
