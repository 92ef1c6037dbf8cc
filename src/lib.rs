//! # Drop Token
//!
//! An N x N Connect Four variant: tokens stack in columns and a player wins
//! by filling a whole row, column or main diagonal. One side is played by a
//! remote move-suggestion service reached over HTTP.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, win tracking, state machine
//! - [`opponent`] — Remote opponent client and background fetch worker
//! - [`session`] — Human-versus-service orchestration on top of the engine
//! - [`ui`] — Terminal UI
//! - [`config`] — TOML configuration loading and validation
//! - [`logging`] — `tracing` subscriber setup
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod opponent;
pub mod session;
pub mod ui;
