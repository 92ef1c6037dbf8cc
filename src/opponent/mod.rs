//! The automated side: the remote move service client and the background
//! worker that keeps its network round trips off the UI thread.

mod client;
mod worker;

pub use client::{encode_moves, parse_suggestion, HttpOpponent, Opponent};
pub use worker::{FetchResult, OpponentWorker};
