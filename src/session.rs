//! One human-versus-service game: routes human input into the engine and
//! fetches the automated side's moves in the background.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::error::{OpponentError, SessionError};
use crate::game::{GameEngine, MoveOutcome};
use crate::opponent::{FetchResult, Opponent, OpponentWorker};

/// Something that happened while the front end was not looking.
#[derive(Debug)]
pub enum SessionEvent {
    OpponentMoved(MoveOutcome),
    OpponentFailed(OpponentError),
}

pub struct Session {
    engine: GameEngine,
    worker: OpponentWorker,
    /// Bumped on restart; results tagged with an older value are dropped.
    generation: u64,
    pending: bool,
}

impl Session {
    pub fn new(board_size: usize, opponent: Arc<dyn Opponent>) -> Result<Self, SessionError> {
        Ok(Session {
            engine: GameEngine::new(board_size)?,
            worker: OpponentWorker::new(opponent),
            generation: 0,
            pending: false,
        })
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn opponent_name(&self) -> &str {
        self.worker.opponent_name()
    }

    /// True while an opponent request is in flight.
    pub fn is_waiting(&self) -> bool {
        self.pending
    }

    /// True when the automated side should move but nothing is in flight,
    /// i.e. the last request failed.
    pub fn opponent_stalled(&self) -> bool {
        !self.pending && self.engine.is_automated_turn()
    }

    pub fn choose_first_player(&mut self, engine_first: bool) -> Result<(), SessionError> {
        self.engine.choose_first_player(engine_first)?;
        self.request_if_due();
        Ok(())
    }

    /// Play a column for the human side.
    pub fn human_move(&mut self, column: usize) -> Result<MoveOutcome, SessionError> {
        if self.pending || self.engine.is_automated_turn() {
            return Err(SessionError::AwaitingOpponent);
        }
        let outcome = self.engine.apply_move(column)?;
        self.request_if_due();
        Ok(outcome)
    }

    /// Ask the opponent again after a failed request. Returns whether a
    /// request was sent.
    pub fn retry_opponent(&mut self) -> bool {
        if self.opponent_stalled() {
            self.dispatch();
            true
        } else {
            false
        }
    }

    /// Start over. Any request still in flight belongs to the old game and
    /// its answer will be ignored.
    pub fn restart(&mut self) {
        self.generation += 1;
        self.pending = false;
        self.engine.restart();
    }

    /// Apply every opponent answer that has arrived.
    pub fn poll(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Some(fetched) = self.worker.try_recv() {
            events.extend(self.handle(fetched));
        }
        events
    }

    /// Block until the in-flight request is answered or `timeout` passes.
    pub fn wait_for_opponent(&mut self, timeout: Duration) -> Option<SessionEvent> {
        let deadline = Instant::now() + timeout;
        while self.pending {
            let remaining = deadline.checked_duration_since(Instant::now())?;
            let fetched = self.worker.recv_timeout(remaining)?;
            if let Some(event) = self.handle(fetched) {
                return Some(event);
            }
        }
        None
    }

    fn request_if_due(&mut self) {
        if self.engine.is_automated_turn() && !self.pending {
            self.dispatch();
        }
    }

    fn dispatch(&mut self) {
        self.pending = true;
        self.worker
            .dispatch(self.generation, self.engine.history().to_vec());
    }

    fn handle(&mut self, fetched: FetchResult) -> Option<SessionEvent> {
        if fetched.generation != self.generation || fetched.history != self.engine.history() {
            debug!(
                generation = fetched.generation,
                current = self.generation,
                "discarding stale opponent answer"
            );
            return None;
        }
        self.pending = false;

        let column = match fetched.result {
            Ok(column) => column,
            Err(err) => {
                warn!(error = %err, "opponent request failed");
                return Some(SessionEvent::OpponentFailed(err));
            }
        };

        // A bad suggestion is the service's fault, not an illegal human move,
        // so it must not reach apply_move and set the illegal-move flag.
        if self.engine.board().check_drop(column).is_err() {
            warn!(column, "opponent suggested an illegal move");
            return Some(SessionEvent::OpponentFailed(
                OpponentError::IllegalSuggestion { column },
            ));
        }

        match self.engine.apply_move(column) {
            Ok(outcome) => {
                info!(column, row = outcome.row, "opponent moved");
                self.request_if_due();
                Some(SessionEvent::OpponentMoved(outcome))
            }
            Err(err) => {
                warn!(column, error = %err, "opponent move rejected");
                Some(SessionEvent::OpponentFailed(
                    OpponentError::IllegalSuggestion { column },
                ))
            }
        }
    }
}
