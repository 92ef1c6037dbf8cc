use tracing::{debug, info};

use super::{Board, Cell, GameState, Line, MoveOutcome, Phase, Player, TokenColor, WinTracker};
use crate::error::MoveError;

/// Earliest move number on which a line can be completed: the first player's
/// `size`-th token.
pub const fn earliest_win_move(size: usize) -> usize {
    2 * size - 1
}

/// Authoritative game: board, win counts and turn state, mutated together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    board: Board,
    tracker: WinTracker,
    state: GameState,
}

impl GameEngine {
    /// Start a game on a `size` x `size` board. Fails only for size 0.
    pub fn new(size: usize) -> Result<Self, MoveError> {
        Ok(GameEngine {
            board: Board::new(size)?,
            tracker: WinTracker::new(size),
            state: GameState::initial(),
        })
    }

    fn fresh(size: usize) -> Self {
        GameEngine {
            board: Board::empty(size),
            tracker: WinTracker::new(size),
            state: GameState::initial(),
        }
    }

    /// Rebuild a game from its move log. The remote side is recorded as
    /// `Second`. Stops with an error at the first move that cannot be applied.
    pub fn replay(size: usize, history: &[usize]) -> Result<Self, MoveError> {
        let mut engine = GameEngine::new(size)?;
        engine.choose_first_player(false)?;
        for &column in history {
            engine.apply_move(column)?;
        }
        Ok(engine)
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tracker(&self) -> &WinTracker {
        &self.tracker
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn turn(&self) -> Player {
        self.state.turn
    }

    pub fn history(&self) -> &[usize] {
        &self.state.history
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.board.get(row, col)
    }

    pub fn color(&self, player: Player) -> TokenColor {
        self.state.color(player)
    }

    /// True while the game waits for the human to pick a side.
    pub fn awaiting_first_player_choice(&self) -> bool {
        self.state.phase == Phase::AwaitingFirstPlayerChoice
    }

    /// True when the game is live and the remote side is to move.
    pub fn is_automated_turn(&self) -> bool {
        self.state.phase == Phase::InProgress && self.state.automated == Some(self.state.turn)
    }

    /// The line that decided the game, for highlighting.
    pub fn winning_line(&self) -> Option<Line> {
        self.state
            .winner()
            .and_then(|player| self.tracker.completed_line(player))
    }

    /// Leave the first-player choice. `engine_first` hands the opening move
    /// to the remote side.
    pub fn choose_first_player(&mut self, engine_first: bool) -> Result<(), MoveError> {
        if self.state.phase != Phase::AwaitingFirstPlayerChoice {
            return Err(MoveError::InvalidTransition {
                phase: self.state.phase,
            });
        }
        let automated = if engine_first {
            Player::First
        } else {
            Player::Second
        };
        self.state.turn = Player::First;
        self.state.history.clear();
        self.state.automated = Some(automated);
        self.state.phase = Phase::InProgress;
        info!(automated = %automated, "game started");
        Ok(())
    }

    /// Drop a token for the player to move.
    ///
    /// An illegal column leaves the game untouched apart from the
    /// [`GameState::last_move_illegal`] flag.
    pub fn apply_move(&mut self, column: usize) -> Result<MoveOutcome, MoveError> {
        if self.state.phase != Phase::InProgress {
            return Err(MoveError::InvalidTransition {
                phase: self.state.phase,
            });
        }

        let player = self.state.turn;
        let row = match self.board.drop(column, player) {
            Ok(row) => row,
            Err(err) => {
                debug!(column, %player, error = %err, "illegal move rejected");
                self.state.last_move_illegal = true;
                return Err(err);
            }
        };
        self.state.history.push(column);
        let completed = self.tracker.record(player, row, column);
        self.state.last_move_illegal = false;

        let size = self.size();
        let played = self.state.history.len();
        if played >= earliest_win_move(size) && completed {
            self.state.phase = Phase::Won(player);
            info!(%player, moves = played, "game won");
        } else if played == size * size {
            self.state.phase = Phase::Draw;
            info!(moves = played, "game drawn");
        } else {
            self.state.turn = player.other();
        }

        debug!(column, row, %player, moves = played, "move applied");
        Ok(MoveOutcome {
            player,
            column,
            row,
            phase: self.state.phase,
        })
    }

    /// Discard the current game and return to the first-player choice.
    pub fn restart(&mut self) {
        *self = GameEngine::fresh(self.size());
        info!("game restarted");
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::fresh(4)
    }
}
