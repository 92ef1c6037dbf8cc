use super::Player;

/// Token colour. The human always plays Red, whichever side moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenColor {
    Red,
    Blue,
}

impl TokenColor {
    pub fn name(self) -> &'static str {
        match self {
            TokenColor::Red => "Red",
            TokenColor::Blue => "Blue",
        }
    }
}

impl std::fmt::Display for TokenColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a game is in its lifecycle. `Won` and `Draw` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    AwaitingFirstPlayerChoice,
    InProgress,
    Won(Player),
    Draw,
}

impl Phase {
    /// Check if game is over
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Won(_) | Phase::Draw)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::AwaitingFirstPlayerChoice => f.write_str("awaiting first-player choice"),
            Phase::InProgress => f.write_str("in progress"),
            Phase::Won(player) => write!(f, "{player} won"),
            Phase::Draw => f.write_str("draw"),
        }
    }
}

/// Turn bookkeeping for one game. Mutated only by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(super) turn: Player,
    pub(super) history: Vec<usize>,
    pub(super) phase: Phase,
    pub(super) automated: Option<Player>,
    pub(super) last_move_illegal: bool,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            turn: Player::First,
            history: Vec::new(),
            phase: Phase::AwaitingFirstPlayerChoice,
            automated: None,
            last_move_illegal: false,
        }
    }

    /// Player to move
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Columns played so far, in order. This is the canonical game log.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Side played by the remote opponent, once chosen.
    pub fn automated(&self) -> Option<Player> {
        self.automated
    }

    /// Colour of `player`'s tokens: Blue for the automated side, Red for the
    /// human. Before the choice is made `First` shows as Red.
    pub fn color(&self, player: Player) -> TokenColor {
        let automated = self.automated.unwrap_or(Player::Second);
        if player == automated {
            TokenColor::Blue
        } else {
            TokenColor::Red
        }
    }

    /// Whether the most recent attempted move was rejected.
    pub fn last_move_illegal(&self) -> bool {
        self.last_move_illegal
    }

    /// Winner, if the game has been won
    pub fn winner(&self) -> Option<Player> {
        match self.phase {
            Phase::Won(player) => Some(player),
            _ => None,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Result of a successfully applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub player: Player,
    pub column: usize,
    pub row: usize,
    /// Phase after the move.
    pub phase: Phase,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = GameState::initial();
        assert_eq!(state.turn(), Player::First);
        assert!(state.history().is_empty());
        assert_eq!(state.phase(), Phase::AwaitingFirstPlayerChoice);
        assert_eq!(state.automated(), None);
        assert!(!state.last_move_illegal());
    }

    #[test]
    fn test_terminal_phases() {
        assert!(Phase::Won(Player::Second).is_terminal());
        assert!(Phase::Draw.is_terminal());
        assert!(!Phase::InProgress.is_terminal());
        assert!(!Phase::AwaitingFirstPlayerChoice.is_terminal());
    }

    #[test]
    fn test_human_is_red_on_either_side() {
        let mut state = GameState::initial();
        assert_eq!(state.color(Player::First), TokenColor::Red);

        state.automated = Some(Player::Second);
        assert_eq!(state.color(Player::First), TokenColor::Red);
        assert_eq!(state.color(Player::Second), TokenColor::Blue);

        state.automated = Some(Player::First);
        assert_eq!(state.color(Player::First), TokenColor::Blue);
        assert_eq!(state.color(Player::Second), TokenColor::Red);
        assert_eq!(state.color(Player::Second).to_string(), "Red");
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Won(Player::First).to_string(), "First won");
        assert_eq!(Phase::Draw.to_string(), "draw");
    }
}
