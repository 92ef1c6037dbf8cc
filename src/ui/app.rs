use crate::error::SessionError;
use crate::game::Phase;
use crate::session::{Session, SessionEvent};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;

pub struct App {
    session: Session,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(session: Session) -> Self {
        let selected_column = session.engine().size() / 2;
        App {
            session,
            selected_column,
            should_quit: false,
            message: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            self.apply_session_events();

            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Pick up opponent answers that arrived since the last frame.
    fn apply_session_events(&mut self) {
        for event in self.session.poll() {
            self.message = match event {
                SessionEvent::OpponentMoved(outcome) => match outcome.phase {
                    Phase::Won(player) => {
                        Some(format!("{} wins!", self.session.engine().color(player)))
                    }
                    Phase::Draw => Some("The game is a draw!".to_string()),
                    _ => None,
                },
                SessionEvent::OpponentFailed(err) => {
                    Some(format!("Opponent unavailable ({err}). Press T to retry."))
                }
            };
        }
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('r') => {
                self.session.restart();
                self.selected_column = self.session.engine().size() / 2;
                self.message = Some("New game started!".to_string());
            }
            KeyCode::Char('1') | KeyCode::Char('f')
                if self.session.engine().awaiting_first_player_choice() =>
            {
                self.choose(false);
            }
            KeyCode::Char('2') | KeyCode::Char('s')
                if self.session.engine().awaiting_first_player_choice() =>
            {
                self.choose(true);
            }
            KeyCode::Char('t') => {
                if self.session.retry_opponent() {
                    self.message = Some("Asking the opponent again...".to_string());
                }
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.session.engine().size() {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            _ => {}
        }
    }

    fn choose(&mut self, engine_first: bool) {
        self.message = match self.session.choose_first_player(engine_first) {
            Ok(()) => None,
            Err(err) => Some(err.to_string()),
        };
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        if self.session.engine().phase().is_terminal() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }

        self.message = match self.session.human_move(self.selected_column) {
            Ok(outcome) => match outcome.phase {
                Phase::Won(player) => {
                    Some(format!("{} wins!", self.session.engine().color(player)))
                }
                Phase::Draw => Some("The game is a draw!".to_string()),
                _ => None,
            },
            Err(SessionError::AwaitingOpponent) => {
                Some("Hold on, it's the opponent's turn.".to_string())
            }
            Err(SessionError::Move(err)) if err.is_illegal_move() => {
                Some("Oops! That isn't a legal move. The column is full.".to_string())
            }
            Err(SessionError::Move(err)) => Some(err.to_string()),
        };
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.session, self.selected_column, &self.message);
    }
}
