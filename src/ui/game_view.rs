use crate::game::{Cell, GameEngine, Line as WinLine, Phase, Player, TokenColor};
use crate::session::Session;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(
    frame: &mut Frame,
    session: &Session,
    selected_column: usize,
    message: &Option<String>,
) {
    let engine = session.engine();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(engine.size() as u16 + 4), // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, session, chunks[0]);
    render_board(frame, engine, selected_column, chunks[1]);
    render_message(frame, engine, message, chunks[2]);
    render_controls(frame, engine, chunks[3]);
}

fn player_color(engine: &GameEngine, player: Player) -> Color {
    match engine.color(player) {
        TokenColor::Red => Color::Red,
        TokenColor::Blue => Color::Blue,
    }
}

/// One-line summary of whose move it is.
pub fn status_text(session: &Session) -> String {
    let engine = session.engine();
    match engine.phase() {
        Phase::AwaitingFirstPlayerChoice => {
            "New game of Drop Token! Would you like to go first or second?".to_string()
        }
        Phase::InProgress if session.is_waiting() => {
            format!("{} ({}) is thinking...", engine.color(engine.turn()), session.opponent_name())
        }
        Phase::InProgress if engine.is_automated_turn() => {
            format!("{} ({}) has not moved yet", engine.color(engine.turn()), session.opponent_name())
        }
        Phase::InProgress => format!(
            "Your move ({}). Get {} in a row in any direction.",
            engine.color(engine.turn()),
            engine.size()
        ),
        Phase::Won(player) => format!("{} wins!", engine.color(player)),
        Phase::Draw => "The game is a draw!".to_string(),
    }
}

fn render_header(frame: &mut Frame, session: &Session, area: Rect) {
    let color = match session.engine().phase() {
        Phase::Won(player) => player_color(session.engine(), player),
        Phase::InProgress => player_color(session.engine(), session.engine().turn()),
        _ => Color::White,
    };

    let header = Paragraph::new(status_text(session))
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Drop Token"));

    frame.render_widget(header, area);
}

fn on_line(line: Option<WinLine>, row: usize, col: usize, size: usize) -> bool {
    line.is_some_and(|l| l.contains(row, col, size))
}

fn render_board(frame: &mut Frame, engine: &GameEngine, selected_column: usize, area: Rect) {
    if engine.awaiting_first_player_choice() {
        return;
    }

    let size = engine.size();
    let winning = engine.winning_line();
    let mut lines = Vec::new();

    let mut col_line = vec![Span::raw(" ")];
    for col in 0..size {
        let label = format!(" {} ", col + 1);
        if col == selected_column {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw(" "));
    lines.push(Line::from(col_line));

    let rule = "═".repeat(size * 3);
    lines.push(Line::from(format!("╔{rule}╗")));

    // Top row first; row 0 is the bottom of each column.
    for row in (0..size).rev() {
        let mut row_spans = vec![Span::raw("║")];
        for col in 0..size {
            let span = match engine.cell(row, col) {
                Cell::Empty => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
                Cell::Occupied(player) => {
                    let mut style = Style::default().fg(player_color(engine, player));
                    if on_line(winning, row, col, size) {
                        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                    }
                    Span::styled(" ● ", style)
                }
            };
            row_spans.push(span);
        }
        row_spans.push(Span::raw("║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("╚{rule}╝")));

    let mut indicator_line = vec![Span::raw(" ")];
    for col in 0..size {
        if col == selected_column && engine.phase() == Phase::InProgress {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw(" "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, engine: &GameEngine, message: &Option<String>, area: Rect) {
    let text = match message {
        Some(text) => text.as_str(),
        None if engine.state().last_move_illegal() => "That isn't a legal move.",
        None => "",
    };
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, engine: &GameEngine, area: Rect) {
    let line = if engine.awaiting_first_player_choice() {
        Line::from("1/F: Go first  |  2/S: Go second  |  Q: Quit")
    } else {
        Line::from("←/→: Move  |  Enter: Drop  |  T: Retry opponent  |  R: Restart  |  Q: Quit")
    };

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OpponentError;
    use crate::opponent::Opponent;
    use std::sync::Arc;

    struct Silent;

    impl Opponent for Silent {
        fn suggest_move(&self, _history: &[usize]) -> Result<usize, OpponentError> {
            Err(OpponentError::EmptyResponse)
        }

        fn name(&self) -> &str {
            "Silent"
        }
    }

    #[test]
    fn test_status_text_follows_phase() {
        let mut session = Session::new(4, Arc::new(Silent)).unwrap();
        assert!(status_text(&session).contains("first or second"));

        session.choose_first_player(false).unwrap();
        assert!(status_text(&session).starts_with("Your move (Red)"));

        session.human_move(0).unwrap();
        assert_eq!(status_text(&session), "Blue (Silent) is thinking...");
    }

    #[test]
    fn test_human_stays_red_when_going_second() {
        let mut session = Session::new(4, Arc::new(Silent)).unwrap();
        session.choose_first_player(true).unwrap();
        assert_eq!(status_text(&session), "Blue (Silent) is thinking...");
        assert_eq!(session.engine().color(Player::Second), TokenColor::Red);
    }

    #[test]
    fn test_status_text_on_large_board() {
        let mut session = Session::new(17, Arc::new(Silent)).unwrap();
        session.choose_first_player(false).unwrap();
        assert_eq!(
            status_text(&session),
            "Your move (Red). Get 17 in a row in any direction."
        );
    }

    #[test]
    fn test_on_line() {
        assert!(on_line(Some(WinLine::MainDiagonal), 2, 2, 4));
        assert!(!on_line(Some(WinLine::MainDiagonal), 2, 1, 4));
        assert!(!on_line(None, 0, 0, 4));
    }
}
