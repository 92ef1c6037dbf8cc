use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use drop_token::config::{AppConfig, SERVICE_BOARD_SIZE};
use drop_token::game::GameEngine;
use drop_token::opponent::HttpOpponent;
use drop_token::session::Session;
use drop_token::ui::App;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

/// Play Drop Token against the remote move service.
#[derive(Parser)]
#[command(name = "drop-token", about = "Play Drop Token in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "drop_token.toml")]
    config: PathBuf,

    /// Override the board size
    #[arg(long)]
    size: Option<usize>,

    /// Override the opponent service URL
    #[arg(long)]
    opponent_url: Option<String>,

    /// Override the log file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Replay comma-separated columns, print the result and exit
    #[arg(long, value_delimiter = ',', num_args = 0..)]
    replay: Option<Vec<usize>>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(size) = cli.size {
        config.game.board_size = size;
    }
    if let Some(url) = cli.opponent_url {
        config.opponent.base_url = url;
    }
    if let Some(path) = cli.log_file {
        config.logging.file = Some(path);
    }
    config.validate().context("validating configuration")?;

    if let Some(moves) = cli.replay {
        return replay(config.game.board_size, &moves);
    }

    drop_token::logging::init(&config.logging)?;
    if config.game.board_size != SERVICE_BOARD_SIZE {
        warn!(
            size = config.game.board_size,
            "the public opponent service only plays on a {SERVICE_BOARD_SIZE}x{SERVICE_BOARD_SIZE} board"
        );
    }

    let opponent = HttpOpponent::new(&config.opponent).context("creating opponent client")?;
    info!(url = %opponent.base_url(), size = config.game.board_size, "starting game");
    let session = Session::new(config.game.board_size, Arc::new(opponent))
        .context("creating game session")?;

    run_ui(App::new(session))
}

fn replay(size: usize, moves: &[usize]) -> Result<()> {
    let engine = GameEngine::replay(size, moves)
        .with_context(|| format!("replaying {moves:?} on a {size}x{size} board"))?;
    print!("{}", engine.board());
    println!("{} after {} moves", engine.phase(), engine.history().len());
    Ok(())
}

fn run_ui(mut app: App) -> Result<()> {
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal")?;

    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res.context("running terminal UI")
}
