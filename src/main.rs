use std::{io, path::Path};

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing_appender::non_blocking::WorkerGuard;

use taskboard::app::App;
use taskboard::config::{BoardConfig, CliArgs};
use taskboard::ui::{self, theme::Theme};
use taskboard::{Board, BoardStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliArgs::parse();

    let config = match BoardConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            BoardConfig::from_cli(&cli)
        }
    };

    // Logs go to a file; the terminal belongs to ratatui.
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());
    tracing::info!(theme = ?config.theme, "taskboard starting");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let store = BoardStore::new(Board::new(&config.column_titles));
    let mut app = App::new(store, Theme::from_name(config.theme), config.max_title_len);

    let result = run_app(&mut terminal, &mut app, &config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    tracing::info!(tasks = app.board().len(), "taskboard exiting");

    if config.print_board {
        println!("{}", serde_json::to_string_pretty(app.board())?);
    }

    if let Err(err) = result {
        tracing::error!(%err, "event loop failed");
        eprintln!("{err:?}");
    }
    Ok(())
}

/// File logging. The returned guard must live until shutdown so buffered
/// entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("taskboard.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    config: &BoardConfig,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| {
            app.set_viewport(frame.area());
            ui::draw(frame, app);
        })?;
        // drops are only reconciled once the board is on screen
        app.mark_ready();

        if event::poll(config.poll_timeout)? {
            app.handle_event(event::read()?);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
