mod app;
mod classify;
mod cli;
mod config;
mod error;
mod event;
mod github;
mod logging;
mod model;
mod ui;

use std::io;
use std::panic;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use app::{Action, App};
use cli::{Cli, Command};
use github::{BoardSource, GitHubSource};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config
    let config = config::load_config(cli.config.as_deref())?;
    let _log_guard = logging::init(cli.verbose, &config.log_path());
    tracing::info!(command = ?cli.command(), "starting");

    let source: Arc<dyn BoardSource> = Arc::new(GitHubSource::new(config.github.clone()));

    // Set up action channel
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let size = terminal.size()?;
    let size = (size.width, size.height);
    let mut app = match cli.command() {
        Command::List => App::with_project_list(source, action_tx.clone(), size),
        Command::View { project_id } => {
            App::with_board(source, action_tx.clone(), size, project_id)
        }
    };

    // Spawn event reader
    let event_tx = action_tx.clone();
    let tick = Duration::from_millis(config.tick_ms.max(16));
    tokio::spawn(async move {
        event::run_event_loop(event_tx, tick).await;
    });
    drop(action_tx);

    // Main loop
    loop {
        terminal.draw(|f| ui::render(f, &app))?;

        match action_rx.recv().await {
            Some(action) => {
                app.update(action);
                if app.should_quit {
                    break;
                }
            }
            None => break,
        }
    }

    // Restore terminal
    terminal.show_cursor()?;
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    tracing::info!("exiting");

    Ok(())
}
