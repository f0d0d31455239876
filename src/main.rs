use std::io;
use std::time::Duration;
use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use songshelf::config::Config;
use songshelf::controller::{AppController, Intent};
use songshelf::logging;
use songshelf::model::{AppModel, SongsApi};
use songshelf::view::AppView;

/// How long shutdown waits for in-flight requests
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_args();

    if let Err(e) = logging::init_logging(&config.log_dir) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!(api_url = %config.api_url, "=== songshelf starting ===");

    let api = SongsApi::new(&config.api_url)?;
    let model = AppModel::new();
    let controller = AppController::new(model.clone(), api);

    controller.dispatch(Intent::FetchSongs);

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &model, &controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    if tokio::time::timeout(SHUTDOWN_GRACE, controller.settle()).await.is_err() {
        tracing::warn!(in_flight = controller.in_flight(), "Shutting down with requests still in flight");
    }

    tracing::info!("songshelf shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: &AppModel,
    controller: &AppController,
) -> io::Result<()> {
    loop {
        let snapshot = model.snapshot();
        if snapshot.ui.should_quit {
            break;
        }

        terminal.draw(|f| {
            AppView::render(f, &snapshot);
        })?;

        // Short poll so background results and expiring toasts show up promptly
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                controller.handle_key_event(key);
            }
        }

        // Let spawned routines make progress between frames
        tokio::task::yield_now().await;
    }

    Ok(())
}
