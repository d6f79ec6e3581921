use anyhow::Result;
use clarity_deployer::wallet::{BridgeConnector, WalletConnector};
use clarity_deployer::AppConfig;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::sync::Arc;
use tracing::error;

mod app;
mod event;
mod input;
mod screens;
mod theme;
mod ui;
pub mod widgets;

pub use app::App;
pub use event::EventHandler;

/// Run the TUI application
pub async fn run_tui(config: AppConfig, connector: BridgeConnector) -> Result<()> {
    let connector: Arc<dyn WalletConnector> = Arc::new(connector);
    let tick = config.ui.tick_interval();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run it
    let mut app = App::new(config, connector);
    let res = run_app(&mut terminal, &mut app, tick).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("TUI exited with error: {:?}", err);
        println!("{:?}", err)
    }

    Ok(())
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick: std::time::Duration,
) -> Result<()> {
    let mut event_handler = EventHandler::new(tick);
    app.set_sender(event_handler.sender());

    loop {
        // Draw the current state
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events
        if let Some(event) = event_handler.next().await {
            if !app.handle_event(event) {
                break; // Exit on quit
            }
        }
    }

    Ok(())
}
