//! Interactive terminal dashboard.
//!
//! Ties the view-model's refresh loop, a background worker for manual
//! refreshes and the render loop together:
//!
//! - Terminal setup and restoration
//! - Channel creation for worker communication
//! - The main event loop with input handling and rendering
//! - Cancelling the refresh loop on teardown

pub mod app;
pub mod input;
pub mod messages;
pub mod ui;
pub mod worker;

pub use app::App;
pub use messages::{Command, DashboardEvent};
pub use worker::DashboardWorker;

use std::io::{self, stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing::info;

use garden_core::RefreshOptions;

use crate::config::Config;
use crate::setup::build_view_model;

/// Set up the terminal for TUI rendering.
///
/// Enables raw mode and switches to the alternate screen buffer.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Run the dashboard until the user quits.
///
/// The refresh loop is cancelled and awaited before returning, so no
/// refresh outlives the dashboard.
pub async fn run(config: Config, seed: Option<u64>) -> Result<()> {
    let vm = build_view_model(&config, seed)?;
    let period = config.refresh_period();

    let refresh = vm
        .spawn(RefreshOptions::with_period(period))
        .context("Failed to start refresh loop")?;

    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>(32);
    let (event_tx, event_rx) = mpsc::channel::<DashboardEvent>(32);

    let worker = DashboardWorker::new(vm.clone(), cmd_rx, event_tx, refresh.cancellation_token());
    let worker_handle = tokio::spawn(worker.run());

    let mut app = App::new(vm.subscribe(), event_rx, vm.plants_shared())
        .with_source_name(vm.source_name())
        .with_period(period)
        .with_theme(config.theme.into())
        .with_fahrenheit(config.fahrenheit);

    let mut terminal = setup_terminal()?;

    let result = run_event_loop(&mut terminal, &mut app, &cmd_tx);

    let _ = cmd_tx.try_send(Command::Shutdown);

    // Restore before awaiting so the shell is usable even if shutdown stalls.
    restore_terminal()?;

    refresh.shutdown().await;
    let _ = worker_handle.await;
    info!("Dashboard closed");

    result
}

/// Main event loop for the TUI.
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    command_tx: &mpsc::Sender<Command>,
) -> Result<()> {
    while !app.should_quit() {
        app.tick_spinner();
        app.clean_expired_messages();
        app.sync_state();

        while let Ok(event) = app.event_rx.try_recv() {
            app.handle_dashboard_event(event);
        }

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            let action = input::handle_key(key.code, app.show_help);
            if let Some(cmd) = input::apply_action(app, action) {
                let _ = command_tx.try_send(cmd);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    #[test]
    fn test_terminal_functions_exist() {
        // Actual terminal tests require a real terminal
        let _ = restore_terminal;
        let _ = setup_terminal;
    }

    #[test]
    fn test_input_handling_quit() {
        let action = input::handle_key(KeyCode::Char('q'), false);
        assert_eq!(action, input::Action::Quit);
    }

    #[test]
    fn test_input_handling_refresh() {
        let action = input::handle_key(KeyCode::Char('r'), false);
        assert_eq!(action, input::Action::Refresh);
    }
}
