//! Keyboard input handling for the dashboard.
//!
//! # Key Bindings
//!
//! | Key       | Action        |
//! |-----------|---------------|
//! | `q` / `Esc` | Quit        |
//! | `r`       | Refresh now   |
//! | `t`       | Toggle theme  |
//! | `f`       | Toggle °C/°F  |
//! | `?`       | Toggle help   |

use crossterm::event::KeyCode;

use super::app::App;
use super::messages::Command;

/// User actions that can be triggered by keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Refresh outside the periodic schedule.
    Refresh,
    ToggleHelp,
    ToggleTheme,
    ToggleUnits,
    /// Close the help overlay.
    Dismiss,
    None,
}

/// Map a key press to an action.
///
/// While the help overlay is open, any key closes it except `q`.
pub fn handle_key(key: KeyCode, help_open: bool) -> Action {
    if help_open {
        return match key {
            KeyCode::Char('q') => Action::Quit,
            _ => Action::Dismiss,
        };
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('r') | KeyCode::F(5) => Action::Refresh,
        KeyCode::Char('t') => Action::ToggleTheme,
        KeyCode::Char('f') => Action::ToggleUnits,
        KeyCode::Char('?') => Action::ToggleHelp,
        _ => Action::None,
    }
}

/// Apply an action to the app, returning a command for the worker if any.
pub fn apply_action(app: &mut App, action: Action) -> Option<Command> {
    match action {
        Action::Quit => {
            app.should_quit = true;
            None
        }
        Action::Refresh => {
            if app.is_loading() {
                app.push_status_message("Refresh already in progress".to_string());
                None
            } else {
                Some(Command::Refresh)
            }
        }
        Action::ToggleHelp => {
            app.show_help = !app.show_help;
            None
        }
        Action::ToggleTheme => {
            app.toggle_theme();
            None
        }
        Action::ToggleUnits => {
            app.fahrenheit = !app.fahrenheit;
            let unit = if app.fahrenheit { "Fahrenheit" } else { "Celsius" };
            app.push_status_message(format!("Temperatures in {}", unit));
            None
        }
        Action::Dismiss => {
            app.show_help = false;
            None
        }
        Action::None => None,
    }
}
