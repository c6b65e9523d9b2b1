//! Help overlay.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::theme::{AppTheme, BORDER_TYPE};
use crate::tui::app::App;

/// Draw help overlay with keyboard shortcuts.
pub(super) fn draw_help_overlay(frame: &mut Frame, app: &App) {
    let theme = app.app_theme();

    let area = frame.area();
    let width = 48u16.min(area.width.saturating_sub(2));
    let height = 16u16.min(area.height.saturating_sub(2));
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;

    let help_area = Rect::new(x, y, width, height);
    frame.render_widget(Clear, help_area);

    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ))
    };

    let lines = vec![
        heading("--- Keys ---"),
        Line::from(""),
        shortcut_line("r / F5", "Refresh now", &theme),
        shortcut_line("t", "Toggle dark/light theme", &theme),
        shortcut_line("f", "Toggle °C/°F", &theme),
        shortcut_line("?", "Toggle this help", &theme),
        shortcut_line("q / Esc", "Quit", &theme),
        Line::from(""),
        heading("--- Refresh ---"),
        Line::from(""),
        Line::from(Span::styled(
            format!("  Every {}s from {}", app.period.as_secs(), app.source_name),
            Style::default().fg(theme.text_secondary),
        )),
        Line::from(Span::styled(
            format!("  Snapshot #{}", app.state.generation),
            Style::default().fg(theme.text_muted),
        )),
    ];

    let help = Paragraph::new(lines).block(
        Block::default()
            .title(" Help ")
            .title_style(theme.title_style())
            .borders(Borders::ALL)
            .border_type(BORDER_TYPE)
            .border_style(theme.border_active_style()),
    );
    frame.render_widget(help, help_area);
}

/// Create a shortcut line with key and description.
fn shortcut_line<'a>(key: &str, desc: &str, theme: &AppTheme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:>10} ", key), Style::default().fg(theme.warning)),
        Span::styled(desc.to_string(), Style::default().fg(theme.text_secondary)),
    ])
}
