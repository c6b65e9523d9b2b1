//! Layout and rendering for the dashboard.
//!
//! - **Header**: title, source, last-updated time and indicators
//! - **Main content**: weather, plant cards, charts, health and advice
//! - **Status bar**: refresh spinner, messages or key hints, wall clock

pub mod colors;
pub mod theme;
pub mod widgets;

mod dashboard;
mod overlays;

use chrono::Local;
use garden_core::StatusSummary;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};

use super::app::{App, Theme};
use crate::setup::format_clock;

/// Draw the complete dashboard.
pub fn draw(frame: &mut Frame, app: &App) {
    if matches!(app.theme, Theme::Light) {
        frame.render_widget(
            Block::default().style(Style::default().bg(app.theme.bg())),
            frame.area(),
        );
    }

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header bar
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, main_layout[0], app);

    match app.visible_snapshot() {
        Some(snapshot) => dashboard::draw_dashboard(frame, main_layout[1], app, snapshot),
        None => dashboard::draw_loading(frame, main_layout[1], app),
    }

    draw_status_bar(frame, main_layout[2], app);

    if app.show_help {
        overlays::draw_help_overlay(frame, app);
    }
}

/// Draw the header bar with title, last update and indicators.
fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.app_theme();

    let mut spans = vec![
        Span::styled(
            " Sustainable Garden Dashboard ",
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{} ", app.source_name),
            Style::default().fg(theme.text_muted),
        ),
    ];

    if let Some(updated_at) = app.state.updated_at {
        spans.push(Span::styled(
            format!(" Last updated: {} ", format_clock(updated_at)),
            Style::default().fg(theme.text_secondary),
        ));
    }

    let summary = StatusSummary::from_plants(&app.plants);
    if summary.needs_water > 0 {
        spans.push(Span::styled(
            format!(" !{} ", summary.needs_water),
            Style::default()
                .fg(theme.danger)
                .add_modifier(Modifier::BOLD),
        ));
    }

    if app.state.last_error.is_some() {
        spans.push(Span::styled(" ERR ", Style::default().fg(theme.danger)));
    }

    if matches!(app.theme, Theme::Light) {
        spans.push(Span::styled(" LIGHT ", Style::default().fg(theme.warning)));
    } else {
        spans.push(Span::styled(" DARK ", Style::default().fg(theme.info)));
    }

    let header = Paragraph::new(Line::from(spans)).style(theme.header_style());
    frame.render_widget(header, area);
}

/// Key hints for the status bar.
fn context_hints() -> Vec<(&'static str, &'static str)> {
    vec![
        ("?", "help"),
        ("r", "refresh"),
        ("t", "theme"),
        ("f", "°C/°F"),
        ("q", "quit"),
    ]
}

/// Draw the status bar with spinner, messages or key hints.
fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.app_theme();
    let time_str = Local::now().format("%H:%M:%S").to_string();

    let left_spans = if app.is_loading() {
        vec![
            Span::styled(
                format!(" {} ", app.spinner_char()),
                Style::default().fg(theme.primary),
            ),
            Span::styled("Refreshing...", Style::default().fg(theme.text_secondary)),
        ]
    } else if let Some(msg) = app.current_status_message() {
        vec![Span::styled(
            format!(" {}", msg),
            Style::default().fg(theme.text_secondary),
        )]
    } else {
        let mut spans = vec![Span::raw(" ")];
        for (i, (key, desc)) in context_hints().iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", Style::default().fg(theme.text_muted)));
            }
            spans.push(Span::styled(
                *key,
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!(" {}", desc),
                Style::default().fg(theme.text_muted),
            ));
        }
        spans
    };

    let status_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(10)])
        .split(area);

    frame.render_widget(Paragraph::new(Line::from(left_spans)), status_layout[0]);

    let right = Paragraph::new(time_str)
        .style(Style::default().fg(theme.text_muted))
        .alignment(Alignment::Right);
    frame.render_widget(right, status_layout[1]);
}
