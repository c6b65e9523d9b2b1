//! Main dashboard panels.

use ratatui::prelude::*;
use ratatui::widgets::{BarChart, Block, Borders, Gauge, Paragraph, Sparkline, Wrap};

use garden_core::{MetricStats, RecommendationKind, StatusBadge};
use garden_types::{Metric, PlantRecord, Snapshot, WeatherSnapshot};

use super::colors::{light_color, moisture_color, tone_color, uv_color};
use super::theme::{AppTheme, BORDER_TYPE};
use super::widgets::{format_temp, light_bars, resample_sparkline_data, sparkline_data};
use crate::tui::app::App;

/// Create a bordered reading card with a value-colored border.
fn reading_card(title: &str, value: &str, color: Color, theme: &AppTheme) -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(
        value.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BORDER_TYPE)
            .border_style(Style::default().fg(color))
            .title(format!(" {} ", title))
            .title_style(Style::default().fg(theme.text_primary)),
    )
}

fn panel<'a>(title: String, theme: &AppTheme) -> Block<'a> {
    Block::default()
        .title(title)
        .title_style(theme.title_style())
        .borders(Borders::ALL)
        .border_type(BORDER_TYPE)
        .border_style(theme.border_inactive_style())
}

/// Shown while a refresh is in flight or before the first snapshot.
pub(super) fn draw_loading(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.app_theme();

    let headline = if app.is_loading() {
        vec![
            Span::styled(
                format!("{} ", app.spinner_char()),
                Style::default().fg(theme.primary),
            ),
            Span::styled(
                "Fetching garden data...",
                Style::default()
                    .fg(theme.text_primary)
                    .add_modifier(Modifier::BOLD),
            ),
        ]
    } else {
        vec![Span::styled(
            "No garden data yet",
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        )]
    };
    let mut lines = vec![Line::from(""), Line::from(headline)];

    if app.is_loading() && app.state.generation > 0 {
        lines.push(Line::from(Span::styled(
            format!("Replacing snapshot #{}", app.state.generation),
            Style::default().fg(theme.text_muted),
        )));
    }

    if !app.is_loading()
        && let Some(error) = &app.state.last_error
    {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Last refresh failed: {}", error),
            Style::default().fg(theme.danger),
        )));
        lines.push(Line::from(Span::styled(
            "Press r to retry",
            Style::default().fg(theme.text_muted),
        )));
    }

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Length(8),
            Constraint::Min(0),
        ])
        .split(area);

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BORDER_TYPE)
                .border_style(theme.border_active_style()),
        );
    frame.render_widget(paragraph, vertical[1]);
}

/// Draw all panels for a published snapshot.
pub(super) fn draw_dashboard(frame: &mut Frame, area: Rect, app: &App, snapshot: &Snapshot) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Weather
            Constraint::Length(7), // Plant cards
            Constraint::Min(8),    // Charts
            Constraint::Length(8), // Health and recommendations
        ])
        .split(area);

    draw_weather(frame, rows[0], app, &snapshot.weather);
    draw_plants(frame, rows[1], app);
    draw_charts(frame, rows[2], app, snapshot);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[3]);
    draw_health(frame, bottom[0], app);
    draw_recommendations(frame, bottom[1], app);
}

fn draw_weather(frame: &mut Frame, area: Rect, app: &App, weather: &WeatherSnapshot) {
    let theme = app.app_theme();
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(area);

    let cards = [
        reading_card("Conditions", &weather.condition.to_string(), theme.info, &theme),
        reading_card(
            "Temperature",
            &format_temp(weather.temperature, app.fahrenheit),
            theme.primary,
            &theme,
        ),
        reading_card(
            "Humidity",
            &format!("{}%", weather.humidity),
            theme.info,
            &theme,
        ),
        reading_card(
            "Wind",
            &format!("{:.0} km/h", weather.wind_speed),
            theme.text_secondary,
            &theme,
        ),
        reading_card(
            "UV Index",
            &weather.uv_index.to_string(),
            uv_color(weather.uv_index),
            &theme,
        ),
    ];
    for (card, cell) in cards.into_iter().zip(cells.iter()) {
        frame.render_widget(card, *cell);
    }
}

fn draw_plants(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.app_theme();
    if app.plants.is_empty() {
        frame.render_widget(
            Paragraph::new("No plants configured")
                .style(Style::default().fg(theme.text_muted))
                .block(panel(" Plants ".to_string(), &theme)),
            area,
        );
        return;
    }

    let count = app.plants.len() as u32;
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, count); app.plants.len()])
        .split(area);

    for (plant, cell) in app.plants.iter().zip(cells.iter()) {
        draw_plant_card(frame, *cell, plant, &theme);
    }
}

fn draw_plant_card(frame: &mut Frame, area: Rect, plant: &PlantRecord, theme: &AppTheme) {
    let badge = StatusBadge::for_status(&plant.status);
    let color = tone_color(badge.tone, theme);

    let block = Block::default()
        .title(format!(" {} ", plant.name))
        .title_style(
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_type(BORDER_TYPE)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1); 5])
        .split(inner);

    let mut badge_spans = vec![Span::styled(
        badge.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )];
    if !plant.is_consistent() {
        badge_spans.push(Span::styled(
            format!(" ({})", plant.derived_status()),
            Style::default().fg(theme.text_muted),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(badge_spans)), lines[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(moisture_color(
            plant.soil_moisture,
            plant.optimal_range,
            theme,
        )))
        .percent(u16::from(plant.soil_moisture.min(100)))
        .label(format!("{}%", plant.soil_moisture))
        .use_unicode(true);
    frame.render_widget(gauge, lines[1]);

    let detail = |label: &str, value: &str| {
        Paragraph::new(Line::from(vec![
            Span::styled(format!("{} ", label), Style::default().fg(theme.text_muted)),
            Span::styled(value.to_string(), Style::default().fg(theme.text_secondary)),
        ]))
    };
    frame.render_widget(
        detail("Optimal", &plant.optimal_range.to_string()),
        lines[2],
    );
    frame.render_widget(detail("Watered", &plant.last_watered), lines[3]);
    frame.render_widget(detail("Next", &plant.next_watering), lines[4]);
}

/// Sparklines for the slow metrics and a bar chart for light.
fn draw_charts(frame: &mut Frame, area: Rect, app: &App, snapshot: &Snapshot) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let series = [
        (Metric::SoilMoisture, 1.0),
        (Metric::Temperature, 10.0),
        (Metric::Humidity, 1.0),
        (Metric::Ph, 10.0),
    ];
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(columns[0]);
    for ((metric, scale), row) in series.into_iter().zip(rows.iter()) {
        draw_metric_sparkline(frame, *row, app, snapshot, metric, scale);
    }

    draw_light_chart(frame, columns[1], app, snapshot);
}

fn format_stat(metric: Metric, value: f64, fahrenheit: bool) -> String {
    match metric {
        Metric::Temperature => format_temp(value as f32, fahrenheit),
        Metric::Ph => format!("{:.1}", value),
        _ => format!("{:.0}{}", value, metric.unit()),
    }
}

fn draw_metric_sparkline(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    snapshot: &Snapshot,
    metric: Metric,
    scale: f64,
) {
    let theme = app.app_theme();
    let title = match MetricStats::compute(&snapshot.readings, metric) {
        Some(stats) => format!(
            " {} {}  ({} - {}) ",
            metric.label(),
            format_stat(metric, stats.latest, app.fahrenheit),
            format_stat(metric, stats.min, app.fahrenheit),
            format_stat(metric, stats.max, app.fahrenheit),
        ),
        None => format!(" {} ", metric.label()),
    };

    let block = panel(title, &theme);
    let inner = block.inner(area);
    let data = resample_sparkline_data(
        &sparkline_data(snapshot, metric, scale),
        usize::from(inner.width),
    );

    let color = match metric {
        Metric::SoilMoisture => theme.primary,
        Metric::Temperature => theme.warning,
        Metric::Humidity => theme.info,
        _ => theme.text_secondary,
    };
    let sparkline = Sparkline::default()
        .block(block)
        .data(&data)
        .style(Style::default().fg(color));
    frame.render_widget(sparkline, area);
}

fn draw_light_chart(frame: &mut Frame, area: Rect, app: &App, snapshot: &Snapshot) {
    let theme = app.app_theme();
    let avg = MetricStats::compute(&snapshot.readings, Metric::Light)
        .map(|s| s.avg)
        .unwrap_or(0.0);
    let block = panel(format!(" Light (lux)  avg {:.0} ", avg), &theme);
    let inner = block.inner(area);

    let bars = light_bars(snapshot);
    let pairs: Vec<(&str, u64)> = bars.iter().map(|(l, v)| (l.as_str(), *v)).collect();
    let slots = pairs.len().max(1) as u16;
    let bar_width = (inner.width.saturating_sub(slots - 1) / slots).max(1);

    let color = light_color(avg.round() as u16, &theme);
    let chart = BarChart::default()
        .block(block)
        .data(pairs.as_slice())
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(Style::default().fg(color))
        .value_style(Style::default().fg(theme.text_primary).bg(color))
        .label_style(Style::default().fg(theme.text_muted));
    frame.render_widget(chart, area);
}

/// Garden health distribution as horizontal bars.
fn draw_health(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.app_theme();
    let summary = app.summary();
    let block = panel(" Garden Health Overview ".to_string(), &theme);
    let inner = block.inner(area);

    let total = summary.total().max(1);
    let bar_space = usize::from(inner.width).saturating_sub(16);
    let lines: Vec<Line> = summary
        .slices()
        .into_iter()
        .map(|(name, count, tone)| {
            let color = tone_color(tone, &theme);
            let filled = count * bar_space / total;
            Line::from(vec![
                Span::styled(format!("{:<12}", name), Style::default().fg(theme.text_secondary)),
                Span::styled("█".repeat(filled), Style::default().fg(color)),
                Span::styled(format!(" {}", count), Style::default().fg(color)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_recommendations(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.app_theme();
    let cards = app.recommendations();

    let lines: Vec<Line> = if cards.is_empty() {
        vec![Line::from(Span::styled(
            "No recommendations right now.",
            Style::default().fg(theme.text_muted),
        ))]
    } else {
        cards
            .iter()
            .map(|card| {
                let color = match card.kind {
                    RecommendationKind::Watering => theme.danger,
                    RecommendationKind::Light => theme.warning,
                    RecommendationKind::Growth => theme.success,
                };
                Line::from(vec![
                    Span::styled(
                        format!("{}: ", card.kind.title()),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        card.message.clone(),
                        Style::default().fg(theme.text_secondary),
                    ),
                ])
            })
            .collect()
    };

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(panel(" Smart Recommendations ".to_string(), &theme));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_stat() {
        assert_eq!(format_stat(Metric::Light, 612.2, false), "612 lux");
        assert_eq!(format_stat(Metric::Ph, 6.76, false), "6.8");
        assert_eq!(format_stat(Metric::Temperature, 20.0, true), "68.0°F");
    }
}
