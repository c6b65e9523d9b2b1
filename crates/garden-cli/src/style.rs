//! Visual styling utilities for the CLI.
//!
//! Colors, spinners and small bar gauges shared by the text formatters.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use garden_core::{StatusBadge, Tone};
use garden_types::OptimalRange;

// ============================================================================
// Progress Indicators
// ============================================================================

/// Standard spinner tick characters (Braille dots animation)
const SPINNER_TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Standard spinner tick interval
const SPINNER_TICK_MS: u64 = 80;

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars(SPINNER_TICK_CHARS)
}

/// Spinner shown while a refresh is in flight.
pub fn loading_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(spinner_style());
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
    pb
}

// ============================================================================
// Tones and Badges
// ============================================================================

/// Paint `text` in the color family of `tone`.
pub fn paint(text: &str, tone: Tone, no_color: bool) -> String {
    if no_color {
        return text.to_string();
    }
    match tone {
        Tone::Green => format!("{}", text.green()),
        Tone::Red => format!("{}", text.red()),
        Tone::Yellow => format!("{}", text.yellow()),
        Tone::Gray => format!("{}", text.dimmed()),
    }
}

/// Format a status badge: icon and label, colored by tone.
///
/// Without color, ASCII icons are used so output stays pipe-friendly.
pub fn format_badge(badge: &StatusBadge, no_color: bool) -> String {
    paint(&badge_text(badge, no_color), badge.tone, no_color)
}

/// Like [`format_badge`], left-aligned to `width` columns.
///
/// Padding is applied before coloring so escape codes do not count toward
/// the width.
pub fn format_badge_padded(badge: &StatusBadge, width: usize, no_color: bool) -> String {
    let text = format!("{:<width$}", badge_text(badge, no_color), width = width);
    paint(&text, badge.tone, no_color)
}

fn badge_text(badge: &StatusBadge, no_color: bool) -> String {
    if no_color {
        format!("[{}] {}", badge.icon.ascii(), badge.label)
    } else {
        format!("{} {}", badge.icon.glyph(), badge.label)
    }
}

// ============================================================================
// Gauges
// ============================================================================

/// Width of the moisture bar in characters.
const GAUGE_WIDTH: usize = 20;

/// A moisture bar with the optimal band marked, e.g. `██████▒▒░░░░`.
///
/// Filled cells show the moisture level; cells inside the optimal band that
/// are not filled are drawn as `▒`.
pub fn moisture_bar(moisture: u8, range: OptimalRange, tone: Tone, no_color: bool) -> String {
    let cell = |percent: u8| usize::from(percent.min(100)) * GAUGE_WIDTH / 100;
    let filled = cell(moisture);
    let (band_start, band_end) = (cell(range.min()), cell(range.max()));

    let bar: String = (0..GAUGE_WIDTH)
        .map(|i| {
            if i < filled {
                '█'
            } else if i >= band_start && i < band_end {
                '▒'
            } else {
                '░'
            }
        })
        .collect();
    paint(&bar, tone, no_color)
}

// ============================================================================
// Messages and Headers
// ============================================================================

/// Format a success message.
pub fn format_success(message: &str, no_color: bool) -> String {
    if no_color {
        format!("[OK] {}", message)
    } else {
        format!("{} {}", "[OK]".green(), message)
    }
}

/// Format a warning message.
pub fn format_warning(message: &str, no_color: bool) -> String {
    if no_color {
        format!("[!!] {}", message)
    } else {
        format!("{} {}", "[!!]".yellow(), message)
    }
}

/// Format a title header.
pub fn format_title(title: &str, no_color: bool) -> String {
    let underline = "━".repeat(title.chars().count());
    if no_color {
        format!("{}\n{}", title, underline)
    } else {
        format!("{}\n{}", title.bold(), underline.dimmed())
    }
}

/// Format a section header.
pub fn format_section(name: &str, no_color: bool) -> String {
    let width = terminal_width().min(72);
    let line = "─".repeat(width.saturating_sub(name.chars().count() + 4).max(3));
    if no_color {
        format!("── {} {}", name, line)
    } else {
        format!("── {} {}", name.cyan(), line.dimmed())
    }
}

/// Get terminal width, defaulting to 80 if detection fails.
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Trend arrow comparing two values.
pub fn trend_indicator(current: f64, previous: f64, no_color: bool) -> &'static str {
    let diff = current - previous;
    if diff.abs() < 0.5 {
        "-"
    } else if diff > 0.0 {
        if no_color { "^" } else { "↑" }
    } else if no_color {
        "v"
    } else {
        "↓"
    }
}
