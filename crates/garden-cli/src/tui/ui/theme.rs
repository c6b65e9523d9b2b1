//! Color palettes for the dashboard.
//!
//! Tailwind-derived RGB values so both palettes read well on true-color
//! terminals.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

/// Dashboard palette.
#[derive(Debug, Clone, Copy)]
pub struct AppTheme {
    pub primary: Color,

    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub info: Color,

    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    pub border_active: Color,
    pub border_inactive: Color,

    pub bg_header: Color,
}

impl Default for AppTheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl AppTheme {
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Rgb(52, 211, 153), // emerald-400

            success: Color::Rgb(74, 222, 128), // green-400
            warning: Color::Rgb(251, 191, 36), // amber-400
            danger: Color::Rgb(248, 113, 113), // red-400
            info: Color::Rgb(96, 165, 250),    // blue-400

            text_primary: Color::Rgb(248, 250, 252),   // slate-50
            text_secondary: Color::Rgb(148, 163, 184), // slate-400
            text_muted: Color::Rgb(100, 116, 139),     // slate-500

            border_active: Color::Rgb(52, 211, 153),  // emerald-400
            border_inactive: Color::Rgb(71, 85, 105), // slate-600

            bg_header: Color::Rgb(30, 41, 59), // slate-800
        }
    }

    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::Rgb(5, 150, 105), // emerald-600

            success: Color::Rgb(22, 163, 74), // green-600
            warning: Color::Rgb(217, 119, 6), // amber-600
            danger: Color::Rgb(220, 38, 38),  // red-600
            info: Color::Rgb(37, 99, 235),    // blue-600

            text_primary: Color::Rgb(15, 23, 42),    // slate-900
            text_secondary: Color::Rgb(71, 85, 105), // slate-600
            text_muted: Color::Rgb(148, 163, 184),   // slate-400

            border_active: Color::Rgb(5, 150, 105),     // emerald-600
            border_inactive: Color::Rgb(203, 213, 225), // slate-300

            bg_header: Color::Rgb(241, 245, 249), // slate-100
        }
    }

    #[inline]
    #[must_use]
    pub fn border_active_style(&self) -> Style {
        Style::default().fg(self.border_active)
    }

    #[inline]
    #[must_use]
    pub fn border_inactive_style(&self) -> Style {
        Style::default().fg(self.border_inactive)
    }

    #[inline]
    #[must_use]
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    #[inline]
    #[must_use]
    pub fn header_style(&self) -> Style {
        Style::default().bg(self.bg_header)
    }
}

/// Default border type for all blocks.
pub const BORDER_TYPE: BorderType = BorderType::Rounded;
