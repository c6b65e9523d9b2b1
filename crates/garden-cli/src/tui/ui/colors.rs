//! Color helpers for badges and readings.
//!
//! # Soil moisture
//!
//! Moisture is colored against the plant's own optimal band:
//!
//! | Position            | Color   |
//! |---------------------|---------|
//! | inside the band     | success |
//! | up to 10 points off | warning |
//! | further off         | danger  |

use ratatui::style::Color;

use garden_core::Tone;
use garden_types::OptimalRange;

use super::theme::AppTheme;

/// Concrete color for a badge tone.
#[must_use]
pub fn tone_color(tone: Tone, theme: &AppTheme) -> Color {
    match tone {
        Tone::Green => theme.success,
        Tone::Red => theme.danger,
        Tone::Yellow => theme.warning,
        Tone::Gray => theme.text_muted,
    }
}

/// Color for a moisture value relative to `range`.
#[must_use]
pub fn moisture_color(moisture: u8, range: OptimalRange, theme: &AppTheme) -> Color {
    match range.deviation(moisture).unsigned_abs() {
        0 => theme.success,
        1..=10 => theme.warning,
        _ => theme.danger,
    }
}

/// Color for a light level in lux.
#[must_use]
pub fn light_color(lux: u16, theme: &AppTheme) -> Color {
    match lux {
        0..=199 => theme.text_muted,
        200..=399 => theme.warning,
        _ => theme.success,
    }
}

/// Color for a UV index (WHO scale).
#[must_use]
pub fn uv_color(index: u8) -> Color {
    match index {
        0..=2 => Color::Green,
        3..=5 => Color::Yellow,
        6..=7 => Color::Rgb(255, 165, 0),
        _ => Color::Red,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_colors_follow_theme() {
        let theme = AppTheme::dark();
        assert_eq!(tone_color(Tone::Green, &theme), theme.success);
        assert_eq!(tone_color(Tone::Red, &theme), theme.danger);
        assert_eq!(tone_color(Tone::Gray, &theme), theme.text_muted);
    }

    #[test]
    fn test_moisture_color_bands() {
        let theme = AppTheme::dark();
        let range = OptimalRange::new(50, 65).unwrap();
        assert_eq!(moisture_color(55, range, &theme), theme.success);
        assert_eq!(moisture_color(45, range, &theme), theme.warning);
        assert_eq!(moisture_color(35, range, &theme), theme.danger);
        assert_eq!(moisture_color(80, range, &theme), theme.danger);
    }

    #[test]
    fn test_light_and_uv() {
        let theme = AppTheme::light();
        assert_eq!(light_color(150, &theme), theme.text_muted);
        assert_eq!(light_color(650, &theme), theme.success);
        assert_eq!(uv_color(6), Color::Rgb(255, 165, 0));
        assert_eq!(uv_color(11), Color::Red);
    }
}
