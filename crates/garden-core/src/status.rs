//! Display classification for plant statuses.
//!
//! A fixed lookup from [`PlantStatus`] to the label, tone and icon shown on
//! a plant card. The lookup is total: unrecognized statuses fall through to
//! a neutral gray leaf.
//!
//! | Status        | Label         | Tone   | Icon           |
//! |---------------|---------------|--------|----------------|
//! | `healthy`     | healthy       | Green  | check-circle   |
//! | `needs-water` | needs water   | Red    | alert-triangle |
//! | `attention`   | attention     | Yellow | clock          |
//! | other         | raw value     | Gray   | leaf           |

use std::fmt;

use serde::{Deserialize, Serialize};

use garden_types::PlantStatus;

/// Color family of a badge. Front ends map this to concrete colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Green,
    Red,
    Yellow,
    Gray,
}

/// Icon drawn next to a badge label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusIcon {
    CheckCircle,
    AlertTriangle,
    Clock,
    Leaf,
}

impl StatusIcon {
    /// A single-width glyph for terminal output.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            StatusIcon::CheckCircle => "✔",
            StatusIcon::AlertTriangle => "▲",
            StatusIcon::Clock => "◷",
            StatusIcon::Leaf => "♣",
        }
    }

    /// Plain-ASCII fallback for terminals without Unicode.
    #[must_use]
    pub fn ascii(self) -> &'static str {
        match self {
            StatusIcon::CheckCircle => "+",
            StatusIcon::AlertTriangle => "!",
            StatusIcon::Clock => "~",
            StatusIcon::Leaf => "*",
        }
    }
}

/// Label, tone and icon for one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBadge {
    pub label: String,
    pub tone: Tone,
    pub icon: StatusIcon,
}

impl StatusBadge {
    /// Look up the badge for `status`.
    ///
    /// ```
    /// use garden_core::status::{StatusBadge, StatusIcon, Tone};
    /// use garden_types::PlantStatus;
    ///
    /// let badge = StatusBadge::for_status(&PlantStatus::NeedsWater);
    /// assert_eq!(badge.label, "needs water");
    /// assert_eq!(badge.tone, Tone::Red);
    /// assert_eq!(badge.icon, StatusIcon::AlertTriangle);
    /// ```
    #[must_use]
    pub fn for_status(status: &PlantStatus) -> Self {
        let (tone, icon) = match status {
            PlantStatus::Healthy => (Tone::Green, StatusIcon::CheckCircle),
            PlantStatus::NeedsWater => (Tone::Red, StatusIcon::AlertTriangle),
            PlantStatus::Attention => (Tone::Yellow, StatusIcon::Clock),
            PlantStatus::Unknown(_) => (Tone::Gray, StatusIcon::Leaf),
        };
        Self {
            label: display_label(status),
            tone,
            icon,
        }
    }
}

impl fmt::Display for StatusBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon.glyph(), self.label)
    }
}

/// The status with hyphens turned into spaces; blank input reads "unknown".
fn display_label(status: &PlantStatus) -> String {
    let raw = status.as_str().trim();
    if raw.is_empty() {
        "unknown".to_string()
    } else {
        raw.replace('-', " ")
    }
}
