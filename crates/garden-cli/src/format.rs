//! Output formatting utilities for text and JSON output.

use anyhow::Result;
use serde::Serialize;

use garden_core::{
    MetricStats, Recommendation, StatusBadge, StatusSummary, recommendations, snapshot_stats,
};
use garden_cli::setup::format_clock;
use garden_types::{Metric, PlantRecord, PlantStatus, Snapshot, WeatherSnapshot};

use crate::style;

/// Formatting options for output.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Disable colored output.
    pub no_color: bool,
    /// Use Fahrenheit for temperatures.
    pub fahrenheit: bool,
    /// Use compact JSON output (no pretty-printing).
    pub compact: bool,
}

impl FormatOptions {
    pub fn new(no_color: bool, fahrenheit: bool) -> Self {
        Self {
            no_color,
            fahrenheit,
            compact: false,
        }
    }

    /// Create with compact JSON option.
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Serialize value to JSON string, respecting compact option.
    pub fn as_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        Ok(json + "\n")
    }

    /// Format temperature with appropriate unit.
    #[must_use]
    pub fn format_temp(&self, celsius: f32) -> String {
        if self.fahrenheit {
            format!("{:.1}°F", celsius * 9.0 / 5.0 + 32.0)
        } else {
            format!("{:.1}°C", celsius)
        }
    }

    /// Format a metric value with its unit, honoring the temperature unit.
    #[must_use]
    pub fn format_metric(&self, metric: Metric, value: f64) -> String {
        match metric {
            Metric::Temperature => self.format_temp(value as f32),
            Metric::Ph => format!("{:.1}", value),
            Metric::SoilMoisture | Metric::Humidity | Metric::Light => {
                format!("{:.0}{}", value, metric.unit())
            }
        }
    }
}

// ============================================================================
// Snapshot
// ============================================================================

#[must_use]
pub fn format_weather_line(weather: &WeatherSnapshot, opts: &FormatOptions) -> String {
    format!(
        "{}  {}  humidity {}%  wind {:.0} km/h  UV {}",
        weather.condition,
        opts.format_temp(weather.temperature),
        weather.humidity,
        weather.wind_speed,
        weather.uv_index
    )
}

fn format_stats_line(stats: &MetricStats, opts: &FormatOptions) -> String {
    format!(
        "  {:<14} {:>10}   min {} / avg {} / max {}",
        stats.metric.label(),
        opts.format_metric(stats.metric, stats.latest),
        opts.format_metric(stats.metric, stats.min),
        opts.format_metric(stats.metric, stats.avg),
        opts.format_metric(stats.metric, stats.max),
    )
}

fn format_readings_table(snapshot: &Snapshot, opts: &FormatOptions) -> String {
    use tabled::builder::Builder;
    use tabled::settings::Style;

    let temp_header = if opts.fahrenheit {
        "Temp (F)"
    } else {
        "Temp (C)"
    };

    let mut builder = Builder::default();
    builder.push_record(["Time", "Soil", temp_header, "Humidity", "Light", "pH"]);
    for reading in &snapshot.readings {
        builder.push_record([
            reading.time_label(),
            format!("{}%", reading.soil_moisture),
            opts.format_temp(reading.temperature),
            format!("{}%", reading.humidity),
            format!("{} lux", reading.light),
            format!("{:.1}", reading.ph),
        ]);
    }

    let mut table = builder.build();
    if opts.no_color {
        table.with(Style::ascii());
    } else {
        table.with(Style::rounded());
    }
    table.to_string()
}

fn format_plant_line(plant: &PlantRecord, opts: &FormatOptions) -> String {
    let badge = StatusBadge::for_status(&plant.status);
    let mut line = format!(
        "  {:<10} {} {:>3}% {}  optimal {}",
        plant.name,
        style::format_badge_padded(&badge, 24, opts.no_color),
        plant.soil_moisture,
        style::moisture_bar(plant.soil_moisture, plant.optimal_range, badge.tone, opts.no_color),
        plant.optimal_range,
    );
    if !plant.is_consistent() {
        line.push_str(&format!("  (moisture says {})", plant.derived_status()));
    }
    line
}

#[must_use]
pub fn format_summary_line(summary: &StatusSummary, opts: &FormatOptions) -> String {
    summary
        .slices()
        .into_iter()
        .map(|(name, count, tone)| style::paint(&format!("{} {}", name, count), tone, opts.no_color))
        .collect::<Vec<_>>()
        .join("  ")
}

#[must_use]
pub fn format_recommendations_text(cards: &[Recommendation], opts: &FormatOptions) -> String {
    if cards.is_empty() {
        return "  No recommendations right now.\n".to_string();
    }
    cards
        .iter()
        .map(|card| {
            let title = if opts.no_color {
                card.kind.title().to_string()
            } else {
                use owo_colors::OwoColorize;
                format!("{}", card.kind.title().bold())
            };
            format!("  {}: {}\n", title, card.message)
        })
        .collect()
}

/// Full text rendering of one snapshot and the plant catalog.
#[must_use]
pub fn format_snapshot_text(
    snapshot: &Snapshot,
    plants: &[PlantRecord],
    opts: &FormatOptions,
) -> String {
    let mut out = String::new();
    out.push_str(&style::format_title("Sustainable Garden Dashboard", opts.no_color));
    out.push('\n');
    out.push_str(&format!(
        "Last updated: {}  (snapshot #{})\n\n",
        format_clock(snapshot.captured_at),
        snapshot.generation
    ));

    out.push_str(&style::format_section("Weather", opts.no_color));
    out.push('\n');
    out.push_str(&format!("  {}\n\n", format_weather_line(&snapshot.weather, opts)));

    out.push_str(&style::format_section("Current Conditions", opts.no_color));
    out.push('\n');
    for stats in snapshot_stats(snapshot) {
        out.push_str(&format_stats_line(&stats, opts));
        out.push('\n');
    }
    out.push('\n');

    out.push_str(&style::format_section("Plants", opts.no_color));
    out.push('\n');
    for plant in plants {
        out.push_str(&format_plant_line(plant, opts));
        out.push('\n');
    }
    out.push('\n');

    out.push_str(&style::format_section("24-Hour Readings", opts.no_color));
    out.push('\n');
    out.push_str(&format_readings_table(snapshot, opts));
    out.push_str("\n\n");

    out.push_str(&style::format_section("Garden Health Overview", opts.no_color));
    out.push('\n');
    out.push_str(&format!(
        "  {}\n\n",
        format_summary_line(&StatusSummary::from_plants(plants), opts)
    ));

    out.push_str(&style::format_section("Recommendations", opts.no_color));
    out.push('\n');
    out.push_str(&format_recommendations_text(
        &recommendations(plants, Some(snapshot)),
        opts,
    ));
    out
}

#[derive(Serialize)]
struct SnapshotJson<'a> {
    #[serde(flatten)]
    snapshot: &'a Snapshot,
    stats: Vec<MetricStats>,
    summary: StatusSummary,
    recommendations: Vec<Recommendation>,
}

/// JSON rendering of one snapshot with derived statistics.
///
/// Values stay in their native units (Celsius) regardless of display flags.
pub fn format_snapshot_json(
    snapshot: &Snapshot,
    plants: &[PlantRecord],
    opts: &FormatOptions,
) -> Result<String> {
    opts.as_json(&SnapshotJson {
        snapshot,
        stats: snapshot_stats(snapshot),
        summary: StatusSummary::from_plants(plants),
        recommendations: recommendations(plants, Some(snapshot)),
    })
}

// ============================================================================
// Plants
// ============================================================================

/// Table of plants with recorded and moisture-derived status.
#[must_use]
pub fn format_plants_text(plants: &[PlantRecord], opts: &FormatOptions) -> String {
    use tabled::builder::Builder;
    use tabled::settings::Style;

    if plants.is_empty() {
        return "No plants configured.\n".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record([
        "Plant",
        "Status",
        "Moisture",
        "Optimal",
        "Last watered",
        "Next watering",
    ]);
    let mut inconsistent = Vec::new();
    for plant in plants {
        let badge = StatusBadge::for_status(&plant.status);
        let mut name = plant.name.clone();
        if !plant.is_consistent() {
            name.push('*');
            inconsistent.push(plant);
        }
        builder.push_record([
            name,
            style::format_badge(&badge, opts.no_color),
            format!("{}%", plant.soil_moisture),
            plant.optimal_range.to_string(),
            plant.last_watered.clone(),
            plant.next_watering.clone(),
        ]);
    }

    let mut table = builder.build();
    if opts.no_color {
        table.with(Style::ascii());
    } else {
        table.with(Style::rounded());
    }

    let mut out = table.to_string();
    out.push('\n');
    for plant in inconsistent {
        out.push_str(&format!(
            "* {}: recorded {}, moisture {}% suggests {}\n",
            plant.name,
            plant.status,
            plant.soil_moisture,
            plant.derived_status()
        ));
    }
    out
}

#[derive(Serialize)]
struct PlantJson<'a> {
    #[serde(flatten)]
    record: &'a PlantRecord,
    badge: StatusBadge,
    derived_status: PlantStatus,
    consistent: bool,
}

pub fn format_plants_json(plants: &[PlantRecord], opts: &FormatOptions) -> Result<String> {
    let rows: Vec<PlantJson<'_>> = plants
        .iter()
        .map(|record| PlantJson {
            record,
            badge: StatusBadge::for_status(&record.status),
            derived_status: record.derived_status(),
            consistent: record.is_consistent(),
        })
        .collect();
    opts.as_json(&rows)
}

// ============================================================================
// Watch formatting
// ============================================================================

/// One line per published snapshot: clock, generation, latest reading,
/// soil trend against the previous snapshot and the weather.
#[must_use]
pub fn format_watch_line(
    snapshot: &Snapshot,
    previous: Option<&Snapshot>,
    opts: &FormatOptions,
) -> String {
    let Some(latest) = snapshot.latest() else {
        return format!(
            "{}  #{}  no readings\n",
            format_clock(snapshot.captured_at),
            snapshot.generation
        );
    };

    let trend = previous
        .and_then(Snapshot::latest)
        .map(|prev| {
            style::trend_indicator(
                f64::from(latest.soil_moisture),
                f64::from(prev.soil_moisture),
                opts.no_color,
            )
        })
        .unwrap_or("-");

    let parts = [
        format_clock(snapshot.captured_at),
        format!("#{}", snapshot.generation),
        format!("soil {}% {}", latest.soil_moisture, trend),
        opts.format_temp(latest.temperature),
        format!("hum {}%", latest.humidity),
        format!("{} lux", latest.light),
        format!("pH {:.1}", latest.ph),
        format!("| {}", format_weather_line(&snapshot.weather, opts)),
    ];
    parts.join("  ") + "\n"
}

/// JSON watch output: one compact object per line.
pub fn format_watch_json(snapshot: &Snapshot) -> Result<String> {
    Ok(serde_json::to_string(snapshot)? + "\n")
}
