//! Core types for garden sensor data.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::macros::format_description;

use crate::error::{ParseError, ParseResult};

/// Number of hourly slots in one snapshot's reading window.
pub const READING_WINDOW: usize = 24;

/// Two-digit 12-hour clock label, e.g. `03:00 PM`.
const HOUR_LABEL: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute] [period case:upper]");

/// One hourly synthetic measurement.
///
/// Readings are immutable once generated; a refresh replaces the whole
/// collection rather than patching individual slots.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reading {
    /// When the slot was measured.
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub timestamp: OffsetDateTime,
    /// Soil moisture percentage (0-100).
    pub soil_moisture: u8,
    /// Air temperature in degrees Celsius.
    pub temperature: f32,
    /// Relative humidity percentage (0-100).
    pub humidity: u8,
    /// Light level in lux.
    pub light: u16,
    /// Soil pH, one decimal place.
    pub ph: f32,
}

impl Reading {
    /// Hour:minute label for chart axes, in the timestamp's own offset.
    ///
    /// ```
    /// use garden_types::Reading;
    /// use time::macros::datetime;
    ///
    /// let reading = Reading {
    ///     timestamp: datetime!(2024-06-01 15:04 UTC),
    ///     soil_moisture: 40,
    ///     temperature: 21.0,
    ///     humidity: 55,
    ///     light: 600,
    ///     ph: 6.8,
    /// };
    /// assert_eq!(reading.time_label(), "03:04 PM");
    /// ```
    #[must_use]
    pub fn time_label(&self) -> String {
        self.timestamp.format(HOUR_LABEL).unwrap_or_default()
    }

    /// Value of a single metric as `f64`, for charting and statistics.
    #[must_use]
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::SoilMoisture => f64::from(self.soil_moisture),
            Metric::Temperature => f64::from(self.temperature),
            Metric::Humidity => f64::from(self.humidity),
            Metric::Light => f64::from(self.light),
            Metric::Ph => f64::from(self.ph),
        }
    }
}

/// The measured quantities of a [`Reading`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Metric {
    SoilMoisture,
    Temperature,
    Humidity,
    Light,
    Ph,
}

impl Metric {
    /// All metrics in display order.
    pub const ALL: [Metric; 5] = [
        Metric::SoilMoisture,
        Metric::Temperature,
        Metric::Humidity,
        Metric::Light,
        Metric::Ph,
    ];

    /// Human-readable name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Metric::SoilMoisture => "Soil Moisture",
            Metric::Temperature => "Temperature",
            Metric::Humidity => "Humidity",
            Metric::Light => "Light Level",
            Metric::Ph => "pH",
        }
    }

    /// Unit suffix used when printing values.
    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            Metric::SoilMoisture | Metric::Humidity => "%",
            Metric::Temperature => "°C",
            Metric::Light => " lux",
            Metric::Ph => "",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Plant health status.
///
/// Parsing never fails: any string that is not one of the known statuses
/// becomes [`PlantStatus::Unknown`] so callers always have a value to
/// classify for display.
///
/// ```
/// use garden_types::PlantStatus;
///
/// assert_eq!("needs-water".parse(), Ok(PlantStatus::NeedsWater));
/// assert_eq!(
///     "wilting".parse::<PlantStatus>().unwrap(),
///     PlantStatus::Unknown("wilting".to_string())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum PlantStatus {
    /// Soil moisture within the optimal range.
    Healthy,
    /// Soil moisture below the optimal range.
    NeedsWater,
    /// Soil moisture above the range, or flagged for a manual check.
    Attention,
    /// Any unrecognized status value, kept verbatim.
    Unknown(String),
}

impl PlantStatus {
    /// The wire form of the status (`healthy`, `needs-water`, `attention`).
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            PlantStatus::Healthy => "healthy",
            PlantStatus::NeedsWater => "needs-water",
            PlantStatus::Attention => "attention",
            PlantStatus::Unknown(raw) => raw,
        }
    }
}

impl FromStr for PlantStatus {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "healthy" => PlantStatus::Healthy,
            "needs-water" | "needs_water" | "needs water" => PlantStatus::NeedsWater,
            "attention" => PlantStatus::Attention,
            _ => PlantStatus::Unknown(s.to_string()),
        })
    }
}

impl From<String> for PlantStatus {
    fn from(value: String) -> Self {
        match value.parse::<PlantStatus>() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl From<PlantStatus> for String {
    fn from(value: PlantStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for PlantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive soil-moisture band considered healthy for a plant.
///
/// Serialized as a two-element array `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "(u8, u8)", into = "(u8, u8)"))]
pub struct OptimalRange {
    min: u8,
    max: u8,
}

impl OptimalRange {
    /// The whole 0-100% scale.
    pub const FULL: OptimalRange = OptimalRange { min: 0, max: 100 };

    /// Create a range, rejecting inverted bounds and values above 100.
    pub fn new(min: u8, max: u8) -> ParseResult<Self> {
        if min > max {
            return Err(ParseError::InvalidRange { min, max });
        }
        if max > 100 {
            return Err(ParseError::InvalidPercentage(max));
        }
        Ok(Self { min, max })
    }

    /// Lower bound (inclusive).
    #[must_use]
    pub fn min(&self) -> u8 {
        self.min
    }

    /// Upper bound (inclusive).
    #[must_use]
    pub fn max(&self) -> u8 {
        self.max
    }

    /// Whether `moisture` lies inside the band.
    #[must_use]
    pub fn contains(&self, moisture: u8) -> bool {
        (self.min..=self.max).contains(&moisture)
    }

    /// Derive a status from a moisture value.
    ///
    /// Below the band is [`PlantStatus::NeedsWater`], above it is
    /// [`PlantStatus::Attention`], inside it is [`PlantStatus::Healthy`].
    ///
    /// ```
    /// use garden_types::{OptimalRange, PlantStatus};
    ///
    /// let range = OptimalRange::new(50, 65).unwrap();
    /// assert_eq!(range.classify(35), PlantStatus::NeedsWater);
    /// assert_eq!(range.classify(50), PlantStatus::Healthy);
    /// assert_eq!(range.classify(66), PlantStatus::Attention);
    /// ```
    #[must_use]
    pub fn classify(&self, moisture: u8) -> PlantStatus {
        if moisture < self.min {
            PlantStatus::NeedsWater
        } else if moisture > self.max {
            PlantStatus::Attention
        } else {
            PlantStatus::Healthy
        }
    }

    /// Signed distance from the band in percentage points.
    ///
    /// Negative below `min`, positive above `max`, zero inside.
    #[must_use]
    pub fn deviation(&self, moisture: u8) -> i16 {
        let moisture = i16::from(moisture);
        if moisture < i16::from(self.min) {
            moisture - i16::from(self.min)
        } else if moisture > i16::from(self.max) {
            moisture - i16::from(self.max)
        } else {
            0
        }
    }
}

impl TryFrom<(u8, u8)> for OptimalRange {
    type Error = ParseError;

    fn try_from((min, max): (u8, u8)) -> Result<Self, Self::Error> {
        Self::new(min, max)
    }
}

impl From<OptimalRange> for (u8, u8) {
    fn from(range: OptimalRange) -> Self {
        (range.min, range.max)
    }
}

impl fmt::Display for OptimalRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}%", self.min, self.max)
    }
}

/// A tracked plant.
///
/// Records are static: nothing in the dashboard mutates them at runtime.
/// The recorded `status` is shown as-is; [`PlantRecord::derived_status`]
/// exposes what the moisture rule would say.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlantRecord {
    pub id: u32,
    pub name: String,
    pub status: PlantStatus,
    /// Current soil moisture percentage.
    pub soil_moisture: u8,
    pub optimal_range: OptimalRange,
    /// Free-form label such as "2 hours ago".
    pub last_watered: String,
    /// Free-form label such as "in 6 hours" or "now".
    pub next_watering: String,
}

impl PlantRecord {
    /// Status derived from soil moisture against the optimal range.
    #[must_use]
    pub fn derived_status(&self) -> PlantStatus {
        self.optimal_range.classify(self.soil_moisture)
    }

    /// Whether the recorded status agrees with the derived one.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.status == self.derived_status()
    }

    /// Percentage points below the optimal minimum, if any.
    #[must_use]
    pub fn moisture_deficit(&self) -> Option<u8> {
        self.optimal_range
            .min()
            .checked_sub(self.soil_moisture)
            .filter(|gap| *gap > 0)
    }
}

/// Sky condition reported with a weather snapshot.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new conditions
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[non_exhaustive]
pub enum WeatherCondition {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Rain,
    Storm,
    Fog,
    Snow,
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WeatherCondition::Sunny => "Sunny",
            WeatherCondition::PartlyCloudy => "Partly Cloudy",
            WeatherCondition::Cloudy => "Cloudy",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Storm => "Storm",
            WeatherCondition::Fog => "Fog",
            WeatherCondition::Snow => "Snow",
        };
        f.write_str(label)
    }
}

/// Current outdoor conditions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WeatherSnapshot {
    /// Air temperature in degrees Celsius.
    pub temperature: f32,
    /// Relative humidity percentage.
    pub humidity: u8,
    /// Wind speed in km/h.
    pub wind_speed: f32,
    pub condition: WeatherCondition,
    pub uv_index: u8,
}

impl Default for WeatherSnapshot {
    fn default() -> Self {
        Self {
            temperature: 24.0,
            humidity: 62,
            wind_speed: 8.0,
            condition: WeatherCondition::PartlyCloudy,
            uv_index: 6,
        }
    }
}

/// Readings and weather valid for one refresh cycle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Snapshot {
    /// Monotonic refresh counter, starting at 1 for the first snapshot.
    pub generation: u64,
    /// When the snapshot was produced.
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub captured_at: OffsetDateTime,
    /// Hourly readings, oldest first.
    pub readings: Vec<Reading>,
    pub weather: WeatherSnapshot,
}

impl Snapshot {
    /// The most recent reading.
    #[must_use]
    pub fn latest(&self) -> Option<&Reading> {
        self.readings.last()
    }

    /// Whether the window has exactly [`READING_WINDOW`] readings in
    /// strictly increasing time order.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.readings.len() == READING_WINDOW
            && self
                .readings
                .windows(2)
                .all(|pair| pair[0].timestamp < pair[1].timestamp)
    }

    /// Values of one metric across the window, oldest first.
    #[must_use]
    pub fn series(&self, metric: Metric) -> Vec<f64> {
        self.readings.iter().map(|r| r.value(metric)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use time::macros::datetime;

    fn reading_at(timestamp: OffsetDateTime) -> Reading {
        Reading {
            timestamp,
            soil_moisture: 45,
            temperature: 22.0,
            humidity: 50,
            light: 500,
            ph: 6.5,
        }
    }

    #[test]
    fn test_time_label_morning_and_midnight() {
        assert_eq!(
            reading_at(datetime!(2024-06-01 09:30 UTC)).time_label(),
            "09:30 AM"
        );
        assert_eq!(
            reading_at(datetime!(2024-06-01 00:05 UTC)).time_label(),
            "12:05 AM"
        );
        assert_eq!(
            reading_at(datetime!(2024-06-01 12:00 UTC)).time_label(),
            "12:00 PM"
        );
    }

    #[test]
    fn test_time_label_uses_timestamp_offset() {
        let ts = datetime!(2024-06-01 15:00 +02:00);
        assert_eq!(reading_at(ts).time_label(), "03:00 PM");
    }

    #[test]
    fn test_snapshot_complete_requires_24_ordered() {
        let start = datetime!(2024-06-01 00:00 UTC);
        let readings: Vec<_> = (0..READING_WINDOW as i64)
            .map(|h| reading_at(start + time::Duration::hours(h)))
            .collect();
        let mut snapshot = Snapshot {
            generation: 1,
            captured_at: start,
            readings,
            weather: WeatherSnapshot::default(),
        };
        assert!(snapshot.is_complete());

        snapshot.readings.swap(0, 1);
        assert!(!snapshot.is_complete());

        snapshot.readings.truncate(23);
        assert!(!snapshot.is_complete());
    }

    #[test]
    fn test_series_follows_window_order() {
        let start = datetime!(2024-06-01 00:00 UTC);
        let mut a = reading_at(start);
        a.light = 200;
        let mut b = reading_at(start + time::Duration::hours(1));
        b.light = 900;
        let snapshot = Snapshot {
            generation: 3,
            captured_at: start,
            readings: vec![a, b],
            weather: WeatherSnapshot::default(),
        };
        assert_eq!(snapshot.series(Metric::Light), vec![200.0, 900.0]);
        assert_eq!(snapshot.latest().map(|r| r.light), Some(900));
    }

    #[test]
    fn test_deviation_signs() {
        let range = OptimalRange::new(40, 60).unwrap();
        assert_eq!(range.deviation(35), -5);
        assert_eq!(range.deviation(45), 0);
        assert_eq!(range.deviation(70), 10);
    }

    #[test]
    fn test_moisture_deficit() {
        let plant = PlantRecord {
            id: 2,
            name: "Basil".to_string(),
            status: PlantStatus::NeedsWater,
            soil_moisture: 35,
            optimal_range: OptimalRange::new(50, 65).unwrap(),
            last_watered: "8 hours ago".to_string(),
            next_watering: "now".to_string(),
        };
        assert_eq!(plant.moisture_deficit(), Some(15));

        let watered = PlantRecord {
            soil_moisture: 55,
            ..plant
        };
        assert_eq!(watered.moisture_deficit(), None);
    }

    proptest! {
        #[test]
        fn prop_classify_matches_bounds(min in 0u8..=100, span in 0u8..=100, moisture in 0u8..=100) {
            let max = min.saturating_add(span).min(100);
            let range = OptimalRange::new(min, max).unwrap();
            let status = range.classify(moisture);
            if moisture < min {
                prop_assert_eq!(status, PlantStatus::NeedsWater);
            } else if moisture > max {
                prop_assert_eq!(status, PlantStatus::Attention);
            } else {
                prop_assert_eq!(status, PlantStatus::Healthy);
                prop_assert!(range.contains(moisture));
            }
        }

        #[test]
        fn prop_status_parse_never_panics(raw in ".*") {
            let status: PlantStatus = raw.parse().unwrap();
            if let PlantStatus::Unknown(kept) = &status {
                prop_assert_eq!(kept, &raw);
            }
        }
    }
}
