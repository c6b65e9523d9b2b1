//! Synthetic telemetry generator.
//!
//! Stands in for real sensors: every field of every hourly slot is sampled
//! independently from a fixed uniform range. There is no smoothing and no
//! correlation between slots or between refreshes.
//!
//! The generator is seedable so tests can reproduce exact sequences.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;

use garden_types::{READING_WINDOW, Reading, WeatherSnapshot};

use crate::error::{Error, Result};
use crate::source::{TelemetryFrame, TelemetrySource};

/// Simulated fetch delay used when none is configured.
pub const DEFAULT_LATENCY: Duration = Duration::from_secs(1);

/// Inclusive `[min, max]` sampling bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies inside the bounds.
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

/// Sampling ranges for each reading field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleRanges {
    /// Soil moisture, percent.
    pub soil_moisture: Bounds<u8>,
    /// Temperature, whole degrees Celsius.
    pub temperature: Bounds<i16>,
    /// Relative humidity, percent.
    pub humidity: Bounds<u8>,
    /// Light level, lux.
    pub light: Bounds<u16>,
    /// Soil pH, rounded to one decimal after sampling.
    pub ph: Bounds<f32>,
}

impl Default for SampleRanges {
    fn default() -> Self {
        Self {
            soil_moisture: Bounds::new(30, 69),
            temperature: Bounds::new(18, 32),
            humidity: Bounds::new(40, 69),
            light: Bounds::new(200, 999),
            ph: Bounds::new(6.0, 8.0),
        }
    }
}

impl SampleRanges {
    /// Reject inverted bounds, percentages over 100 and non-finite pH.
    pub fn validate(&self) -> Result<()> {
        let ordered = self.soil_moisture.is_ordered()
            && self.temperature.is_ordered()
            && self.humidity.is_ordered()
            && self.light.is_ordered()
            && self.ph.is_ordered();
        if !ordered {
            return Err(Error::invalid_config("sample range has min > max"));
        }
        if self.soil_moisture.max > 100 || self.humidity.max > 100 {
            return Err(Error::invalid_config("percentage range exceeds 100"));
        }
        if !self.ph.min.is_finite() || !self.ph.max.is_finite() {
            return Err(Error::invalid_config("pH range must be finite"));
        }
        Ok(())
    }

    /// Draw one reading stamped with `timestamp`.
    ///
    /// Fails with [`Error::InvalidConfig`] when the ranges do not pass
    /// [`validate`](Self::validate).
    pub fn sample<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        timestamp: OffsetDateTime,
    ) -> Result<Reading> {
        self.validate()?;
        Ok(self.draw(rng, timestamp))
    }

    /// Caller guarantees the ranges are valid.
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R, timestamp: OffsetDateTime) -> Reading {
        let span = f64::from(self.ph.max - self.ph.min);
        let ph = f64::from(self.ph.min) + rng.random::<f64>() * span;
        let ph = ((ph * 10.0).round() / 10.0) as f32;

        Reading {
            timestamp,
            soil_moisture: rng.random_range(self.soil_moisture.min..=self.soil_moisture.max),
            temperature: f32::from(rng.random_range(self.temperature.min..=self.temperature.max)),
            humidity: rng.random_range(self.humidity.min..=self.humidity.max),
            light: rng.random_range(self.light.min..=self.light.max),
            ph: ph.clamp(self.ph.min, self.ph.max),
        }
    }
}

/// Random-value telemetry source.
///
/// Each fetch suspends for the configured latency, then generates a full
/// window of [`READING_WINDOW`] hourly readings ending at `now`, plus the
/// weather template.
pub struct SyntheticSource {
    name: String,
    rng: Mutex<StdRng>,
    ranges: SampleRanges,
    weather: WeatherSnapshot,
    latency: Duration,
}

impl std::fmt::Debug for SyntheticSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntheticSource")
            .field("name", &self.name)
            .field("ranges", &self.ranges)
            .field("latency", &self.latency)
            .finish()
    }
}

impl SyntheticSource {
    /// A source seeded from OS entropy.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// A deterministic source: the same seed yields the same sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            name: "synthetic".to_string(),
            rng: Mutex::new(rng),
            ranges: SampleRanges::default(),
            weather: WeatherSnapshot::default(),
            latency: DEFAULT_LATENCY,
        }
    }

    /// Replace the sampling ranges.
    pub fn with_ranges(mut self, ranges: SampleRanges) -> Result<Self> {
        ranges.validate()?;
        self.ranges = ranges;
        Ok(self)
    }

    /// Replace the weather template.
    #[must_use]
    pub fn with_weather(mut self, weather: WeatherSnapshot) -> Self {
        self.weather = weather;
        self
    }

    /// Set the simulated fetch delay.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn ranges(&self) -> &SampleRanges {
        &self.ranges
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Generate the reading window synchronously, without the latency.
    pub fn generate(&self, now: OffsetDateTime) -> TelemetryFrame {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let readings = (0..READING_WINDOW as i64)
            .rev()
            .map(|hours_ago| {
                let timestamp = now - time::Duration::hours(hours_ago);
                self.ranges.draw(&mut *rng, timestamp)
            })
            .collect();

        TelemetryFrame {
            readings,
            weather: self.weather,
        }
    }
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TelemetrySource for SyntheticSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, now: OffsetDateTime) -> Result<TelemetryFrame> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let frame = self.generate(now);
        debug!(readings = frame.readings.len(), "Generated synthetic frame");
        Ok(frame)
    }
}
