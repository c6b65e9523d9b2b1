//! Mock telemetry source for testing.
//!
//! [`MockSource`] implements [`TelemetrySource`] with canned data, so the
//! view-model's failure paths can be exercised without a real sensor.
//!
//! # Features
//!
//! - **Failure injection**: fail every fetch, or only the next N
//! - **Latency simulation**: add an artificial delay per fetch
//! - **Canned frames**: replace the frame returned by later fetches

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use garden_types::{READING_WINDOW, Reading, WeatherSnapshot};

use crate::error::{Error, Result};
use crate::source::{TelemetryFrame, TelemetrySource};

/// A scripted telemetry source.
///
/// # Example
///
/// ```
/// use garden_core::{MockSource, TelemetrySource};
/// use time::macros::datetime;
///
/// #[tokio::main]
/// async fn main() {
///     let source = MockSource::new("bed-1");
///     source.fail_next(1);
///
///     let now = datetime!(2024-06-01 12:00 UTC);
///     assert!(source.fetch(now).await.is_err());
///     assert!(source.fetch(now).await.is_ok());
///     assert_eq!(source.fetch_count(), 2);
/// }
/// ```
pub struct MockSource {
    name: String,
    frame: RwLock<Option<TelemetryFrame>>,
    should_fail: AtomicBool,
    fail_message: RwLock<String>,
    remaining_failures: AtomicU32,
    latency_ms: AtomicU64,
    fetch_count: AtomicU32,
}

impl std::fmt::Debug for MockSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSource")
            .field("name", &self.name)
            .field("should_fail", &self.should_fail.load(Ordering::Relaxed))
            .field("fetch_count", &self.fetch_count.load(Ordering::Relaxed))
            .finish()
    }
}

impl MockSource {
    /// Create a mock that returns a flat window ending at the requested time.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            frame: RwLock::new(None),
            should_fail: AtomicBool::new(false),
            fail_message: RwLock::new("Mock failure".to_string()),
            remaining_failures: AtomicU32::new(0),
            latency_ms: AtomicU64::new(0),
            fetch_count: AtomicU32::new(0),
        }
    }

    /// A window of identical readings ending at `now`.
    pub fn flat_frame(now: OffsetDateTime) -> TelemetryFrame {
        let readings = (0..READING_WINDOW as i64)
            .rev()
            .map(|hours_ago| Reading {
                timestamp: now - time::Duration::hours(hours_ago),
                soil_moisture: 50,
                temperature: 22.0,
                humidity: 55,
                light: 600,
                ph: 6.8,
            })
            .collect();
        TelemetryFrame {
            readings,
            weather: WeatherSnapshot::default(),
        }
    }

    /// Always return `frame` from now on.
    pub async fn set_frame(&self, frame: TelemetryFrame) {
        *self.frame.write().await = Some(frame);
    }

    /// Make every fetch fail (or succeed again) with `message`.
    pub async fn set_should_fail(&self, fail: bool, message: Option<&str>) {
        self.should_fail.store(fail, Ordering::Relaxed);
        if let Some(msg) = message {
            *self.fail_message.write().await = msg.to_string();
        }
    }

    /// Fail the next `count` fetches, then succeed.
    pub fn fail_next(&self, count: u32) {
        self.remaining_failures.store(count, Ordering::Relaxed);
    }

    /// Add a delay to every fetch.
    pub fn set_latency(&self, latency: Duration) {
        self.latency_ms
            .store(latency.as_millis() as u64, Ordering::Relaxed);
    }

    /// Number of fetch attempts so far, including failed ones.
    pub fn fetch_count(&self) -> u32 {
        self.fetch_count.load(Ordering::Relaxed)
    }

    async fn check_should_fail(&self) -> Result<()> {
        if self.remaining_failures.load(Ordering::Relaxed) > 0 {
            self.remaining_failures.fetch_sub(1, Ordering::Relaxed);
            return Err(Error::sensor_unavailable(
                self.name.clone(),
                self.fail_message.read().await.clone(),
            ));
        }
        if self.should_fail.load(Ordering::Relaxed) {
            return Err(Error::sensor_unavailable(
                self.name.clone(),
                self.fail_message.read().await.clone(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl TelemetrySource for MockSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, now: OffsetDateTime) -> Result<TelemetryFrame> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);

        let latency = self.latency_ms.load(Ordering::Relaxed);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }

        self.check_should_fail().await?;

        match self.frame.read().await.as_ref() {
            Some(frame) => Ok(frame.clone()),
            None => Ok(Self::flat_frame(now)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2024-06-01 12:00 UTC);

    #[tokio::test]
    async fn test_mock_returns_flat_frame() {
        let source = MockSource::new("test");
        let frame = source.fetch(NOW).await.unwrap();
        assert_eq!(frame.readings.len(), READING_WINDOW);
        assert_eq!(frame.readings.last().map(|r| r.timestamp), Some(NOW));
        assert!(frame.validate().is_ok());
    }

    #[tokio::test]
    async fn test_mock_should_fail_with_message() {
        let source = MockSource::new("bed-2");
        source.set_should_fail(true, Some("sensor unplugged")).await;

        let err = source.fetch(NOW).await.unwrap_err();
        assert!(matches!(err, Error::SensorUnavailable { .. }));
        assert!(err.to_string().contains("sensor unplugged"));

        source.set_should_fail(false, None).await;
        assert!(source.fetch(NOW).await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_transient_failures() {
        let source = MockSource::new("test");
        source.fail_next(2);

        assert!(source.fetch(NOW).await.is_err());
        assert!(source.fetch(NOW).await.is_err());
        assert!(source.fetch(NOW).await.is_ok());
        assert_eq!(source.fetch_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_canned_frame() {
        let source = MockSource::new("test");
        let mut frame = MockSource::flat_frame(NOW);
        frame.readings[0].light = 123;
        source.set_frame(frame.clone()).await;

        let fetched = source.fetch(datetime!(2030-01-01 00:00 UTC)).await.unwrap();
        assert_eq!(fetched, frame);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_latency() {
        let source = MockSource::new("slow");
        source.set_latency(Duration::from_millis(250));

        let started = tokio::time::Instant::now();
        source.fetch(NOW).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(250));
    }
}
