//! The telemetry source seam.
//!
//! The view-model pulls data through [`TelemetrySource`] so that the
//! synthetic generator, the test mock and any future hardware back end are
//! interchangeable.

use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;

use garden_types::{READING_WINDOW, Reading, WeatherSnapshot};

use crate::error::{Error, Result};

/// One fetch worth of data: the reading window and the weather.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryFrame {
    /// Hourly readings, oldest first.
    pub readings: Vec<Reading>,
    pub weather: WeatherSnapshot,
}

impl TelemetryFrame {
    /// Check the shape the dashboard relies on: a full window in time order.
    pub fn validate(&self) -> Result<()> {
        if self.readings.len() != READING_WINDOW {
            return Err(Error::InvalidData(format!(
                "expected {} readings, got {}",
                READING_WINDOW,
                self.readings.len()
            )));
        }
        if self
            .readings
            .windows(2)
            .any(|pair| pair[0].timestamp >= pair[1].timestamp)
        {
            return Err(Error::InvalidData(
                "readings are not ordered oldest to newest".to_string(),
            ));
        }
        Ok(())
    }
}

/// Something that can produce a [`TelemetryFrame`].
///
/// # Example
///
/// ```
/// use garden_core::{SyntheticSource, TelemetrySource};
/// use time::macros::datetime;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> garden_core::Result<()> {
/// let source = SyntheticSource::seeded(7).with_latency(std::time::Duration::ZERO);
/// let frame = source.fetch(datetime!(2024-06-01 12:00 UTC)).await?;
/// assert_eq!(frame.readings.len(), 24);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    /// Produce readings ending at `now` plus the current weather.
    async fn fetch(&self, now: OffsetDateTime) -> Result<TelemetryFrame>;
}

#[async_trait]
impl<T: TelemetrySource + ?Sized> TelemetrySource for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn fetch(&self, now: OffsetDateTime) -> Result<TelemetryFrame> {
        (**self).fetch(now).await
    }
}
