//! The dashboard view-model.
//!
//! [`DashboardViewModel`] owns the one piece of shared state in the
//! dashboard: the latest [`DashboardState`]. Each refresh builds a new
//! immutable [`Snapshot`] and publishes a whole new state value through a
//! `tokio::sync::watch` channel. Readers therefore see either the previous
//! state or the next one, never a mix of the two.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use garden_core::{DashboardViewModel, SyntheticSource, SystemClock, plants};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> garden_core::Result<()> {
//! let source = SyntheticSource::seeded(1).with_latency(Duration::ZERO);
//! let vm = DashboardViewModel::new(
//!     Arc::new(source),
//!     Arc::new(SystemClock::utc()),
//!     plants::default_catalog(),
//! );
//! assert!(vm.state().loading);
//!
//! let snapshot = vm.refresh().await?;
//! assert_eq!(snapshot.readings.len(), 24);
//! assert!(!vm.state().loading);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use time::OffsetDateTime;
use tokio::sync::{Mutex, watch};
use tracing::{debug, warn};

use garden_types::{PlantRecord, Reading, Snapshot};

use crate::clock::Clock;
use crate::error::Result;
use crate::refresh::{RefreshHandle, RefreshOptions, spawn_refresh_loop};
use crate::retry::{RetryConfig, with_retry};
use crate::source::TelemetrySource;

/// Everything the presentation layer needs, published as one value.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    /// A refresh is in flight.
    pub loading: bool,
    /// The latest successful snapshot, if any.
    pub snapshot: Option<Arc<Snapshot>>,
    /// Message of the most recent failed refresh, cleared on success.
    pub last_error: Option<String>,
    /// Generation of `snapshot`, 0 before the first success.
    pub generation: u64,
    /// When `snapshot` was captured.
    pub updated_at: Option<OffsetDateTime>,
}

impl DashboardState {
    fn initial() -> Self {
        Self {
            loading: true,
            snapshot: None,
            last_error: None,
            generation: 0,
            updated_at: None,
        }
    }

    /// The snapshot to render, or `None` while a refresh is in flight.
    ///
    /// A loading indicator is shown instead of stale data.
    #[must_use]
    pub fn visible(&self) -> Option<&Snapshot> {
        if self.loading {
            None
        } else {
            self.snapshot.as_deref()
        }
    }
}

/// Holds and refreshes the dashboard snapshot.
pub struct DashboardViewModel {
    source: Arc<dyn TelemetrySource>,
    clock: Arc<dyn Clock>,
    plants: Arc<[PlantRecord]>,
    retry: RetryConfig,
    state: watch::Sender<DashboardState>,
    /// Serializes refreshes: at most one is in flight.
    refresh_lock: Mutex<()>,
}

impl std::fmt::Debug for DashboardViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardViewModel")
            .field("source", &self.source.name())
            .field("plants", &self.plants.len())
            .field("generation", &self.state.borrow().generation)
            .finish()
    }
}

impl DashboardViewModel {
    /// Create a view-model. Nothing is fetched until [`refresh`] or
    /// [`spawn`] is called; the initial state is loading.
    ///
    /// [`refresh`]: Self::refresh
    /// [`spawn`]: Self::spawn
    pub fn new(
        source: Arc<dyn TelemetrySource>,
        clock: Arc<dyn Clock>,
        plants: Vec<PlantRecord>,
    ) -> Self {
        let (state, _) = watch::channel(DashboardState::initial());
        Self {
            source,
            clock,
            plants: plants.into(),
            retry: RetryConfig::none(),
            state,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Retry transient source failures within a single refresh.
    #[must_use]
    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    /// A copy of the latest published state.
    pub fn state(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    /// The static plant catalog.
    pub fn plants(&self) -> &[PlantRecord] {
        &self.plants
    }

    /// Shared handle to the plant catalog.
    pub fn plants_shared(&self) -> Arc<[PlantRecord]> {
        Arc::clone(&self.plants)
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Run one refresh cycle.
    ///
    /// Publishes `loading = true`, fetches a frame, then publishes either the
    /// new snapshot or the error. On error the previous snapshot is kept.
    ///
    /// Cancel-safe: dropping the future before it completes restores the
    /// previous state with `loading = false`.
    pub async fn refresh(&self) -> Result<Arc<Snapshot>> {
        let _serialized = self.refresh_lock.lock().await;

        let previous = self.state();
        let mut in_flight = InFlight::new(&self.state, previous.clone());
        self.state.send_replace(DashboardState {
            loading: true,
            ..previous.clone()
        });

        let now = self.clock.now();
        let fetched = with_retry(&self.retry, "fetch", || self.source.fetch(now))
            .await
            .and_then(|frame| frame.validate().map(|()| frame));

        in_flight.disarm();
        match fetched {
            Ok(frame) => {
                let generation = previous.generation + 1;
                let readings = frame
                    .readings
                    .into_iter()
                    .map(|reading| Reading {
                        timestamp: self.clock.localize(reading.timestamp),
                        ..reading
                    })
                    .collect();
                let snapshot = Arc::new(Snapshot {
                    generation,
                    captured_at: now,
                    readings,
                    weather: frame.weather,
                });
                self.state.send_replace(DashboardState {
                    loading: false,
                    snapshot: Some(Arc::clone(&snapshot)),
                    last_error: None,
                    generation,
                    updated_at: Some(now),
                });
                debug!(generation, source = self.source.name(), "Published snapshot");
                Ok(snapshot)
            }
            Err(e) => {
                warn!(source = self.source.name(), error = %e, "Refresh failed");
                self.state.send_replace(DashboardState {
                    loading: false,
                    last_error: Some(e.to_string()),
                    ..previous
                });
                Err(e)
            }
        }
    }

    /// Start periodic refreshing in a background task.
    ///
    /// The loop stops when the returned handle is shut down or dropped.
    pub fn spawn(self: &Arc<Self>, options: RefreshOptions) -> Result<RefreshHandle> {
        options.validate()?;
        Ok(spawn_refresh_loop(Arc::clone(self), options))
    }
}

/// Restores the pre-refresh state if a refresh is dropped before it
/// publishes its outcome.
struct InFlight<'a> {
    state: &'a watch::Sender<DashboardState>,
    previous: Option<DashboardState>,
}

impl<'a> InFlight<'a> {
    fn new(state: &'a watch::Sender<DashboardState>, previous: DashboardState) -> Self {
        Self {
            state,
            previous: Some(previous),
        }
    }

    /// The refresh reached its outcome; nothing to restore.
    fn disarm(&mut self) {
        self.previous = None;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            debug!(generation = previous.generation, "Refresh cancelled before completion");
            self.state.send_replace(DashboardState {
                loading: false,
                ..previous
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::mock::MockSource;
    use crate::plants::default_catalog;
    use crate::synthetic::SyntheticSource;
    use std::time::Duration;
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2024-06-01 15:00 UTC);

    fn vm_with(source: Arc<dyn TelemetrySource>) -> DashboardViewModel {
        DashboardViewModel::new(source, Arc::new(FixedClock::new(NOW)), default_catalog())
    }

    #[test]
    fn test_initial_state_is_loading() {
        let vm = vm_with(Arc::new(MockSource::new("m")));
        let state = vm.state();
        assert!(state.loading);
        assert!(state.snapshot.is_none());
        assert_eq!(state.generation, 0);
        assert!(state.visible().is_none());
        assert_eq!(vm.plants().len(), 4);
    }

    #[tokio::test]
    async fn test_refresh_publishes_snapshot() {
        let vm = vm_with(Arc::new(SyntheticSource::seeded(3).with_latency(Duration::ZERO)));
        let snapshot = vm.refresh().await.unwrap();

        let state = vm.state();
        assert!(!state.loading);
        assert_eq!(state.generation, 1);
        assert_eq!(state.updated_at, Some(NOW));
        assert_eq!(snapshot.readings.len(), 24);
        assert_eq!(snapshot.captured_at, NOW);
        assert!(snapshot.is_complete());
        assert_eq!(state.visible().map(|s| s.generation), Some(1));
    }

    #[tokio::test]
    async fn test_generations_increase() {
        let vm = vm_with(Arc::new(SyntheticSource::seeded(3).with_latency(Duration::ZERO)));
        vm.refresh().await.unwrap();
        vm.refresh().await.unwrap();
        let third = vm.refresh().await.unwrap();
        assert_eq!(third.generation, 3);
        assert_eq!(vm.state().generation, 3);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let source = Arc::new(MockSource::new("bed"));
        let vm = vm_with(source.clone());
        let first = vm.refresh().await.unwrap();

        source.set_should_fail(true, Some("sensor offline")).await;
        let err = vm.refresh().await.unwrap_err();
        assert!(err.to_string().contains("sensor offline"));

        let state = vm.state();
        assert!(!state.loading);
        assert_eq!(state.generation, 1);
        assert_eq!(state.snapshot.as_deref(), Some(&*first));
        assert!(state.last_error.as_deref().unwrap().contains("sensor offline"));

        source.set_should_fail(false, None).await;
        vm.refresh().await.unwrap();
        assert!(vm.state().last_error.is_none());
    }

    #[tokio::test]
    async fn test_retry_config_absorbs_transient_failures() {
        let source = Arc::new(MockSource::new("flaky"));
        source.fail_next(2);
        let vm = vm_with(source.clone()).with_retry_config(
            RetryConfig::new(3)
                .initial_delay(Duration::from_millis(1))
                .jitter(false),
        );

        vm.refresh().await.unwrap();
        assert_eq!(source.fetch_count(), 3);
        assert!(vm.state().last_error.is_none());
    }

    #[tokio::test]
    async fn test_short_frame_is_rejected() {
        let source = Arc::new(MockSource::new("short"));
        let mut frame = MockSource::flat_frame(NOW);
        frame.readings.truncate(5);
        source.set_frame(frame).await;

        let vm = vm_with(source);
        assert!(vm.refresh().await.is_err());
        assert!(vm.state().snapshot.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_hides_stale_snapshot() {
        let source = Arc::new(MockSource::new("slow"));
        let vm = Arc::new(vm_with(source.clone()));
        vm.refresh().await.unwrap();

        source.set_latency(Duration::from_secs(1));
        let mut rx = vm.subscribe();
        let task = tokio::spawn({
            let vm = Arc::clone(&vm);
            async move { vm.refresh().await }
        });

        let during = rx.wait_for(|s| s.loading).await.unwrap().clone();
        assert_eq!(during.generation, 1);
        assert!(during.snapshot.is_some());
        assert!(during.visible().is_none());

        task.await.unwrap().unwrap();
        let after = vm.state();
        assert!(!after.loading);
        assert_eq!(after.generation, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_refresh_restores_previous_state() {
        let source = Arc::new(MockSource::new("slow"));
        let vm = vm_with(source.clone());
        let first = vm.refresh().await.unwrap();

        source.set_latency(Duration::from_secs(10));
        let outcome = tokio::time::timeout(Duration::from_secs(1), vm.refresh()).await;
        assert!(outcome.is_err());

        tokio::time::sleep(Duration::from_secs(60)).await;
        let state = vm.state();
        assert!(!state.loading);
        assert_eq!(state.generation, 1);
        assert_eq!(state.visible(), Some(&*first));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_first_refresh_clears_loading() {
        let source = Arc::new(MockSource::new("slow"));
        source.set_latency(Duration::from_secs(10));
        let vm = vm_with(source.clone());

        let outcome = tokio::time::timeout(Duration::from_secs(1), vm.refresh()).await;
        assert!(outcome.is_err());

        let state = vm.state();
        assert!(!state.loading);
        assert!(state.snapshot.is_none());
        assert_eq!(state.generation, 0);

        // The lock was released with the dropped future.
        source.set_latency(Duration::ZERO);
        assert_eq!(vm.refresh().await.unwrap().generation, 1);
    }


    /// US Eastern around the March 2024 switch to daylight time.
    struct EasternClock {
        now: OffsetDateTime,
    }

    impl Clock for EasternClock {
        fn now(&self) -> OffsetDateTime {
            self.now
        }

        fn localize(&self, at: OffsetDateTime) -> OffsetDateTime {
            if at < datetime!(2024-03-10 07:00 UTC) {
                at.to_offset(time::macros::offset!(-5))
            } else {
                at.to_offset(time::macros::offset!(-4))
            }
        }
    }

    #[tokio::test]
    async fn test_each_reading_is_localized_on_its_own() {
        let now = datetime!(2024-03-10 15:00 -4);
        let vm = DashboardViewModel::new(
            Arc::new(MockSource::new("eastern")),
            Arc::new(EasternClock { now }),
            default_catalog(),
        );
        let snapshot = vm.refresh().await.unwrap();
        let labels: Vec<String> = snapshot.readings.iter().map(|r| r.time_label()).collect();

        assert_eq!(labels[0], "03:00 PM");
        assert_eq!(labels[10], "01:00 AM");
        assert_eq!(labels[11], "03:00 AM");
        assert_eq!(labels[23], "03:00 PM");
        assert_eq!(snapshot.readings[23].timestamp, now);
    }

}
