//! Dashboard view-model for garden sensor telemetry.
//!
//! This crate keeps a garden dashboard's data fresh: it pulls a 24-hour
//! window of soil and climate readings plus current weather from a
//! [`TelemetrySource`], publishes each result as an immutable [`Snapshot`],
//! and refreshes on a timer until the view is torn down.
//!
//! # Features
//!
//! - **Atomic snapshots**: readings and weather are replaced together
//! - **Loading state**: a flag that is set for the whole of each refresh
//! - **Periodic refresh**: cancellable background loop, 30 s by default
//! - **Synthetic data**: seedable generator with a simulated 1 s delay
//! - **Status badges**: label, tone and icon for every plant status
//! - **Summaries**: status distribution, metric statistics, recommendations
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use garden_core::{DashboardViewModel, RefreshOptions, SyntheticSource, SystemClock, plants};
//!
//! #[tokio::main]
//! async fn main() -> garden_core::Result<()> {
//!     let vm = Arc::new(DashboardViewModel::new(
//!         Arc::new(SyntheticSource::new()),
//!         Arc::new(SystemClock::utc()),
//!         plants::default_catalog(),
//!     ));
//!
//!     let mut updates = vm.subscribe();
//!     let handle = vm.spawn(RefreshOptions::default())?;
//!
//!     while updates.changed().await.is_ok() {
//!         let state = updates.borrow_and_update().clone();
//!         match state.visible() {
//!             Some(snapshot) => println!("{} readings", snapshot.readings.len()),
//!             None => println!("loading..."),
//!         }
//!     }
//!
//!     handle.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod clock;
pub mod error;
pub mod mock;
pub mod plants;
pub mod refresh;
pub mod retry;
pub mod source;
pub mod status;
pub mod summary;
pub mod synthetic;
pub mod view_model;

pub use garden_types::types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Error, Result};
pub use mock::MockSource;
pub use refresh::{DEFAULT_PERIOD, RefreshHandle, RefreshOptions, RefreshOptionsBuilder};
pub use retry::{RetryConfig, is_retryable, with_retry};
pub use source::{TelemetryFrame, TelemetrySource};
pub use status::{StatusBadge, StatusIcon, Tone};
pub use summary::{
    MetricStats, Recommendation, RecommendationKind, StatusSummary, recommendations,
    snapshot_stats,
};
pub use synthetic::{Bounds, DEFAULT_LATENCY, SampleRanges, SyntheticSource};
pub use view_model::{DashboardState, DashboardViewModel};

// Re-export from garden-types
pub use garden_types::{
    Metric, OptimalRange, PlantRecord, PlantStatus, READING_WINDOW, Reading, Snapshot,
    WeatherCondition, WeatherSnapshot,
};
