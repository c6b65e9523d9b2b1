//! Periodic refresh of the dashboard view-model.
//!
//! [`DashboardViewModel::spawn`] starts a background task that refreshes the
//! snapshot every [`RefreshOptions::period`]. The task stops when its
//! [`RefreshHandle`] is shut down or dropped, so a torn-down view never
//! keeps a timer alive.
//!
//! Refreshes never overlap: the loop awaits each refresh before waiting for
//! the next tick, and ticks missed during a slow refresh are delayed rather
//! than fired in a burst.
//!
//! [`DashboardViewModel::spawn`]: crate::view_model::DashboardViewModel::spawn

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::view_model::DashboardViewModel;

/// Default refresh period.
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(30);

/// Options for the refresh loop.
///
/// ```
/// use std::time::Duration;
/// use garden_core::RefreshOptions;
///
/// let options = RefreshOptions::builder()
///     .period(Duration::from_secs(10))
///     .max_consecutive_failures(5)
///     .build();
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct RefreshOptions {
    /// Time between refreshes. Default: 30 seconds.
    pub period: Duration,
    /// Stop the loop after this many failed refreshes in a row.
    /// `None` (default) keeps retrying forever.
    pub max_consecutive_failures: Option<u32>,
    /// Refresh as soon as the loop starts instead of after one period.
    /// Default: `true`.
    pub run_immediately: bool,
}

impl Default for RefreshOptions {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            max_consecutive_failures: None,
            run_immediately: true,
        }
    }
}

impl RefreshOptions {
    pub fn builder() -> RefreshOptionsBuilder {
        RefreshOptionsBuilder::default()
    }

    /// Options with a specific period.
    pub fn with_period(period: Duration) -> Self {
        Self {
            period,
            ..Default::default()
        }
    }

    /// Reject a zero period or a zero failure limit.
    pub fn validate(&self) -> Result<()> {
        if self.period.is_zero() {
            return Err(Error::invalid_config("period must be > 0"));
        }
        if self.max_consecutive_failures == Some(0) {
            return Err(Error::invalid_config("max_consecutive_failures must be > 0"));
        }
        Ok(())
    }
}

/// Builder for [`RefreshOptions`].
#[derive(Debug, Clone, Default)]
pub struct RefreshOptionsBuilder {
    options: RefreshOptions,
}

impl RefreshOptionsBuilder {
    #[must_use]
    pub fn period(mut self, period: Duration) -> Self {
        self.options.period = period;
        self
    }

    #[must_use]
    pub fn max_consecutive_failures(mut self, max: u32) -> Self {
        self.options.max_consecutive_failures = Some(max);
        self
    }

    #[must_use]
    pub fn run_immediately(mut self, run: bool) -> Self {
        self.options.run_immediately = run;
        self
    }

    pub fn build(self) -> RefreshOptions {
        self.options
    }
}

/// Handle to a running refresh loop.
///
/// Dropping the handle cancels the loop.
pub struct RefreshHandle {
    handle: JoinHandle<()>,
    cancel_token: CancellationToken,
}

impl RefreshHandle {
    /// Cancel the loop without waiting for it to finish.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    /// Cancel the loop and wait for the task to exit.
    pub async fn shutdown(mut self) {
        self.cancel_token.cancel();
        if let Err(e) = (&mut self.handle).await {
            warn!("Refresh task ended abnormally: {}", e);
        }
    }

    /// A token that cancels the loop when triggered.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// The background task is still running.
    pub fn is_active(&self) -> bool {
        !self.handle.is_finished()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// The task finished without being cancelled, e.g. after hitting
    /// `max_consecutive_failures`.
    pub fn has_unexpectedly_stopped(&self) -> bool {
        self.handle.is_finished() && !self.cancel_token.is_cancelled()
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

impl std::fmt::Debug for RefreshHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshHandle")
            .field("active", &self.is_active())
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

pub(crate) fn spawn_refresh_loop(
    vm: Arc<DashboardViewModel>,
    options: RefreshOptions,
) -> RefreshHandle {
    let cancel_token = CancellationToken::new();
    let task_token = cancel_token.clone();

    let handle = tokio::spawn(async move {
        let mut ticker = interval(options.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        if !options.run_immediately {
            ticker.reset();
        }

        let mut consecutive_failures = 0u32;
        info!(period = ?options.period, source = vm.source_name(), "Refresh loop started");

        loop {
            tokio::select! {
                _ = task_token.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let outcome = tokio::select! {
                _ = task_token.cancelled() => break,
                outcome = vm.refresh() => outcome,
            };

            match outcome {
                Ok(snapshot) => {
                    consecutive_failures = 0;
                    debug!(generation = snapshot.generation, "Refresh complete");
                }
                Err(e) => {
                    consecutive_failures += 1;
                    debug!(consecutive_failures, error = %e, "Refresh failed");
                    if let Some(max) = options.max_consecutive_failures
                        && consecutive_failures >= max
                    {
                        warn!(
                            "Refresh loop stopping after {} consecutive failures",
                            consecutive_failures
                        );
                        break;
                    }
                }
            }
        }

        info!("Refresh loop stopped");
    });

    RefreshHandle {
        handle,
        cancel_token,
    }
}
