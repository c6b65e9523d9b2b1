//! Background worker for manual refreshes.
//!
//! The periodic schedule runs in the view-model's own refresh loop. The
//! worker only handles on-demand requests from the UI so that a slow fetch
//! never blocks rendering. Both paths share the view-model's refresh lock,
//! so a manual refresh issued mid-cycle waits for the running one.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use garden_core::DashboardViewModel;

use super::messages::{Command, DashboardEvent};

/// Background worker that performs refreshes requested by the UI.
pub struct DashboardWorker {
    vm: Arc<DashboardViewModel>,
    command_rx: mpsc::Receiver<Command>,
    event_tx: mpsc::Sender<DashboardEvent>,
    /// Cancelled when the dashboard is torn down.
    cancel_token: CancellationToken,
}

impl DashboardWorker {
    pub fn new(
        vm: Arc<DashboardViewModel>,
        command_rx: mpsc::Receiver<Command>,
        event_tx: mpsc::Sender<DashboardEvent>,
        cancel_token: CancellationToken,
    ) -> Self {
        Self {
            vm,
            command_rx,
            event_tx,
            cancel_token,
        }
    }

    /// Run until [`Command::Shutdown`], the command channel closes, or the
    /// token is cancelled.
    pub async fn run(mut self) {
        info!("Dashboard worker started");
        loop {
            let command = tokio::select! {
                _ = self.cancel_token.cancelled() => break,
                command = self.command_rx.recv() => command,
            };
            match command {
                Some(Command::Refresh) => {
                    if !self.handle_refresh().await {
                        break;
                    }
                }
                Some(Command::Shutdown) | None => break,
            }
        }
        info!("Dashboard worker stopped");
    }

    /// Returns `false` when cancelled mid-refresh.
    async fn handle_refresh(&self) -> bool {
        debug!("Manual refresh requested");
        let result = tokio::select! {
            _ = self.cancel_token.cancelled() => return false,
            result = self.vm.refresh() => result,
        };
        let event = match result {
            Ok(snapshot) => DashboardEvent::Refreshed {
                generation: snapshot.generation,
            },
            Err(e) => {
                warn!(error = %e, "Manual refresh failed");
                DashboardEvent::RefreshFailed {
                    error: e.to_string(),
                }
            }
        };
        if self.event_tx.send(event).await.is_err() {
            debug!("UI dropped event channel");
        }
        true
    }
}
