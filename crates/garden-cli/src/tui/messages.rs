//! Message types between the dashboard UI and its background worker.
//!
//! - [`Command`]: sent from the UI to the worker
//! - [`DashboardEvent`]: sent from the worker back to the UI
//!
//! Snapshot state itself does not travel over these channels; the UI reads
//! it from the view-model's watch channel.

/// Requests from the UI to the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Refresh now, outside the periodic schedule.
    Refresh,
    /// Stop the worker.
    Shutdown,
}

/// Outcomes reported by the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    /// A manual refresh published a new snapshot.
    Refreshed { generation: u64 },
    /// A manual refresh failed.
    RefreshFailed { error: String },
}
